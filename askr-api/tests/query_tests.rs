/// Query/aggregation layer integration tests
///
/// Listings, bulk counts, tag popularity, contributor ranking, and the
/// cascade behavior of deletes, against a real database.
///
/// Run with a PostgreSQL database available:
///
/// ```bash
/// DATABASE_URL=postgresql://localhost/askr_test cargo test -p askr-api -- --ignored
/// ```

mod common;

use askr_shared::models::answer::Answer;
use askr_shared::models::profile::Profile;
use askr_shared::models::question::Question;
use askr_shared::models::tag::Tag;
use askr_shared::models::user::User;
use askr_shared::rating::{cast_vote, VoteTarget, VoteValue};
use common::TestContext;
use std::time::Duration;
use uuid::Uuid;

/// A profile with 3 questions and 4 answers scores 7, above 5 questions
/// and 0 answers scoring 5
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_top_profiles_sum_counts_independently() {
    let mut ctx = TestContext::new().await.unwrap();
    let mixed = ctx.create_profile("mixed").await.unwrap();
    let asker = ctx.create_profile("asker").await.unwrap();

    for i in 0..3 {
        ctx.create_question(&mixed, &format!("mixed q{}", i), &[]).await.unwrap();
    }
    let parent = ctx.create_question(&asker, "parent", &[]).await.unwrap();
    for i in 0..4 {
        ctx.create_answer(&mixed, &parent, &format!("mixed a{}", i)).await.unwrap();
    }
    for i in 0..4 {
        ctx.create_question(&asker, &format!("asker q{}", i), &[]).await.unwrap();
    }

    // asker has 5 questions total (parent + 4), mixed has 3 + 4 answers
    let ranked = Profile::top(&ctx.db, 100).await.unwrap();

    let mixed_rank = ranked.iter().position(|p| p.id == mixed.id).unwrap();
    let asker_rank = ranked.iter().position(|p| p.id == asker.id).unwrap();

    let mixed_row = &ranked[mixed_rank];
    assert_eq!(mixed_row.question_count, 3);
    assert_eq!(mixed_row.answer_count, 4);
    assert_eq!(mixed_row.total_posts, 7);

    let asker_row = &ranked[asker_rank];
    assert_eq!(asker_row.total_posts, 5);

    assert!(mixed_rank < asker_rank, "7 posts must rank above 5");

    ctx.cleanup().await.unwrap();
}

/// A tag on 5 distinct questions ranks above one on 2, votes irrelevant
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_tag_popularity_counts_questions() {
    let mut ctx = TestContext::new().await.unwrap();
    let author = ctx.create_profile("author").await.unwrap();
    let voter = ctx.create_profile("voter").await.unwrap();

    let suffix = Uuid::new_v4().simple().to_string();
    let big_tag = format!("big-{}", &suffix[..8]);
    let small_tag = format!("small-{}", &suffix[..8]);

    for i in 0..5 {
        ctx.create_question(&author, &format!("big q{}", i), &[&big_tag])
            .await
            .unwrap();
    }
    for i in 0..2 {
        let q = ctx
            .create_question(&author, &format!("small q{}", i), &[&small_tag])
            .await
            .unwrap();
        // Heavily upvoted questions must not boost the tag
        cast_vote(&ctx.db, voter.id, VoteTarget::Question(q.id), VoteValue::Up)
            .await
            .unwrap();
    }

    let popular = Tag::popular(&ctx.db, 1000).await.unwrap();
    let big = popular.iter().find(|t| t.name == big_tag).unwrap();
    let small = popular.iter().find(|t| t.name == small_tag).unwrap();

    assert_eq!(big.question_count, 5);
    assert_eq!(small.question_count, 2);
    let big_pos = popular.iter().position(|t| t.name == big_tag).unwrap();
    let small_pos = popular.iter().position(|t| t.name == small_tag).unwrap();
    assert!(big_pos < small_pos);

    ctx.cleanup().await.unwrap();
}

/// Ratings [3, -1, 3] created in order A,B,C list as [C, A, B]:
/// rating first, newer answer wins the tie
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_answer_ordering_tie_breaks_newer_first() {
    let mut ctx = TestContext::new().await.unwrap();
    let author = ctx.create_profile("author").await.unwrap();
    let mut voters = Vec::new();
    for i in 0..3 {
        voters.push(ctx.create_profile(&format!("voter{}", i)).await.unwrap());
    }

    let question = ctx.create_question(&author, "Ordering", &[]).await.unwrap();

    let a = ctx.create_answer(&author, &question, "A").await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let b = ctx.create_answer(&author, &question, "B").await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let c = ctx.create_answer(&author, &question, "C").await.unwrap();

    for voter in &voters {
        cast_vote(&ctx.db, voter.id, VoteTarget::Answer(a.id), VoteValue::Up)
            .await
            .unwrap();
        cast_vote(&ctx.db, voter.id, VoteTarget::Answer(c.id), VoteValue::Up)
            .await
            .unwrap();
    }
    cast_vote(&ctx.db, voters[0].id, VoteTarget::Answer(b.id), VoteValue::Down)
        .await
        .unwrap();

    let answers = Answer::list_for_question(&ctx.db, question.id).await.unwrap();
    let texts: Vec<&str> = answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["C", "A", "B"]);

    ctx.cleanup().await.unwrap();
}

/// Newest and best listings order as documented
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_question_listings() {
    let mut ctx = TestContext::new().await.unwrap();
    let author = ctx.create_profile("author").await.unwrap();
    let voter = ctx.create_profile("voter").await.unwrap();

    let old = ctx.create_question(&author, "old", &[]).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let new = ctx.create_question(&author, "new", &[]).await.unwrap();

    cast_vote(&ctx.db, voter.id, VoteTarget::Question(old.id), VoteValue::Up)
        .await
        .unwrap();

    let newest = Question::list_newest(&ctx.db).await.unwrap();
    let new_pos = newest.iter().position(|q| q.id == new.id).unwrap();
    let old_pos = newest.iter().position(|q| q.id == old.id).unwrap();
    assert!(new_pos < old_pos);

    let best = Question::list_best(&ctx.db).await.unwrap();
    let new_pos = best.iter().position(|q| q.id == new.id).unwrap();
    let old_pos = best.iter().position(|q| q.id == old.id).unwrap();
    assert!(old_pos < new_pos, "upvoted question ranks first");

    ctx.cleanup().await.unwrap();
}

/// Tag-filtered listing only returns questions carrying the tag
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_list_by_tag() {
    let mut ctx = TestContext::new().await.unwrap();
    let author = ctx.create_profile("author").await.unwrap();

    let suffix = Uuid::new_v4().simple().to_string();
    let tag = format!("niche-{}", &suffix[..8]);

    let tagged = ctx.create_question(&author, "tagged", &[&tag]).await.unwrap();
    ctx.create_question(&author, "untagged", &[]).await.unwrap();

    let listed = Question::list_by_tag(&ctx.db, &tag).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, tagged.id);

    ctx.cleanup().await.unwrap();
}

/// Bulk answer counts serve a whole page in one query, zero rows omitted
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_bulk_answer_counts() {
    let mut ctx = TestContext::new().await.unwrap();
    let author = ctx.create_profile("author").await.unwrap();

    let busy = ctx.create_question(&author, "busy", &[]).await.unwrap();
    let quiet = ctx.create_question(&author, "quiet", &[]).await.unwrap();

    for i in 0..3 {
        ctx.create_answer(&author, &busy, &format!("a{}", i)).await.unwrap();
    }

    let counts = Question::answer_counts(&ctx.db, &[busy.id, quiet.id]).await.unwrap();
    assert_eq!(counts.get(&busy.id).copied(), Some(3));
    assert_eq!(counts.get(&quiet.id).copied(), None);

    ctx.cleanup().await.unwrap();
}

/// Deleting a user cascades through profile to content and votes
#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_user_delete_cascades() {
    let mut ctx = TestContext::new().await.unwrap();
    let author = ctx.create_profile("author").await.unwrap();
    let voter = ctx.create_profile("voter").await.unwrap();

    let question = ctx.create_question(&author, "doomed", &[]).await.unwrap();
    let answer = ctx.create_answer(&author, &question, "also doomed").await.unwrap();
    cast_vote(&ctx.db, voter.id, VoteTarget::Question(question.id), VoteValue::Up)
        .await
        .unwrap();

    assert!(User::delete(&ctx.db, author.user_id).await.unwrap());

    assert!(Profile::find_by_id(&ctx.db, author.id).await.unwrap().is_none());
    assert!(Question::find_by_id(&ctx.db, question.id).await.unwrap().is_none());
    assert!(Answer::find_by_id(&ctx.db, answer.id).await.unwrap().is_none());

    ctx.cleanup().await.unwrap();
}
