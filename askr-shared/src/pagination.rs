/// Page windowing over ordered result sets
///
/// Page requests arrive as free-form input (typically a URL query
/// parameter) and may be missing, non-numeric, zero, negative, or past
/// the last page. None of those are errors: missing and non-numeric
/// input resolve to page 1, and out-of-range numbers clamp to the
/// nearest valid page. Pagination never raises.
///
/// # Example
///
/// ```
/// use askr_shared::pagination::paginate;
///
/// let items: Vec<i32> = (1..=23).collect();
///
/// let page = paginate(items.clone(), Some("2"), 5);
/// assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
/// assert_eq!(page.number, 2);
/// assert_eq!(page.num_pages, 5);
///
/// // Out of range clamps, garbage resolves to page 1
/// assert_eq!(paginate(items.clone(), Some("100"), 5).number, 5);
/// assert_eq!(paginate(items, Some("abc"), 5).number, 1);
/// ```

use serde::Serialize;

/// One page of an ordered result set, with navigation metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The items on this page, in sequence order
    pub items: Vec<T>,

    /// Resolved page number (1-based)
    pub number: usize,

    /// Total number of pages (at least 1, even for an empty set)
    pub num_pages: usize,

    /// Total number of items across all pages
    pub total: usize,

    /// Whether a page follows this one
    pub has_next: bool,

    /// Whether a page precedes this one
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items (only possible for an empty set)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transforms the page's items, keeping the navigation metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Resolves a raw page parameter to a page number
///
/// Missing or non-numeric input resolves to 1. Numeric input is kept
/// as-is here; clamping against the page count happens in [`paginate`].
fn parse_page_param(raw: Option<&str>) -> i64 {
    match raw {
        Some(s) => s.trim().parse::<i64>().unwrap_or(1),
        None => 1,
    }
}

/// Windows an ordered sequence into the requested page
///
/// `per_page` must be greater than zero. An empty sequence yields a
/// single empty page 1. Requested pages below 1 clamp to the first
/// page; pages past the end clamp to the last.
pub fn paginate<T>(items: Vec<T>, raw_page: Option<&str>, per_page: usize) -> Page<T> {
    debug_assert!(per_page > 0, "per_page must be positive");
    let per_page = per_page.max(1);

    let total = items.len();
    let num_pages = total.div_ceil(per_page).max(1);

    let requested = parse_page_param(raw_page);
    let number = requested.clamp(1, num_pages as i64) as usize;

    let start = (number - 1) * per_page;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    Page {
        items,
        number,
        num_pages,
        total,
        has_next: number < num_pages,
        has_previous: number > 1,
    }
}
