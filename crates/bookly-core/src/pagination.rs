//! Page windows over already-ordered result lists.

use serde::Serialize;

/// One page of a larger ordered list. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based position of the first item on this page, 0 for an empty page.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }
}

/// `ceil(total_items / page_size)`, zero for an empty list. A zero page size counts as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if total_items == 0 {
        0
    } else {
        total_items.div_ceil(page_size.max(1))
    }
}

fn clamp_page(page_number: i64, pages: usize) -> usize {
    if pages == 0 {
        return 1;
    }
    let last = i64::try_from(pages).unwrap_or(i64::MAX);
    // bounded to [1, pages], so the conversion cannot truncate
    page_number.clamp(1, last) as usize
}

/// Slices `items` to the requested page. Out-of-range page numbers clamp.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: i64) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let pages = total_pages(total_items, page_size);
    let page = clamp_page(page_number, pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: &items[start..end],
        page,
        page_size,
        total_pages: pages,
        total_items,
        has_next: page < pages,
        has_prev: pages > 0 && page > 1,
    }
}

/// Current page position for a paged view.
///
/// Changing the page size always returns to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Moves to `page_number`, clamped to the pages available for `total_items`.
    pub fn go_to(&mut self, page_number: i64, total_items: usize) -> usize {
        self.page = clamp_page(page_number, total_pages(total_items, self.page_size));
        self.page
    }

    /// Advances one page if there is one; returns whether the page changed.
    pub fn next(&mut self, total_items: usize) -> bool {
        if self.page < total_pages(total_items, self.page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        let page_number = i64::try_from(self.page).unwrap_or(i64::MAX);
        paginate(items, self.page_size, page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_ceil_pages() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 10, 3);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
        assert!(page.has_prev);
        assert_eq!(page.first_index(), 21);
    }

    #[test]
    fn out_of_range_requests_clamp() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 10, 0).page, 1);
        assert_eq!(paginate(&items, 10, -7).page, 1);
        assert_eq!(paginate(&items, 10, 99).page, 3);
        assert_eq!(paginate(&items, 10, i64::MAX).items.len(), 5);
    }

    #[test]
    fn empty_list_yields_empty_first_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 10, 4);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.is_empty());
        assert!(!page.has_next && !page.has_prev);
        assert_eq!(page.first_index(), 0);
    }

    #[test]
    fn zero_page_size_counts_as_one() {
        let items = vec!["a", "b"];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.items, &["b"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn changing_page_size_resets_to_first_page() {
        let items: Vec<u32> = (1..=50).collect();
        let mut paginator = Paginator::new(10);
        paginator.go_to(4, items.len());
        assert_eq!(paginator.page(), 4);

        paginator.set_page_size(20);
        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.window(&items).items.first(), Some(&1));
    }

    #[test]
    fn next_and_prev_stay_in_bounds() {
        let mut paginator = Paginator::new(2);
        assert!(!paginator.prev());
        assert!(paginator.next(3));
        assert!(!paginator.next(3));
        assert_eq!(paginator.page(), 2);
        assert!(paginator.prev());
        assert_eq!(paginator.page(), 1);
    }
}
