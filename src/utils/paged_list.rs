//! One page of an ordered collection plus the numbers needed to navigate it.

use serde::Serialize;
use thiserror::Error;

/// Rejected paging parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PagingError {
    #[error("page_number must be 1 or greater")]
    InvalidPageNumber,

    #[error("page_size must be 1 or greater")]
    InvalidPageSize,
}

/// A page of `T` taken from a larger ordered sequence. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: usize,
    total_pages: usize,
    page_size: usize,
    total_count: usize,
}

/// Serializable paging numbers, without the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> PagedList<T> {
    /// Wrap an already sliced page.
    pub fn new(
        items: Vec<T>,
        page_number: usize,
        page_size: usize,
        total_count: usize,
    ) -> Result<Self, PagingError> {
        validate(page_number, page_size)?;
        Ok(Self {
            items,
            current_page: page_number,
            total_pages: total_count.div_ceil(page_size),
            page_size,
            total_count,
        })
    }

    /// Count `source`, skip to `page_number` and take up to `page_size` items.
    ///
    /// A page past the end yields no items; the metadata still reflects the
    /// full source.
    pub fn create<I>(source: I, page_number: usize, page_size: usize) -> Result<Self, PagingError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        validate(page_number, page_size)?;

        let source = source.into_iter();
        let total_count = source.len();
        let skip = (page_number - 1).saturating_mul(page_size);
        let items = source.skip(skip).take(page_size).collect();

        Self::new(items, page_number, page_size, total_count)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }

    /// Convert every item, keeping the paging numbers.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

fn validate(page_number: usize, page_size: usize) -> Result<(), PagingError> {
    if page_number == 0 {
        return Err(PagingError::InvalidPageNumber);
    }
    if page_size == 0 {
        return Err(PagingError::InvalidPageSize);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(count: usize) -> Vec<usize> {
        (1..=count).collect()
    }

    #[test]
    fn first_page_of_many() {
        let page = PagedList::create(numbers(25), 1, 10).unwrap();
        assert_eq!(page.items(), &numbers(10)[..]);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_count(), 25);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn last_partial_page() {
        let page = PagedList::create(numbers(25), 3, 10).unwrap();
        assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = PagedList::create(numbers(25), 4, 10).unwrap();
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_count(), 25);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_source() {
        let page = PagedList::create(Vec::<usize>::new(), 1, 10).unwrap();
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let page = PagedList::create(numbers(20), 2, 10).unwrap();
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            PagedList::create(numbers(5), 1, 0),
            Err(PagingError::InvalidPageSize)
        );
    }

    #[test]
    fn zero_page_number_is_rejected() {
        assert_eq!(
            PagedList::create(numbers(5), 0, 10),
            Err(PagingError::InvalidPageNumber)
        );
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let page = PagedList::create(numbers(5), usize::MAX, usize::MAX).unwrap();
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = PagedList::create(numbers(25), 2, 10).unwrap();
        let before = page.metadata();
        let mapped = page.map(|n| n.to_string());

        assert_eq!(mapped.metadata(), before);
        assert_eq!(mapped.items()[0], "11");
    }

    #[test]
    fn metadata_serializes_snake_case() {
        let page = PagedList::create(numbers(3), 1, 2).unwrap();
        let json = serde_json::to_value(page.metadata()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_count": 3,
                "page_size": 2,
                "current_page": 1,
                "total_pages": 2,
                "has_previous": false,
                "has_next": true
            })
        );
    }
}
