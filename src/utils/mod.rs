//! Project-specific utilities live here.

pub mod paged_list;

pub use paged_list::{PageMetadata, PagedList, PagingError};
