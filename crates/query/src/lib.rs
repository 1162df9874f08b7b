//! Query pipeline: catalog + query state → one page of results.
//!
//! Pure functions only. The pipeline never fails; an empty catalog or an
//! empty filter result yields an empty page with `total_pages == 1`.

pub mod collation;
pub mod pipeline;
pub mod state;

pub use pipeline::{
    DEFAULT_PAGE_SIZE, QueryPage, clamp_page, filter, paginate, run, sort, total_pages,
};
pub use state::{QueryState, SortKey};
