//! Pure transformations for photo fetching.
//!
//! Backoff arithmetic and endpoint URL construction; nothing here performs I/O.

mod endpoint;
mod retry;

pub use endpoint::{
    DEFAULT_BASE_URL, DETAIL_SIZE, DETAIL_SRCSET, Endpoint, THUMBNAIL_SIZE, validate_id,
};
pub use retry::linear_backoff;
