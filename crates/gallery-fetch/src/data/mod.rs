//! Immutable data types for photo fetching.
//!
//! Configuration for the fetch client and the wire types of the photo API.

pub mod options;
pub mod photo;

pub use options::{FetchOptions, RetryEvent};
pub use photo::{Photo, PhotoDetail, PhotoSummary};
