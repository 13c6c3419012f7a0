//! JSON fetching with bounded retry and cancellation for the Picsum photo API.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and wire types
//! - [`core`] - Pure transformations (backoff, endpoint URLs)
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Uniform failures**: any non-success status, transport error or malformed
//!   body is one failed attempt
//! - **Linear backoff**: `backoff * (attempt + 1)` between attempts
//! - **Cancellation**: a [`CancellationToken`] aborts both the request and the
//!   backoff wait with [`Error::Cancelled`]

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{Endpoint, linear_backoff};
pub use data::{FetchOptions, Photo, PhotoDetail, PhotoSummary};
pub use effects::{HttpClient, HttpResponse, JsonFetcher, PhotoSource, PicsumClient};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, Result};
pub use tokio_util::sync::CancellationToken;
