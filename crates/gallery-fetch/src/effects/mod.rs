//! I/O operations for photo fetching.
//!
//! Everything that touches the network lives here, behind the [`HttpClient`]
//! and [`PhotoSource`] traits so callers can substitute scripted doubles.

mod fetcher;
mod http;
mod source;

pub use fetcher::{JsonFetcher, cancellable};
pub use http::{HttpClient, HttpResponse};
pub use source::{PhotoSource, PicsumClient};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
