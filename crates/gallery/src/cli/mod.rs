mod app;
mod list;
mod show;
mod view;

pub use app::{App, Commands};

use anyhow::{Context, Result};
use gallery_fetch::{PicsumClient, ReqwestClient};

use crate::config::GalleryConfig;

/// Picsum client configured from `config`.
fn client(config: &GalleryConfig) -> Result<PicsumClient<ReqwestClient>> {
    let http = ReqwestClient::new().context("Failed to build HTTP client")?;
    Ok(PicsumClient::new(http)
        .with_endpoint(config.endpoint()?)
        .with_options(config.fetch_options()))
}
