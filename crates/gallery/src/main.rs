use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::App;
use crate::config::GalleryConfig;

mod cli;
mod config;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    init_tracing(app.verbose);

    let config = GalleryConfig::load(app.config.as_deref())?;
    app.cmd.run(&config).await
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
