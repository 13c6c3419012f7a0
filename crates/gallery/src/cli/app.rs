use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{list, show, view};
use crate::config::GalleryConfig;

#[derive(Clone, Debug, Parser)]
#[command(name = "gallery", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Debug logging unless `RUST_LOG` says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file instead of ~/.picsum-gallery/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "ls", name = "list", about = "Browse the photo feed")]
    List(list::ListArg),
    #[command(alias = "s", name = "show", about = "Show one photo")]
    Show(show::ShowArg),
    #[command(alias = "v", name = "view", about = "Read or set the view mode")]
    View(view::ViewArg),
}

impl Commands {
    pub async fn run(self, config: &GalleryConfig) -> Result<()> {
        match self {
            Commands::List(arg) => list::run(arg, config).await,
            Commands::Show(arg) => show::run(arg, config).await,
            Commands::View(arg) => view::run(arg, config),
        }
    }
}
