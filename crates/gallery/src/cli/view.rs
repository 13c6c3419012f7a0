use anyhow::{Context, Result};
use clap::Args;
use gallery_prefs::{FileStore, ViewMode, ViewModePreference};

use crate::config::GalleryConfig;

#[derive(Args, Clone, Debug)]
pub struct ViewArg {
    /// New mode; prints the current one when omitted
    pub mode: Option<ViewMode>,
}

pub fn run(arg: ViewArg, config: &GalleryConfig) -> Result<()> {
    let path = config.prefs_path()?;
    let prefs = ViewModePreference::new(FileStore::new(&path));

    match arg.mode {
        Some(mode) => {
            let query = prefs
                .save(mode, None)
                .with_context(|| format!("Failed to save view mode to {}", path.display()))?;
            println!("view mode set to {mode} (?{query})");
        }
        None => println!("{}", prefs.load(None)),
    }
    Ok(())
}
