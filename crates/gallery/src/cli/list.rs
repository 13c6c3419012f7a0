use anyhow::{Result, bail};
use clap::Args;
use gallery_feed::{GALLERY_PATH, GalleryView, ViewCoordinator};
use gallery_fetch::PhotoSummary;
use gallery_prefs::{FileStore, ViewMode};
use tabled::Tabled;
use tracing::info;

use super::client;
use crate::config::GalleryConfig;
use crate::ui::table::Formatter;

#[derive(Args, Clone, Debug)]
pub struct ListArg {
    /// Pages to consume before printing
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Items per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Layout for this run only
    #[arg(long)]
    pub view: Option<ViewMode>,
}

#[derive(Tabled)]
struct GridRow {
    #[tabled(rename = "ID")]
    id:     String,
    #[tabled(rename = "AUTHOR")]
    author: String,
}

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "ID")]
    id:     String,
    #[tabled(rename = "AUTHOR")]
    author: String,
    #[tabled(rename = "SIZE")]
    size:   String,
    #[tabled(rename = "SOURCE")]
    source: String,
}

pub async fn run(arg: ListArg, config: &GalleryConfig) -> Result<()> {
    let mut feed_config = config.feed_config();
    if let Some(limit) = arg.limit {
        feed_config = feed_config.page_size(limit);
    }
    let mut app = ViewCoordinator::new(client(config)?, feed_config, FileStore::new(config.prefs_path()?));

    if let (_, Some(handle)) = app.navigate(GALLERY_PATH) {
        handle.await?;
    }

    // scroll until enough pages were requested or the sentinel goes away
    while app.feed().snapshot().current_page < arg.pages {
        match app.on_sentinel(true) {
            Some(handle) => handle.await?,
            None => break,
        }
    }
    let view = app.gallery_view();
    let mode = arg.view.unwrap_or_else(|| app.view_mode(None));
    app.teardown();

    match view {
        GalleryView::Failed { message } => bail!("{message}"),
        GalleryView::Loading => bail!("feed did not settle"),
        GalleryView::Ready { items, has_more, .. } => {
            info!(count = items.len(), pages = app.feed().snapshot().current_page, "feed loaded");
            let tail = if has_more { "more available" } else { "end of feed" };
            let footer = format!("{} photos, {tail}", items.len());
            print_items(&items, mode, footer);
            Ok(())
        }
    }
}

fn print_items(items: &[PhotoSummary], mode: ViewMode, footer: String) {
    let formatter = Formatter {
        footer: Some(footer),
        ..Formatter::default()
    };
    let table = match mode {
        ViewMode::Grid => formatter.build(items.iter().map(|p| GridRow {
            id:     p.id.clone(),
            author: p.author.clone(),
        })),
        ViewMode::List => formatter.build(items.iter().map(|p| ListRow {
            id:     p.id.clone(),
            author: p.author.clone(),
            size:   p.dimensions(),
            source: p.page_url.clone(),
        })),
    };
    println!("{table}");
}
