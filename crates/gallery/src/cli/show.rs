use anyhow::{Result, bail};
use clap::Args;
use gallery_feed::{DetailView, Route, ViewCoordinator};
use gallery_fetch::core::{DETAIL_SIZE, validate_id};
use gallery_prefs::MemoryStore;

use super::client;
use crate::config::GalleryConfig;
use crate::ui::table::{Field, Formatter};

#[derive(Args, Clone, Debug)]
pub struct ShowArg {
    /// Photo id, as listed by `gallery list`
    pub id: String,
}

pub async fn run(arg: ShowArg, config: &GalleryConfig) -> Result<()> {
    let endpoint = config.endpoint()?;
    let mut app = ViewCoordinator::new(client(config)?, config.feed_config(), MemoryStore::new());

    let id = validate_id(&arg.id)?;
    let (route, handle) = app.navigate(&format!("/photos/{id}"));
    let (Route::Detail(id), Some(handle)) = (route, handle) else {
        bail!("no photo route for {id}");
    };
    handle.await?;

    let photo = match app.detail_view() {
        DetailView::Ready { photo } => photo,
        DetailView::Failed { message } => bail!("{message}"),
        DetailView::Loading => bail!("detail did not settle"),
    };

    let (width, height) = DETAIL_SIZE;
    let mut fields = vec![
        Field::new("id", &photo.id),
        Field::new("author", &photo.author),
        Field::new("size", photo.dimensions()),
        Field::new("alt", photo.alt_text()),
        Field::new("source", &photo.page_url),
        Field::new("download", &photo.download_url),
        Field::new("image", endpoint.image(&id, width, height)?.to_string()),
        Field::new("thumbnail", endpoint.thumbnail(&id)?.to_string()),
    ];
    if let Some(ratio) = photo.aspect_ratio() {
        fields.insert(3, Field::new("aspect", format!("{ratio:.3}")));
    }
    let srcset = endpoint
        .srcset(&id)?
        .into_iter()
        .map(|(url, w)| format!("{url} {w}w"))
        .collect::<Vec<_>>()
        .join(", ");
    fields.push(Field::new("srcset", srcset));

    let table = Formatter {
        header: Some(app.title()),
        no_col_name: true,
        ..Formatter::default()
    }
    .build(fields);
    println!("{table}");
    Ok(())
}
