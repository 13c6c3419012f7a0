use serde::{Deserialize, Serialize};

/// Photo metadata as returned by the listing and info endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    /// String id used in URLs (e.g. `/id/{id}`).
    pub id:           String,
    pub author:       String,
    /// Original width in pixels.
    pub width:        u32,
    /// Original height in pixels.
    pub height:       u32,
    /// Page URL on the photo's origin site.
    #[serde(rename = "url")]
    pub page_url:     String,
    /// Direct download URL for the original image.
    pub download_url: String,
}

/// An entry of a listing page.
pub type PhotoSummary = Photo;

/// A single photo fetched by id.
pub type PhotoDetail = Photo;

impl Photo {
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height != 0).then(|| f64::from(self.width) / f64::from(self.height))
    }

    pub fn alt_text(&self) -> String { format!("Photo by {}", self.author) }

    pub fn dimensions(&self) -> String { format!("{} × {}", self.width, self.height) }
}
