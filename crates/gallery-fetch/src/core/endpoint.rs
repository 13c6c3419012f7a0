use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://picsum.photos";

pub const THUMBNAIL_SIZE: (u32, u32) = (300, 200);

pub const DETAIL_SIZE: (u32, u32) = (1200, 800);

/// Responsive renditions offered for the detail image.
pub const DETAIL_SRCSET: [(u32, u32); 3] = [(600, 400), (900, 600), (1200, 800)];

/// URL builder for the photo API rooted at a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base URL is valid")
    }
}

impl Endpoint {
    pub fn new(base: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBaseUrl {
            url: base.to_string(),
            reason,
        };
        let base = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url { &self.base }

    /// `GET {base}/v2/list?page={page}&limit={limit}`
    pub fn list(&self, page: u32, limit: u32) -> Url {
        let mut url = self.join(&["v2", "list"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }

    /// `GET {base}/id/{id}/info`
    pub fn info(&self, id: &str) -> Result<Url> {
        let id = validate_id(id)?;
        Ok(self.join(&["id", id, "info"]))
    }

    /// `{base}/id/{id}/{width}/{height}`
    pub fn image(&self, id: &str, width: u32, height: u32) -> Result<Url> {
        let id = validate_id(id)?;
        Ok(self.join(&["id", id, &width.to_string(), &height.to_string()]))
    }

    pub fn thumbnail(&self, id: &str) -> Result<Url> {
        let (w, h) = THUMBNAIL_SIZE;
        self.image(id, w, h)
    }

    /// Candidates for a responsive image, as `(url, width)` pairs.
    pub fn srcset(&self, id: &str) -> Result<Vec<(Url, u32)>> {
        DETAIL_SRCSET
            .iter()
            .map(|&(w, h)| self.image(id, w, h).map(|url| (url, w)))
            .collect()
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // hierarchical bases are checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Reject ids that are empty or would escape their path segment.
pub fn validate_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(Error::InvalidInput("Invalid photo id".into()));
    }
    Ok(id)
}
