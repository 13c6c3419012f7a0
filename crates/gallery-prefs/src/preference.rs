use tracing::warn;
use url::form_urlencoded;

use crate::{PreferenceStore, Result, ViewMode};

/// Storage key of the view-mode preference.
pub const VIEW_MODE_KEY: &str = "viewMode";

/// Query parameter mirroring the view mode in a shareable URL.
pub const VIEW_PARAM: &str = "view";

/// The gallery's view-mode setting, read and written through a store.
#[derive(Debug)]
pub struct ViewModePreference<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> ViewModePreference<S> {
    pub fn new(store: S) -> Self { Self { store } }

    pub fn store(&self) -> &S { &self.store }

    /// Resolve the active mode.
    ///
    /// A valid `view` parameter in `query` wins over the stored value; an
    /// absent or unreadable stored value falls back to [`ViewMode::Grid`].
    pub fn load(&self, query: Option<&str>) -> ViewMode {
        if let Some(mode) = query.and_then(read_view_param) {
            return mode;
        }
        match self.store.get(VIEW_MODE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                warn!(%value, "ignoring unknown stored view mode");
                ViewMode::default()
            }),
            Ok(None) => ViewMode::default(),
            Err(e) => {
                warn!(error = %e, "could not read view mode preference");
                ViewMode::default()
            }
        }
    }

    /// Persist `mode` and return `query` with the `view` parameter updated.
    pub fn save(&self, mode: ViewMode, query: Option<&str>) -> Result<String> {
        self.store.set(VIEW_MODE_KEY, mode.as_str())?;
        Ok(with_view_param(query.unwrap_or_default(), mode))
    }
}

/// The `view` parameter of a query string, if present and valid.
///
/// A leading `?` is accepted.
pub fn read_view_param(query: &str) -> Option<ViewMode> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .filter(|(key, _)| key == VIEW_PARAM)
        .find_map(|(_, value)| value.parse().ok())
}

/// `query` with its `view` parameter set to `mode`, other pairs kept in order.
pub fn with_view_param(query: &str, mode: ViewMode) -> String {
    let pairs = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .filter(|(key, _)| key != VIEW_PARAM);

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .append_pair(VIEW_PARAM, mode.as_str())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_param_among_others() {
        assert_eq!(read_view_param("?page=2&view=list"), Some(ViewMode::List));
        assert_eq!(read_view_param("view=grid"), Some(ViewMode::Grid));
        assert_eq!(read_view_param("view=mosaic"), None);
        assert_eq!(read_view_param(""), None);
    }

    #[test]
    fn writes_param_preserving_others() {
        assert_eq!(with_view_param("", ViewMode::List), "view=list");
        assert_eq!(with_view_param("?a=1&view=grid&b=2", ViewMode::List), "a=1&b=2&view=list");
    }
}
