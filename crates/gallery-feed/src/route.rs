use std::fmt;

/// Path of the gallery view.
pub const GALLERY_PATH: &str = "/photos";

/// A location in the gallery application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/photos`, also reached through `/`.
    Gallery,
    /// `/photos/{id}`.
    Detail(String),
    NotFound,
}

impl Route {
    /// Resolve a path. Query string, fragment and a trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        match path {
            "" | GALLERY_PATH => Route::Gallery,
            _ => match path.strip_prefix("/photos/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Detail(id.to_string()),
                _ => Route::NotFound,
            },
        }
    }

    /// Canonical path. [`Route::NotFound`] has none.
    pub fn path(&self) -> Option<String> {
        match self {
            Route::Gallery => Some(GALLERY_PATH.to_string()),
            Route::Detail(id) => Some(format!("{GALLERY_PATH}/{id}")),
            Route::NotFound => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => f.write_str(&path),
            None => f.write_str("not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_to_gallery() {
        assert_eq!(Route::parse("/"), Route::Gallery);
        assert_eq!(Route::parse(""), Route::Gallery);
        assert_eq!(Route::parse("/photos/"), Route::Gallery);
        assert_eq!(Route::parse("/photos?view=list"), Route::Gallery);
    }

    #[test]
    fn detail_routes() {
        assert_eq!(Route::parse("/photos/42"), Route::Detail("42".into()));
        assert_eq!(Route::parse("/photos/42/#top"), Route::Detail("42".into()));
        assert_eq!(Route::Detail("42".into()).path().as_deref(), Some("/photos/42"));
    }

    #[test]
    fn unknown_paths() {
        assert_eq!(Route::parse("/about"), Route::NotFound);
        assert_eq!(Route::parse("/photos/1/2"), Route::NotFound);
        assert_eq!(Route::parse("/photosx"), Route::NotFound);
        assert_eq!(Route::NotFound.path(), None);
    }
}
