//! Error types for loading and laying out datasets.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreemapError>;

#[derive(Debug, Error)]
pub enum TreemapError {
    /// The server answered with a non-success status.
    #[error("fetching {url} failed with HTTP status {status}")]
    Fetch { url: String, status: u16 },

    /// Transport-level failure (DNS, CORS, offline, ...).
    #[error("network error: {0}")]
    Network(String),

    #[error("malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but does not describe a valid treemap hierarchy.
    #[error("invalid dataset structure at `{path}`: {reason}")]
    Structure { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TreemapError {
    pub fn structure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        TreemapError::Structure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure came from the data source rather than the data.
    pub fn is_transport(&self) -> bool {
        matches!(self, TreemapError::Fetch { .. } | TreemapError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_error_names_the_path() {
        let err = TreemapError::structure("Games.Wii.Wii Sports", "leaf has no value");
        assert_eq!(
            err.to_string(),
            "invalid dataset structure at `Games.Wii.Wii Sports`: leaf has no value"
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn fetch_errors_are_transport() {
        let err = TreemapError::Fetch {
            url: "https://example.test/data.json".into(),
            status: 404,
        };
        assert!(err.is_transport());
        assert!(err.to_string().contains("404"));
    }
}
