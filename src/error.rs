//! Domain error for repository metadata lookups.

use core::fmt::{Display, Formatter};

/// Error returned by [`RepositoryMetadata`](crate::RepositoryMetadata) accessors.
#[derive(Debug)]
pub enum MetadataError {
    /// A primary page (contributors or branches) answered with a non-success HTTP status.
    RepositoryNotFound {
        /// URL that failed to load
        url: String,
        /// Description of the original failure, e.g. `HTTP 404 Not Found`
        reason: String,
    },

    /// The branches page loaded but carried no default-branch marker.
    MissingDefaultBranch { url: String },

    /// Any other failure: invalid input, connection errors, timeouts, unreadable bodies.
    Other(ohno::AppError),
}

impl MetadataError {
    /// Returns `true` if this is a [`MetadataError::RepositoryNotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RepositoryNotFound { .. })
    }
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RepositoryNotFound { url, reason } => write!(f, "repository not found at '{url}': {reason}"),
            Self::MissingDefaultBranch { url } => write!(f, "no default branch found on '{url}'"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for MetadataError {}

impl From<ohno::AppError> for MetadataError {
    fn from(e: ohno::AppError) -> Self {
        Self::Other(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        let err = MetadataError::RepositoryNotFound {
            url: "https://github.com/a/b/contributors".into(),
            reason: "HTTP 404 Not Found".into(),
        };
        assert!(err.is_not_found());

        let err = MetadataError::MissingDefaultBranch {
            url: "https://github.com/a/b/branches".into(),
        };
        assert!(!err.is_not_found());

        let err = MetadataError::from(ohno::app_err!("connection refused"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_carries_reason() {
        let err = MetadataError::RepositoryNotFound {
            url: "https://github.com/a/b/contributors".into(),
            reason: "HTTP 404 Not Found".into(),
        };

        let text = err.to_string();
        assert!(text.contains("https://github.com/a/b/contributors"));
        assert!(text.contains("HTTP 404 Not Found"));
    }
}
