//! Storage error taxonomy

/// Failures reported by the storage collaborator and the preview pipeline
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    #[error("no such file or directory: {0}")]
    NotFound(String),

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("is a directory: {0}")]
    IsDirectory(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("directory not empty: {0}")]
    NotEmpty(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("failed to decode image: {0}")]
    Decode(String),
}

impl From<rusqlite::Error> for VfsError {
    fn from(err: rusqlite::Error) -> Self {
        VfsError::Io(std::io::Error::other(err))
    }
}

impl From<image::ImageError> for VfsError {
    fn from(err: image::ImageError) -> Self {
        VfsError::Decode(err.to_string())
    }
}

impl VfsError {
    /// Non-zero status code carried by the error, if any
    ///
    /// Only OS-level I/O errors have one (their errno).
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            VfsError::Io(e) => e.raw_os_error().filter(|&code| code != 0),
            _ => None,
        }
    }

    /// Error for a lock that was poisoned by a panicking holder
    pub(crate) fn poisoned(what: &str) -> Self {
        VfsError::Io(std::io::Error::other(format!("{} lock poisoned", what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_from_os_error() {
        let err = VfsError::Io(std::io::Error::from_raw_os_error(2));
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(VfsError::NotFound("/a".into()).exit_code(), None);
        assert_eq!(VfsError::Io(std::io::Error::other("closed")).exit_code(), None);
    }
}
