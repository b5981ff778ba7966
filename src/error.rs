use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

/// Coarse failure class shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Workbook,
    Unexpected,
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Select a valid Excel file first.")]
    NoFileSelected,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported workbook format (expected .xlsx or .xlsm): {}", .0.display())]
    Unsupported(PathBuf),

    #[error("cannot open workbook {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("cannot save workbook {}: {reason}", path.display())]
    Unwritable { path: PathBuf, reason: String },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FormatError {
    pub fn unreadable(path: &Path, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn unwritable(path: &Path, reason: impl ToString) -> Self {
        Self::Unwritable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoFileSelected | Self::NotFound(_) => ErrorKind::Input,
            Self::Unsupported(_) | Self::Unreadable { .. } | Self::Unwritable { .. } => {
                ErrorKind::Workbook
            }
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(FormatError::NoFileSelected.kind(), ErrorKind::Input);
        assert_eq!(
            FormatError::NotFound(PathBuf::from("a.xlsx")).kind(),
            ErrorKind::Input
        );
        assert_eq!(
            FormatError::unreadable(Path::new("a.xlsx"), "bad zip").kind(),
            ErrorKind::Workbook
        );
        assert_eq!(
            FormatError::unwritable(Path::new("a.xlsx"), "denied").kind(),
            ErrorKind::Workbook
        );
        assert_eq!(
            FormatError::Unexpected("boom".into()).kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn message_carries_underlying_reason() {
        let err = FormatError::unreadable(Path::new("book.xlsx"), "invalid zip header");
        assert_eq!(
            err.to_string(),
            "cannot open workbook book.xlsx: invalid zip header"
        );
    }
}
