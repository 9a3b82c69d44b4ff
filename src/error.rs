use std::path::PathBuf;

use thiserror::Error;

use crate::path::PathDataError;

/// Everything that can stop a font build. Each variant names the file it is about.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing {attribute} attribute in {}", path.display())]
    MissingAttribute {
        attribute: &'static str,
        path: PathBuf,
    },

    #[error("Invalid {attribute} attribute {value:?} in {}", path.display())]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        path: PathBuf,
    },

    #[error("No path data found in {}", path.display())]
    NoPathFound { path: PathBuf },

    #[error("{count} paths left in {} after removing bounding boxes, expected exactly one", path.display())]
    AmbiguousPath { count: usize, path: PathBuf },

    #[error("Invalid path data in {}: {source}", path.display())]
    InvalidPathData {
        path: PathBuf,
        #[source]
        source: PathDataError,
    },

    #[error("Malformed XML in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Root element of {} is <{found}>, not <svg>", path.display())]
    NotSvg { found: String, path: PathBuf },

    #[error("Invalid manifest {}: {reason}", path.display())]
    Manifest { reason: String, path: PathBuf },

    #[error("No icon named {codename}.svg in any of the input directories")]
    MissingIcon { codename: String },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Manifest {
            reason: reason.to_string(),
            path: path.into(),
        }
    }
}
