//! Rendering error model.

use std::path::PathBuf;

use thiserror::Error;

use taxinvoice_core::DomainError;

/// Failure while producing the document artifact.
///
/// The computed invoice stays valid when rendering fails; the caller may fix
/// the cause (missing asset, unwritable directory) and render again.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The invoice or output path was rejected before rendering started.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An image asset referenced by the invoice could not be loaded.
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// PDF object serialization failed.
    #[error("pdf serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the finished document failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

/// Result type used by renderers.
pub type RenderResult<T> = Result<T, RenderError>;
