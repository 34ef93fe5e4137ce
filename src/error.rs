//! Error types for the shop compositor

use thiserror::Error;

/// Result type alias for compositor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a shop image
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog input is empty or malformed; nothing is rendered
    #[error("Invalid catalog data: {0}")]
    CatalogData(String),

    /// A background, icon, or font could not be loaded.
    /// Recoverable: card rendering substitutes a fallback asset instead
    /// of propagating this.
    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    /// Defensive layout check tripped; indicates a precondition or
    /// arithmetic bug, never a runtime condition to recover from
    #[error("Layout invariant violated: {0}")]
    LayoutInvariant(String),

    /// Network error while fetching the catalog or an icon
    #[error("Network error: {0}")]
    Network(String),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// A render task panicked or was cancelled before the join barrier
    #[error("Render task failed: {0}")]
    Task(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}
