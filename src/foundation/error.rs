/// Crate-wide result alias.
pub type BrandpressResult<T> = Result<T, BrandpressError>;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced by catalog loading, asset access, and composition.
pub enum BrandpressError {
    /// Format catalog is malformed or internally inconsistent.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A format could not be composed from its inputs.
    #[error("composition error: {0}")]
    Composition(String),

    /// A logo or font could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other underlying failure, with context preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrandpressError {
    /// Build a [`BrandpressError::Catalog`].
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`BrandpressError::Composition`].
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`BrandpressError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BrandpressError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
