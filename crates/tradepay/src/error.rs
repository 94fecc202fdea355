//! Errors

use thiserror::Error;

/// Tradepay Error
#[derive(Debug, Error)]
pub enum Error {
    /// Amount error
    #[error(transparent)]
    Amount(#[from] crate::amount::Error),
    /// Fee error
    #[error(transparent)]
    Fee(#[from] crate::fees::Error),
    /// Flow error
    #[error(transparent)]
    Flow(#[from] crate::flow::Error),
    /// Form error
    #[error(transparent)]
    Form(#[from] crate::form::Error),
    /// Supporting document error
    #[error(transparent)]
    Document(#[from] crate::form::documents::Error),
    /// Settings error
    #[error(transparent)]
    Settings(#[from] crate::settings::Error),
    /// Field id error
    #[error(transparent)]
    Field(#[from] crate::validation::Error),
    /// Stage error
    #[error(transparent)]
    Stage(#[from] crate::stage::Error),
    /// Stage storage error
    #[error(transparent)]
    Storage(#[from] crate::stage::storage::Error),
    /// Review scenario error
    #[error(transparent)]
    Review(#[from] crate::review::Error),
    /// Serde error
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
