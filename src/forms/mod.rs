//! Form payloads backing the create and edit views.

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid product id")]
    InvalidProductId,
}
