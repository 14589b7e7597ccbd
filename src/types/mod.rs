use thiserror::Error;

mod domain_types;
mod ids;
mod properties;

pub use domain_types::*;
pub use ids::*;
pub use properties::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid Notion reference '{input}': {reason}")]
    InvalidReference { input: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },
}
