//! Type conversions for RouterError

use super::types::RouterError;
use crate::core::security::RedactionError;
use crate::core::types::ProviderError;

impl From<ProviderError> for RouterError {
    fn from(err: ProviderError) -> Self {
        RouterError::Provider(err)
    }
}

impl From<url::ParseError> for RouterError {
    fn from(err: url::ParseError) -> Self {
        RouterError::Config(format!("invalid URL: {}", err))
    }
}

impl From<RedactionError> for RouterError {
    fn from(err: RedactionError) -> Self {
        RouterError::Config(err.to_string())
    }
}
