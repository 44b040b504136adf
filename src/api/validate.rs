use regex::Regex;
use std::sync::OnceLock;

use super::error::{ApiError, ApiResult, IdField};

pub const MAX_IDENTIFIER_LEN: usize = 64;

pub trait IdentifierValidator: Send + Sync {
    fn is_valid(&self, identifier: &str) -> bool;
}

/// Accepts SKUs, category ids like `abcat0101000` and context tokens:
/// ASCII alphanumerics plus `.`, `_`, `:` and `-`, starting alphanumeric.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParamValidator;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._:-]*$").unwrap())
}

impl IdentifierValidator for RequestParamValidator {
    fn is_valid(&self, identifier: &str) -> bool {
        !identifier.is_empty()
            && identifier.len() <= MAX_IDENTIFIER_LEN
            && identifier_pattern().is_match(identifier)
    }
}

/// Fails with `InvalidIdentifier` unless `validator` accepts `identifier`.
pub fn require_valid(validator: &dyn IdentifierValidator, field: IdField, identifier: &str) -> ApiResult<()> {
    if validator.is_valid(identifier) {
        Ok(())
    } else {
        Err(ApiError::InvalidIdentifier {
            field,
            value: identifier.to_string(),
        })
    }
}
