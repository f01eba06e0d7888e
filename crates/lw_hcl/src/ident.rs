//! HCL identifier rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{HclError, HclResult};

static IDENTIFIER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").ok());

/// Returns `true` if `s` can be used as a bare HCL identifier.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(s))
}

pub(crate) fn validate_identifier(s: &str) -> HclResult<()> {
    if is_identifier(s) {
        Ok(())
    } else {
        Err(HclError::InvalidIdentifier(s.to_string()))
    }
}
