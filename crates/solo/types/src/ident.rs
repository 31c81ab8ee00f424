use crate::error::{SoloError, SoloResult};

/// Longest identifier accepted at the boundary, in characters.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Normalize a caller-supplied catalog identifier for lookup.
///
/// Trims, collapses internal whitespace runs to a single space and lowercases.
/// Empty, overlong or control-character identifiers are malformed and fail
/// with [`SoloError::InvalidArgument`]; whether the result names a known
/// entry is the caller's concern.
pub fn normalize_identifier(raw: &str) -> SoloResult<String> {
    if raw.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(SoloError::invalid(format!(
            "identifier {raw:?} contains control characters"
        )));
    }

    let normalized = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if normalized.is_empty() {
        return Err(SoloError::invalid("identifier must not be empty"));
    }

    if normalized.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(SoloError::invalid(format!(
            "identifier longer than {MAX_IDENTIFIER_LEN} characters"
        )));
    }

    Ok(normalized)
}
