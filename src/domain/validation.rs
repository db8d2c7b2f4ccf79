//! Input validation shared by the storage adapters and the inline editors.
//!
//! Every rule here runs before any I/O, so the editors can show the message
//! inline without a round trip.

use super::error::{ReqError, Result};

/// Maximum length of a collection or endpoint name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Validates and normalizes a resource name.
///
/// Returns the trimmed name.
///
/// # Errors
///
/// [`ReqError::InvalidInput`] when the trimmed name is empty or longer than
/// [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ReqError::invalid("name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ReqError::invalid(format!(
            "name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates a storage identifier.
///
/// # Errors
///
/// [`ReqError::InvalidInput`] when `id` is not positive.
pub fn validate_id(id: i64) -> Result<i64> {
    if id <= 0 {
        return Err(ReqError::invalid(format!("invalid id: {id}")));
    }
    Ok(id)
}

/// Validates a request URL. An empty string is accepted and means "not set yet".
///
/// # Errors
///
/// [`ReqError::InvalidInput`] when the URL does not parse or is not `http`/`https`.
pub fn validate_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| ReqError::invalid(format!("invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ReqError::invalid(format!("unsupported URL scheme: {other}"))),
    }
}

/// Parses a `Name: value` header line.
///
/// # Errors
///
/// [`ReqError::InvalidInput`] when there is no colon or the name is empty or
/// contains whitespace.
pub fn parse_header_line(line: &str) -> Result<(String, String)> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ReqError::invalid("header must look like `Name: value`"))?;
    let name = name.trim();
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ReqError::invalid("header name must be a single token"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Alpha ").unwrap(), "Alpha");
    }

    #[test]
    fn empty_and_blank_names_are_rejected() {
        assert!(validate_name("").unwrap_err().is_invalid_input());
        assert!(validate_name("   ").unwrap_err().is_invalid_input());
    }

    #[test]
    fn name_length_bound_counts_characters() {
        let exact: String = "é".repeat(MAX_NAME_LEN);
        assert!(validate_name(&exact).is_ok());

        let over: String = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name(&over).unwrap_err().is_invalid_input());
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(validate_id(1).is_ok());
        assert!(validate_id(0).is_err());
        assert!(validate_id(-5).is_err());
    }

    #[test]
    fn urls() {
        assert_eq!(validate_url("").unwrap(), "");
        assert!(validate_url("https://example.com/a?b=c").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn header_lines() {
        assert_eq!(
            parse_header_line("Content-Type: application/json").unwrap(),
            ("Content-Type".to_string(), "application/json".to_string())
        );
        assert!(parse_header_line("no colon").is_err());
        assert!(parse_header_line("Bad Name: x").is_err());
    }
}
