//! HTTP Basic credential parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Email and password carried by a Basic `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Parse an `Authorization` header value of the form `Basic base64(email:password)`.
///
/// The scheme is matched case-insensitively. The password is everything
/// after the first colon, so it may itself contain colons.
pub fn parse_basic_credentials(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_parse_valid() {
        let creds = parse_basic_credentials(&header("bob@dylan.com:toto1234!")).unwrap();
        assert_eq!(creds.email, "bob@dylan.com");
        assert_eq!(creds.password, "toto1234!");
    }

    #[test]
    fn test_password_with_colon() {
        let creds = parse_basic_credentials(&header("a@b.c:x:y")).unwrap();
        assert_eq!(creds.password, "x:y");
    }

    #[test]
    fn test_scheme_case_insensitive() {
        let value = format!("basic {}", STANDARD.encode("a@b.c:pw"));
        assert!(parse_basic_credentials(&value).is_some());
    }

    #[test]
    fn test_rejects_other_schemes_and_garbage() {
        assert!(parse_basic_credentials("Bearer abc").is_none());
        assert!(parse_basic_credentials("Basic").is_none());
        assert!(parse_basic_credentials("Basic !!!notbase64").is_none());
        assert!(parse_basic_credentials(&header("no-colon")).is_none());
    }
}
