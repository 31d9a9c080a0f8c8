//! Validation and scheme normalization for submitted destination URLs.
//!
//! Destinations are stored as submitted, apart from surrounding whitespace and a
//! default `http://` prefix when no scheme is given. The `url` crate is used to
//! validate the result, not to rewrite it, so `http://example.com` stays
//! `http://example.com` rather than gaining a trailing slash. Non-ASCII input is
//! the exception: it is stored in the parser's serialized form (punycode host,
//! percent-encoded path) so it can be sent in a `Location` header.

use url::{Host, Url};

/// Scheme prepended to inputs that do not carry one.
pub const DEFAULT_SCHEME: &str = "http";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(#[source] url::ParseError),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no valid host: {0}")]
    InvalidHost(String),

    #[error("URL must not contain whitespace")]
    Whitespace,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Validates `input` and returns the destination to persist.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed; inner whitespace and control
///    characters are rejected
/// 2. Inputs that do not start with `scheme://` get the [`DEFAULT_SCHEME`] prepended
/// 3. Only HTTP and HTTPS are allowed
/// 4. The host must be an IP address, `localhost`, or a dotted domain name
/// 5. Non-ASCII input is stored in its serialized ASCII form
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for blank input,
/// [`UrlNormalizationError::Parse`] when the URL parser rejects the input and
/// one of the remaining variants when it parses but is not a usable web URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("example.org/path").unwrap(),
///     "http://example.org/path"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(UrlNormalizationError::Whitespace);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(UrlNormalizationError::ControlCharacter);
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(UrlNormalizationError::Parse)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
        Some(Host::Domain(domain)) if is_plausible_domain(domain) => {}
        _ => return Err(UrlNormalizationError::InvalidHost(candidate)),
    }

    if candidate.is_ascii() {
        Ok(candidate)
    } else {
        Ok(url.into())
    }
}

/// True if `input` starts with `scheme://`, where the scheme is
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_plausible_domain(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_http_url_as_is() {
        assert_eq!(
            normalize_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_normalize_keeps_https_url_as_is() {
        assert_eq!(
            normalize_url("https://example.com/a?b=c#d").unwrap(),
            "https://example.com/a?b=c#d"
        );
    }

    #[test]
    fn test_normalize_adds_default_scheme() {
        assert_eq!(
            normalize_url("example.org/path").unwrap(),
            "http://example.org/path"
        );
    }

    #[test]
    fn test_normalize_adds_scheme_when_query_contains_url() {
        assert_eq!(
            normalize_url("example.com/r?to=https://x.com").unwrap(),
            "http://example.com/r?to=https://x.com"
        );
    }

    #[test]
    fn test_normalize_keeps_uppercase_scheme() {
        assert_eq!(
            normalize_url("HTTPS://example.com/").unwrap(),
            "HTTPS://example.com/"
        );
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("svn+ssh://example.com"));
        assert!(!has_scheme("example.com/r?to=https://x.com"));
        assert!(!has_scheme("://example.com"));
        assert!(!has_scheme("1http://example.com"));
        assert!(!has_scheme("example.com"));
    }

    #[test]
    fn test_normalize_control_characters() {
        for input in ["http://example.com/a\u{1}b", "http://example.com/\u{7f}"] {
            assert!(matches!(
                normalize_url(input),
                Err(UrlNormalizationError::ControlCharacter)
            ));
        }
    }

    #[test]
    fn test_normalize_non_ascii_is_serialized() {
        let destination = normalize_url("http://bücher.example/straße").unwrap();

        assert!(destination.is_ascii());
        assert_eq!(destination, "http://xn--bcher-kva.example/stra%C3%9Fe");
    }

    #[test]
    fn test_normalize_adds_scheme_to_host_with_port() {
        assert_eq!(
            normalize_url("localhost:8080/x").unwrap(),
            "http://localhost:8080/x"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize_url("  https://example.com/  ").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_normalize_ip_address() {
        assert_eq!(
            normalize_url("http://192.168.1.1:8080/api").unwrap(),
            "http://192.168.1.1:8080/api"
        );
    }

    #[test]
    fn test_normalize_empty_string() {
        assert!(matches!(
            normalize_url(""),
            Err(UrlNormalizationError::Empty)
        ));
        assert!(matches!(
            normalize_url("   "),
            Err(UrlNormalizationError::Empty)
        ));
    }

    #[test]
    fn test_normalize_inner_whitespace() {
        assert!(matches!(
            normalize_url("not a valid url"),
            Err(UrlNormalizationError::Whitespace)
        ));
    }

    #[test]
    fn test_normalize_ftp_protocol() {
        assert!(matches!(
            normalize_url("ftp://example.com/file.txt"),
            Err(UrlNormalizationError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_normalize_javascript_protocol_gets_no_host() {
        assert!(normalize_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_normalize_single_label_host() {
        assert!(matches!(
            normalize_url("intranet/page"),
            Err(UrlNormalizationError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_normalize_empty_label_host() {
        assert!(normalize_url("http://example..com").is_err());
    }

    #[test]
    fn test_normalize_unparseable_port() {
        assert!(matches!(
            normalize_url("http://example.com:99999"),
            Err(UrlNormalizationError::Parse(_))
        ));
    }

    #[test]
    fn test_normalize_missing_host() {
        assert!(matches!(
            normalize_url("http://"),
            Err(UrlNormalizationError::Parse(_))
        ));
    }
}
