use std::fmt;

use url::Url;

/// Why a typed URL was rejected. `Display` output fits on one status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    Empty,
    UnsupportedScheme(String),
    MissingHost,
    Malformed,
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::Empty => write!(f, "No URL entered"),
            UrlError::UnsupportedScheme(scheme) => {
                let scheme: String = scheme.chars().take(12).collect();
                write!(f, "Unsupported scheme {scheme}")
            }
            UrlError::MissingHost | UrlError::Malformed => write!(f, "Invalid URL format"),
        }
    }
}

/// Turns user input into a fetchable http(s) URL.
///
/// Input without a scheme gets `http://` prepended. The returned string is
/// the candidate as typed (plus the prefix), not the parser's normalized form,
/// so `example.com` becomes `http://example.com`.
pub fn validate_url(input: &str) -> Result<String, UrlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let candidate = match explicit_scheme(input) {
        Some(scheme) if is_web_scheme(scheme) => input.to_string(),
        Some(scheme) => return Err(UrlError::UnsupportedScheme(scheme.to_ascii_lowercase())),
        None => format!("http://{input}"),
    };

    let parsed = Url::parse(&candidate).map_err(|_| UrlError::Malformed)?;
    if !is_web_scheme(parsed.scheme()) {
        return Err(UrlError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(candidate),
        _ => Err(UrlError::MissingHost),
    }
}

/// Resolves a feed or link target against the page it came from.
pub fn resolve_target(base: &str, target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(target) {
        return Some(url.into());
    }
    Url::parse(base)
        .and_then(|base| base.join(target))
        .ok()
        .map(Into::into)
}

fn is_web_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

/// Returns the scheme if `input` starts with one.
///
/// `host:port` forms (`localhost:8080`, `example.com:81/x`) are not schemes.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (head, rest) = input.split_once(':')?;
    let mut chars = head.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let scheme_chars = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !starts_alpha || !scheme_chars {
        return None;
    }
    if rest.starts_with("//") {
        return Some(head);
    }
    if head.contains('.') || rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(head)
}
