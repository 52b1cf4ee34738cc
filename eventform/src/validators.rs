use email_address::EmailAddress;
use regex::Regex;
use url::Url;

use crate::types::FileKind;

/// Returns `true` if the provided string is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

/// Returns `true` if the provided string parses as a URL with a scheme.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Returns `true` if the value matches the pattern. An empty pattern means no
/// check; a pattern that fails to compile is skipped rather than rejected, so
/// an admin typo never locks customers out of a form.
pub fn matches_pattern(pattern: &str, value: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    Regex::new(pattern).map(|regex| regex.is_match(value)).unwrap_or(true)
}

/// Returns `true` if a file's MIME type falls inside the requested kind.
///
/// The declared content type wins when present; otherwise the type is guessed
/// from the file name extension. An unguessable file only passes `All`.
pub fn mime_matches(kind: FileKind, declared: Option<&str>, file_name: &str) -> bool {
    if kind == FileKind::All {
        return true;
    }
    let mime = match declared.filter(|value| !value.is_empty()) {
        Some(value) => value.to_ascii_lowercase(),
        None => match mime_guess::from_path(file_name).first() {
            Some(guess) => guess.essence_str().to_string(),
            None => return false,
        },
    };
    match kind {
        FileKind::All => true,
        FileKind::Image => mime.starts_with("image/"),
        FileKind::Video => mime.starts_with("video/"),
        FileKind::Audio => mime.starts_with("audio/"),
        FileKind::Document => {
            mime.starts_with("text/")
                || mime == "application/pdf"
                || mime == "application/msword"
                || mime.starts_with("application/vnd.openxmlformats-officedocument")
                || mime.starts_with("application/vnd.ms-")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("test@example.com"));
        assert!(!is_valid_email("invalid"));
    }

    #[test]
    fn url_validation() {
        assert!(is_valid_url("https://example.com"));
        assert!(!is_valid_url("not-a-url"));
    }

    #[test]
    fn pattern_validation_is_lenient_on_bad_patterns() {
        assert!(matches_pattern("^[A-Za-z]+$", "abc"));
        assert!(!matches_pattern("^[A-Za-z]+$", "abc123"));
        assert!(matches_pattern("", "anything"));
        assert!(matches_pattern("([unclosed", "anything"));
    }

    #[test]
    fn mime_kind_matching() {
        assert!(mime_matches(FileKind::All, None, "whatever.bin"));
        assert!(mime_matches(FileKind::Image, Some("image/png"), "photo"));
        assert!(mime_matches(FileKind::Image, None, "photo.jpg"));
        assert!(!mime_matches(FileKind::Image, Some("application/pdf"), "doc.pdf"));
        assert!(mime_matches(FileKind::Document, Some("application/pdf"), "doc.pdf"));
        assert!(!mime_matches(FileKind::Video, None, "mystery"));
    }
}
