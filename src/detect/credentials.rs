//! Detection of hardcoded credentials.
//!
//! Each pattern requires an assignment whose right-hand side is a quoted
//! literal, and is matched case-insensitively against the whole file.
//!
//! # Caveats
//!
//! - Matches inside comments and strings are reported like any other.
//! - Object-literal syntax (`password: "x"`) is not an assignment and is not
//!   reported.
//! - `token` also matches longer names ending in it, such as `accessToken`.

use lazy_static::lazy_static;
use regex::Regex;

use super::{CredentialFinding, CredentialKind};

lazy_static! {
    static ref CREDENTIAL_PATTERNS: Vec<(CredentialKind, Regex)> = vec![
        (
            CredentialKind::Password,
            Regex::new(r#"(?i)password\s*=\s*['"][^'"]+['"]"#).unwrap(),
        ),
        (
            CredentialKind::ApiKey,
            Regex::new(r#"(?i)api[_-]?key\s*=\s*['"][^'"]+['"]"#).unwrap(),
        ),
        (
            CredentialKind::Token,
            Regex::new(r#"(?i)token\s*=\s*['"][^'"]+['"]"#).unwrap(),
        ),
    ];
}

/// Credential kinds present anywhere in `content`.
pub fn find_credentials(content: &str) -> Vec<CredentialKind> {
    CREDENTIAL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(content))
        .map(|(kind, _)| *kind)
        .collect()
}

/// At most one finding per file, listing every matched kind.
pub fn detect_credentials(path: &str, content: &str) -> Option<CredentialFinding> {
    let kinds = find_credentials(content);
    if kinds.is_empty() {
        return None;
    }
    Some(CredentialFinding {
        path: path.to_string(),
        kinds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_literal() {
        let finding = detect_credentials("login.ts", "const password = \"abc123\";\n").unwrap();
        assert_eq!(finding.path, "login.ts");
        assert_eq!(finding.kinds, vec![CredentialKind::Password]);
    }

    #[test]
    fn test_no_literal_assignment() {
        let content = "const password = process.env.PASSWORD;\nconst token = getToken();\n";
        assert!(detect_credentials("login.ts", content).is_none());
    }

    #[test]
    fn test_case_insensitive_and_key_spellings() {
        assert_eq!(find_credentials("const API_KEY = 'k-1'"), vec![CredentialKind::ApiKey]);
        assert_eq!(find_credentials("let apiKey='k-2'"), vec![CredentialKind::ApiKey]);
        assert_eq!(find_credentials("var api-key = \"k\""), vec![CredentialKind::ApiKey]);
        assert_eq!(find_credentials("Password=\"x\""), vec![CredentialKind::Password]);
    }

    #[test]
    fn test_multiple_kinds_single_finding() {
        let content = "const password = 'a';\nconst authToken = 'b';\n";
        let finding = detect_credentials("setup.ts", content).unwrap();
        assert_eq!(finding.kinds, vec![CredentialKind::Password, CredentialKind::Token]);
    }

    #[test]
    fn test_empty_literal_not_flagged() {
        assert!(find_credentials("const password = ''").is_empty());
    }

    #[test]
    fn test_object_literal_not_flagged() {
        assert!(find_credentials("login({ password: 'secret' })").is_empty());
    }
}
