//! Name transforms for scaffolded projects.
//!
//! A raw server name is used three ways: verbatim inside the generated
//! source, as a PascalCase type name, and as a lowercase package/directory
//! name. The transforms here cover the latter two.

/// Convert an arbitrary name into a capitalized, delimiter-free identifier.
///
/// Hyphen and underscore are the only characters treated as word
/// boundaries. The policy has two branches:
///
/// - No separator present: the first character is upper-cased and the rest
///   of the string is left untouched, so interior casing survives
///   (`"alreadyPascal"` -> `"AlreadyPascal"`).
/// - At least one separator present: the input is split on runs of `-`/`_`,
///   empty segments are dropped, and each segment is capitalized with its
///   tail lower-cased (`"ALL_CAPS_WORD"` -> `"AllCapsWord"`).
///
/// Characters outside the separator set pass through verbatim; case
/// mapping of a non-alphabetic character is a no-op. The function is total:
/// absent or empty input yields an empty string, and it never fails.
pub fn normalize_identifier(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };
    if input.is_empty() {
        return String::new();
    }

    if !input.contains(['-', '_']) {
        return capitalize_first(input);
    }

    input
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize_segment)
        .collect()
}

/// Upper-case the first character, keep the tail as-is.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character, lower-case the tail.
fn capitalize_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Derive the canonical package/directory name from a raw server name.
///
/// Single policy for both the project directory and the manifest `name`
/// and `bin` fields: lowercase, underscores and whitespace become hyphens,
/// anything outside `[a-z0-9-]` is stripped, hyphen runs collapse, and
/// leading/trailing hyphens are trimmed. May return an empty string; the
/// caller decides whether that is acceptable.
pub fn sanitize_package_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.to_lowercase().chars() {
        let mapped = if ch == '_' || ch.is_whitespace() {
            Some('-')
        } else if ch.is_ascii_alphanumeric() || ch == '-' {
            Some(ch)
        } else {
            None
        };
        if let Some(c) = mapped {
            if c == '-' && out.ends_with('-') {
                continue;
            }
            out.push(c);
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier_table() {
        let cases = [
            ("google-docs-mcp", "GoogleDocsMcp"),
            ("my_server_name", "MyServerName"),
            ("simple", "Simple"),
            ("alreadyPascal", "AlreadyPascal"),
            ("with-number-123", "WithNumber123"),
            ("special_chars!@#", "SpecialChars!@#"),
            ("-leading-hyphen", "LeadingHyphen"),
            ("trailing-hyphen-", "TrailingHyphen"),
            ("double--hyphen", "DoubleHyphen"),
            ("ALL_CAPS_WORD", "AllCapsWord"),
            ("kebab-case-example", "KebabCaseExample"),
            ("snake_case_example", "SnakeCaseExample"),
            ("mixed_Case-example", "MixedCaseExample"),
            ("", ""),
            ("a", "A"),
            ("_a", "A"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                normalize_identifier(Some(input)),
                expected,
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_normalize_identifier_absent_input() {
        assert_eq!(normalize_identifier(None), "");
    }

    #[test]
    fn test_normalize_identifier_separator_only_input() {
        assert_eq!(normalize_identifier(Some("---")), "");
        assert_eq!(normalize_identifier(Some("_-_")), "");
    }

    #[test]
    fn test_normalize_identifier_mixed_separators_split_identically() {
        assert_eq!(normalize_identifier(Some("a-b_c")), "ABC");
        assert_eq!(normalize_identifier(Some("foo_-bar")), "FooBar");
    }

    #[test]
    fn test_normalize_identifier_consumes_all_separators() {
        for input in ["a-b", "a_b", "-a-", "__x__y__", "no-seps_here"] {
            let out = normalize_identifier(Some(input));
            assert!(!out.contains('-'), "output {out:?} for {input:?}");
            assert!(!out.contains('_'), "output {out:?} for {input:?}");
        }
    }

    #[test]
    fn test_normalize_identifier_preserves_length_without_separators() {
        for input in ["simple", "alreadyPascal", "x9!?", "HTTPServer"] {
            let out = normalize_identifier(Some(input));
            assert_eq!(out.chars().count(), input.chars().count());
        }
    }

    #[test]
    fn test_sanitize_package_name() {
        assert_eq!(sanitize_package_name("Google Docs MCP"), "google-docs-mcp");
        assert_eq!(sanitize_package_name("my_server_name"), "my-server-name");
        assert_eq!(sanitize_package_name("special_chars!@#"), "special-chars");
        assert_eq!(sanitize_package_name("--Weird--Name--"), "weird-name");
        assert_eq!(sanitize_package_name("v1.2.3"), "v123");
        assert_eq!(sanitize_package_name("!!!"), "");
    }
}
