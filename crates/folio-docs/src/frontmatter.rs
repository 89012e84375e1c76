//! Front-matter extraction for content files.
//!
//! A content file may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Setup
//! order: 1
//! ---
//! Body text...
//! ```
//!
//! The opening fence must be the very first thing in the file (after an
//! optional byte order mark). Everything up to the next line starting with
//! `---` is metadata; a single line break after that fence is dropped and the
//! rest is the body. Without a closing fence the whole remainder is metadata
//! and the body is empty.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

const FENCE: &str = "---";
const CLOSE_FENCE: &str = "\n---";

/// Error returned for front-matter that cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The metadata block is not valid YAML for the expected fields.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The opening fence names a language other than YAML (e.g. `---toml`).
    #[error("unsupported front-matter language: {0}")]
    UnsupportedLanguage(String),
}

/// Metadata fields recognized in front-matter.
///
/// Scalar values for `title`, `description` and `date` are accepted in any
/// YAML scalar style (`date: 2024-01-15` stays the string `"2024-01-15"`).
/// Recognized keys with a value of the wrong shape (a list under `title`, a
/// fractional `order`) read as absent instead of failing the file.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "integral_order")]
    pub order: Option<i64>,
    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A content file split into metadata and body.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedContent {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Split a content file into front-matter and body and parse the metadata.
///
/// Files without an opening fence have empty front-matter. Blocks that are
/// empty (or contain only `#` comment lines) parse as empty front-matter.
pub fn parse(raw: &str) -> Result<ParsedContent, FrontMatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(after_open) = raw.strip_prefix(FENCE).filter(|rest| !rest.starts_with('-')) else {
        return Ok(ParsedContent {
            front_matter: FrontMatter::default(),
            body: raw.to_owned(),
        });
    };

    // Text after the opening fence on the same line is a language tag.
    let tag_len = after_open.find('\n').unwrap_or(after_open.len());
    let language = after_open[..tag_len].trim();
    if !matches!(language, "" | "yaml" | "yml") {
        return Err(FrontMatterError::UnsupportedLanguage(language.to_owned()));
    }
    let after_tag = &after_open[tag_len..];

    let (block, body) = match after_tag.find(CLOSE_FENCE) {
        Some(close) => {
            let rest = &after_tag[close + CLOSE_FENCE.len()..];
            let rest = rest.strip_prefix('\r').unwrap_or(rest);
            let rest = rest.strip_prefix('\n').unwrap_or(rest);
            (&after_tag[..close], rest)
        }
        None => (after_tag, ""),
    };

    let front_matter = if is_blank_block(block) {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(block)?
    };

    Ok(ParsedContent {
        front_matter,
        body: body.to_owned(),
    })
}

/// True if a metadata block has nothing but whitespace and comment lines.
fn is_blank_block(block: &str) -> bool {
    block
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

/// Deserialize any YAML scalar into a string; `null` and non-scalars into `None`.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        String(String),
        Int(i64),
        Float(f64),
        Bool(bool),
        Other(IgnoredAny),
    }

    Ok(
        Option::<Scalar>::deserialize(deserializer)?.and_then(|scalar| match scalar {
            Scalar::String(s) => Some(s),
            Scalar::Int(i) => Some(i.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Other(_) => {
                tracing::debug!("Ignoring non-scalar front-matter value");
                None
            }
        }),
    )
}

/// Deserialize an integer, or a float with no fractional part, into `i64`.
///
/// Any other value reads as `None`, which leaves the document at order 0.
fn integral_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Order {
        Int(i64),
        Float(f64),
        Other(IgnoredAny),
    }

    let order = Option::<Order>::deserialize(deserializer)?.and_then(|order| match order {
        Order::Int(i) => Some(i),
        Order::Float(f) => float_to_i64(f),
        Order::Other(_) => None,
    });
    Ok(order)
}

/// Exact `i64` value of an integral float within range.
pub(crate) fn float_to_i64(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; 2^63 is the exclusive bound
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if value.fract() == 0.0 && (-BOUND..BOUND).contains(&value) {
        #[allow(clippy::cast_possible_truncation)]
        let exact = value as i64;
        Some(exact)
    } else {
        tracing::debug!(value, "Ignoring non-integral order");
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_full_front_matter() {
        let raw = "---\ntitle: Setup\ndescription: First steps\ndate: 2024-01-15\norder: 2\n---\n# Setup\n\nBody.";
        let parsed = parse(raw).unwrap();

        assert_eq!(parsed.front_matter.title.as_deref(), Some("Setup"));
        assert_eq!(
            parsed.front_matter.description.as_deref(),
            Some("First steps")
        );
        assert_eq!(parsed.front_matter.date.as_deref(), Some("2024-01-15"));
        assert_eq!(parsed.front_matter.order, Some(2));
        assert!(parsed.front_matter.extra.is_empty());
        assert_eq!(parsed.body, "# Setup\n\nBody.");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let parsed = parse("# Just a heading\n\nText.").unwrap();

        assert_eq!(parsed.front_matter, FrontMatter::default());
        assert_eq!(parsed.body, "# Just a heading\n\nText.");
    }

    #[test]
    fn test_fence_must_start_the_file() {
        let raw = "\n---\ntitle: Late\n---\nBody";
        let parsed = parse(raw).unwrap();

        assert!(parsed.front_matter.title.is_none());
        assert_eq!(parsed.body, raw);
    }

    #[test]
    fn test_four_dashes_is_not_a_fence() {
        let parsed = parse("----\ntitle: X\n----\n").unwrap();

        assert!(parsed.front_matter.title.is_none());
        assert_eq!(parsed.body, "----\ntitle: X\n----\n");
    }

    #[test]
    fn test_empty_block() {
        let parsed = parse("---\n---\nBody").unwrap();

        assert_eq!(parsed.front_matter, FrontMatter::default());
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_comment_only_block() {
        let parsed = parse("---\n# draft, fill in later\n---\nBody").unwrap();

        assert_eq!(parsed.front_matter, FrontMatter::default());
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_unterminated_block_consumes_file() {
        let parsed = parse("---\ntitle: Open\n").unwrap();

        assert_eq!(parsed.front_matter.title.as_deref(), Some("Open"));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();

        assert_eq!(parsed.front_matter.title.as_deref(), Some("Windows"));
        assert_eq!(parsed.body, "Body\r\n");
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let parsed = parse("\u{feff}---\ntitle: Bom\n---\nBody").unwrap();

        assert_eq!(parsed.front_matter.title.as_deref(), Some("Bom"));
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_only_one_newline_after_close_is_dropped() {
        let parsed = parse("---\ntitle: Gap\n---\n\nBody").unwrap();

        assert_eq!(parsed.body, "\nBody");
    }

    #[test]
    fn test_yaml_language_tag() {
        let parsed = parse("---yaml\ntitle: Tagged\n---\nBody").unwrap();

        assert_eq!(parsed.front_matter.title.as_deref(), Some("Tagged"));
    }

    #[test]
    fn test_unsupported_language_tag() {
        let err = parse("---toml\ntitle = \"x\"\n---\n").unwrap_err();

        assert!(matches!(err, FrontMatterError::UnsupportedLanguage(ref l) if l == "toml"));
    }

    #[test]
    fn test_scalar_fields_accept_numbers_and_bools() {
        let parsed = parse("---\ntitle: 2024\ndescription: true\ndate: 1.5\n---\n").unwrap();

        assert_eq!(parsed.front_matter.title.as_deref(), Some("2024"));
        assert_eq!(parsed.front_matter.description.as_deref(), Some("true"));
        assert_eq!(parsed.front_matter.date.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_null_fields_are_none() {
        let parsed = parse("---\ntitle: ~\norder: null\n---\n").unwrap();

        assert!(parsed.front_matter.title.is_none());
        assert!(parsed.front_matter.order.is_none());
    }

    #[test]
    fn test_extra_keys_are_kept() {
        let parsed = parse("---\ntitle: T\ntags:\n  - rust\n  - docs\nauthor: sam\n---\n").unwrap();

        assert_eq!(
            parsed.front_matter.extra.get("tags"),
            Some(&serde_json::json!(["rust", "docs"]))
        );
        assert_eq!(
            parsed.front_matter.extra.get("author"),
            Some(&serde_json::json!("sam"))
        );
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = parse("---\ntitle: [unclosed\n---\nBody").unwrap_err();

        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_integral_float_order() {
        let parsed = parse("---\norder: 3.0\n---\n").unwrap();

        assert_eq!(parsed.front_matter.order, Some(3));
    }

    #[test]
    fn test_mismatched_order_reads_as_absent() {
        for raw in [
            "---\norder: 1.5\n---\n",
            "---\norder: first\n---\n",
            "---\norder: [1]\n---\n",
            "---\norder: .nan\n---\n",
            "---\norder: 1.0e30\n---\n",
        ] {
            assert_eq!(parse(raw).unwrap().front_matter.order, None, "{raw}");
        }
    }

    #[test]
    fn test_non_scalar_fields_read_as_absent() {
        let parsed = parse(
            "---\ntitle:\n  en: Setup\ndescription:\n  - a\ndate: [2024]\norder: 2\n---\nBody",
        )
        .unwrap();

        assert!(parsed.front_matter.title.is_none());
        assert!(parsed.front_matter.description.is_none());
        assert!(parsed.front_matter.date.is_none());
        assert_eq!(parsed.front_matter.order, Some(2));
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_float_to_i64() {
        assert_eq!(float_to_i64(-4.0), Some(-4));
        assert_eq!(float_to_i64(0.5), None);
        assert_eq!(float_to_i64(f64::INFINITY), None);
    }
}
