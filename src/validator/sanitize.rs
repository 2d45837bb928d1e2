//! Markup stripping for free-text fields

use super::arg::Arg;
use super::error::ValidatorError;
use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script regex"));
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style>").expect("valid style regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid scheme regex"));
static VBSCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vbscript:").expect("valid scheme regex"));
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bon[a-z0-9_]+\s*=").expect("valid handler regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Result of [`sanitize_input`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub sanitized: String,
    pub was_modified: bool,
}

/// Strip markup, script schemes and inline handlers, then normalize whitespace.
///
/// Never fails on content; only a missing or non-text argument is an error.
pub fn sanitize_input<'a>(input: impl Into<Arg<'a>>) -> Result<Sanitized, ValidatorError> {
    let input = match input.into() {
        Arg::Missing => return Err(ValidatorError::InvalidArgument),
        Arg::Text(text) => text,
        Arg::Date(_) | Arg::Other(_) => return Err(ValidatorError::InvalidType),
    };

    if input.is_empty() {
        return Ok(Sanitized {
            sanitized: String::new(),
            was_modified: false,
        });
    }

    let text = SCRIPT_BLOCK.replace_all(input, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = TAG.replace_all(&text, "");
    let text = JAVASCRIPT_SCHEME.replace_all(&text, "");
    let text = VBSCRIPT_SCHEME.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let sanitized = text.trim().to_string();

    let was_modified = sanitized != input;
    if was_modified {
        tracing::debug!(
            before = input.len(),
            after = sanitized.len(),
            "input sanitized"
        );
    }

    Ok(Sanitized {
        sanitized,
        was_modified,
    })
}
