//! Response cleanup and validation
//!
//! Model output arrives as markdown-flavored text with known failure modes:
//! code fences around the script and invented attribute types the target
//! library does not have. Cleanup is deterministic; anything cleanup cannot
//! repair is rejected before the file is written.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Attribute types the model invents that the target library lacks. All of
/// them hold stringly data, so FILE is the lossless substitute.
const UNSUPPORTED_TYPES: [&str; 5] = [
    "AttributeType.COLLECTION",
    "AttributeType.STRING",
    "AttributeType.LIST",
    "AttributeType.BOOL",
    "AttributeType.DICT",
];

/// Strip a leading ```` ```python ```` (or bare ```` ``` ````) fence and a
/// trailing ```` ``` ```` fence, then trim.
pub fn strip_markdown_fences(text: &str) -> String {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```python") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim().to_string()
}

/// Rewrite every unsupported attribute type to `AttributeType.FILE`.
pub fn coerce_attribute_types(code: String) -> String {
    UNSUPPORTED_TYPES
        .iter()
        .fold(code, |code, unsupported| {
            code.replace(unsupported, "AttributeType.FILE")
        })
}

fn attribute_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"AttributeType\.([A-Z_]+)").unwrap())
}

/// Reject output that cleanup could not bring to a usable state.
///
/// # Errors
/// [`Error::ExternalService`] when the text is empty, still fenced, names
/// an attribute type other than NUMERIC or FILE, has unbalanced brackets,
/// or never touches the provenance API at all.
pub fn validate_instrumented(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(unusable("empty response"));
    }
    if code.contains("```") {
        return Err(unusable("markdown fences left in output"));
    }
    for capture in attribute_type_pattern().captures_iter(code) {
        let name = &capture[1];
        if name != "NUMERIC" && name != "FILE" {
            return Err(unusable(&format!(
                "unsupported attribute type AttributeType.{name}"
            )));
        }
    }
    if let Some(unbalanced) = first_unbalanced_bracket(code) {
        return Err(unusable(&format!("unbalanced '{unbalanced}'")));
    }
    let touches_api = ["Task(", "Transformation(", "Dataflow("]
        .iter()
        .any(|marker| code.contains(marker));
    if !touches_api {
        return Err(unusable("no provenance API calls in output"));
    }
    Ok(())
}

fn unusable(detail: &str) -> Error {
    Error::ExternalService(format!("model returned unusable content: {detail}"))
}

/// Cheap structural check. String literals are not tracked, so this only
/// flags gross truncation, which is the observed failure mode.
fn first_unbalanced_bracket(code: &str) -> Option<char> {
    let mut stack = Vec::new();
    for c in code.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Some(c);
                }
            }
            _ => {}
        }
    }
    stack.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_python_fence() {
        let raw = "```python\nx = 1\n```";
        assert_eq!(strip_markdown_fences(raw), "x = 1");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "```\nx = 1\n```";
        assert_eq!(strip_markdown_fences(raw), "x = 1");
    }

    #[test]
    fn test_unfenced_text_unchanged() {
        assert_eq!(strip_markdown_fences("x = 1\n"), "x = 1");
    }

    #[test]
    fn test_coerce_all_unsupported_types() {
        let code = concat!(
            "a = Attribute('cols', AttributeType.LIST)\n",
            "b = Attribute('name', AttributeType.STRING)\n",
            "c = Attribute('flag', AttributeType.BOOL)\n",
            "d = Attribute('map', AttributeType.DICT)\n",
            "e = Attribute('rows', AttributeType.COLLECTION)\n",
            "f = Attribute('n', AttributeType.NUMERIC)\n",
        )
        .to_string();
        let patched = coerce_attribute_types(code);
        assert_eq!(patched.matches("AttributeType.FILE").count(), 5);
        assert_eq!(patched.matches("AttributeType.NUMERIC").count(), 1);
    }

    #[test]
    fn test_validate_accepts_clean_output() {
        let code = "t1 = Task(1, tag, 'extract')\nt1.begin()\nt1.end()";
        assert!(validate_instrumented(code).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_instrumented("   \n").is_err());
    }

    #[test]
    fn test_validate_rejects_leftover_fence() {
        assert!(validate_instrumented("```python\nt = Task(1)\n```").is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_attribute_type() {
        let code = "a = Attribute('x', AttributeType.TUPLE)\nt = Task(1)";
        assert!(validate_instrumented(code).is_err());
    }

    #[test]
    fn test_validate_rejects_truncation() {
        let code = "t = Task(1, tag, 'extract'\nt.begin()";
        assert!(validate_instrumented(code).is_err());
    }

    #[test]
    fn test_validate_rejects_uninstrumented_output() {
        assert!(validate_instrumented("x = 1 + 2").is_err());
    }
}
