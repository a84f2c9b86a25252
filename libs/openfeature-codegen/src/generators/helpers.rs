//! Case conversion and quoting helpers shared by every generator

use super::functions::FunctionRegistry;
use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use serde_json::Value;
use std::borrow::Cow;

/// Functions registered for every generator. Generator-specific entries
/// with the same name take precedence.
pub fn common_functions() -> FunctionRegistry {
    FunctionRegistry::new()
        .with("ToPascal", |v| text_fn(v, |s| s.to_upper_camel_case()))
        .with("ToCamel", |v| text_fn(v, |s| s.to_lower_camel_case()))
        .with("ToSnake", |v| text_fn(v, |s| s.to_snake_case()))
        .with("ToScreamingSnake", |v| text_fn(v, |s| s.to_shouty_snake_case()))
        .with("ToKebab", |v| text_fn(v, |s| s.to_kebab_case()))
        .with("ToUpper", |v| text_fn(v, str::to_uppercase))
        .with("ToLower", |v| text_fn(v, str::to_lowercase))
        .with("Quote", |v| Value::String(quote(&as_text(v))))
        .with("QuoteString", |v| Value::String(quote_string(v)))
        .with("ToDocComment", |v| Value::String(doc_comment(&as_text(v))))
}

/// Text of a value: strings as-is, everything else as its JSON form
fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn text_fn(value: &Value, convert: impl Fn(&str) -> String) -> Value {
    Value::String(convert(&as_text(value)))
}

/// Double-quoted, escaped string literal
pub fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// Quote strings, leave every other value as a bare literal
pub fn quote_string(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        other => other.to_string(),
    }
}

/// Body text safe to place after a ` * ` line prefix inside a `/** */` block.
///
/// `*/` is broken up so the comment cannot close early, and every line after
/// the first gets its own ` * ` prefix.
pub fn doc_comment(text: &str) -> String {
    let escaped = text.replace("*/", "*\\/");
    let mut lines = escaped.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        if line.is_empty() {
            out.push_str("\n *");
        } else {
            out.push_str("\n * ");
            out.push_str(line);
        }
    }
    out
}
