use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Text => {
            let mut out = String::new();
            render_text(&serde_json::to_value(value)?, 0, &mut out);
            Ok(out.trim_end().to_string())
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Indented `key: value` lines; nested objects and lists open a new level.
fn render_text(value: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) if map.is_empty() => {
            let _ = writeln!(out, "{indent}(empty)");
        }
        Value::Object(map) => {
            for (key, value) in map {
                if is_scalar(value) {
                    let _ = writeln!(out, "{indent}{key}: {}", scalar_to_text(value));
                } else {
                    let _ = writeln!(out, "{indent}{key}:");
                    render_text(value, depth + 1, out);
                }
            }
        }
        Value::Array(items) if items.is_empty() => {
            let _ = writeln!(out, "{indent}(none)");
        }
        Value::Array(items) => {
            for item in items {
                if is_scalar(item) {
                    let _ = writeln!(out, "{indent}- {}", scalar_to_text(item));
                } else {
                    let _ = writeln!(out, "{indent}-");
                    render_text(item, depth + 1, out);
                }
            }
        }
        scalar => {
            let _ = writeln!(out, "{indent}{}", scalar_to_text(scalar));
        }
    }
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => if *v { "yes" } else { "no" }.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        field: &'static str,
        plain: bool,
        changed: Vec<&'static str>,
        last_updated: Option<String>,
    }

    fn example() -> Example {
        Example {
            field: "reads",
            plain: true,
            changed: vec!["citations", "reads"],
            last_updated: None,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&example(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["field"], "reads");
        assert_eq!(parsed["changed"][1], "reads");
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&example(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn text_render_nests_lists() {
        let out = render(&example(), OutputFormat::Text).expect("text render should work");
        assert!(out.contains("changed:\n  - citations\n  - reads"));
        assert!(out.contains("field: reads"));
        assert!(out.contains("plain: yes"));
        assert!(out.contains("last_updated: -"));
    }

    #[test]
    fn text_render_marks_empty_lists() {
        let out = render(&Vec::<String>::new(), OutputFormat::Text).expect("render");
        assert_eq!(out, "(none)");
    }
}
