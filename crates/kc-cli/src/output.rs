//! Output formatting utilities.

use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Outputs a list in the specified format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
pub fn output<T: Tabled + serde::Serialize>(
    data: &[T],
    format: OutputFormat,
) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                info("No results found.");
            } else {
                let table = Table::new(data).with(Style::rounded()).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            for item in data {
                let json = serde_json::to_value(item)?;
                print!("{}", render_yaml(&json, 0));
                println!();
            }
        }
    }
    Ok(())
}

/// Outputs a single item.
///
/// # Errors
///
/// Returns an error if the item cannot be serialized.
pub fn output_single<T: serde::Serialize>(item: &T, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Yaml => {
            let json = serde_json::to_value(item)?;
            print!("{}", render_yaml(&json, 0));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Renders a JSON value as YAML-like text.
fn render_yaml(value: &serde_json::Value, indent: usize) -> String {
    use serde_json::Value;

    let prefix = "  ".repeat(indent);
    let mut out = String::new();

    match value {
        Value::Array(arr) if arr.is_empty() => out.push_str(&format!("{prefix}[]\n")),
        Value::Object(map) if map.is_empty() => out.push_str(&format!("{prefix}{{}}\n")),
        Value::Array(arr) => {
            for item in arr {
                if is_scalar(item) {
                    out.push_str(&format!("{prefix}- {}\n", scalar(item)));
                } else {
                    out.push_str(&format!("{prefix}-\n"));
                    out.push_str(&render_yaml(item, indent + 1));
                }
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                if is_scalar(val) {
                    out.push_str(&format!("{prefix}{key}: {}\n", scalar(val)));
                } else {
                    out.push_str(&format!("{prefix}{key}:\n"));
                    out.push_str(&render_yaml(val, indent + 1));
                }
            }
        }
        _ => out.push_str(&format!("{prefix}{}\n", scalar(value))),
    }

    out
}

fn is_scalar(value: &serde_json::Value) -> bool {
    !(value.is_object() || value.is_array())
        || value.as_array().is_some_and(Vec::is_empty)
        || value.as_object().is_some_and(serde_json::Map::is_empty)
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(_) => "[]".to_string(),
        serde_json::Value::Object(_) => "{}".to_string(),
        other => other.to_string(),
    }
}
