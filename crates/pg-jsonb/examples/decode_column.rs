//! Simple inspector for raw jsonb column payloads.
//!
//! Usage: `decode_column <payload-file> [text|binary]`
//!
//! The format defaults to binary when the first byte is the version
//! marker and to text otherwise.

use std::fs;

use pg_jsonb::{ColumnValue, JSONB_VERSION, PgFormat, PgType, decode_jsonb};
use serde_json::Value;

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool({})", b),
        Value::Number(n) => format!("number({})", n),
        Value::String(s) => {
            let preview: String = s.chars().take(40).collect();
            if s.chars().count() > 40 {
                format!("string(\"{}...\")", preview)
            } else {
                format!("string(\"{}\")", preview)
            }
        }
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Object(fields) => format!("object{{{}}}", fields.len()),
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "column.bin".to_string());
    let data = fs::read(&path).expect("Failed to read payload file");

    let format = match args.next().as_deref() {
        Some("text") => PgFormat::Text,
        Some("binary") => PgFormat::Binary,
        Some(other) => panic!("unknown format {other:?}, expected text or binary"),
        None if data.first() == Some(&JSONB_VERSION) => PgFormat::Binary,
        None => PgFormat::Text,
    };

    println!("Reading: {}", path);
    println!("Payload size: {} bytes", data.len());
    println!("Format: {}", format);

    let column = ColumnValue::new(PgType::JSONB, format, Some(data.as_slice().into()));
    let value: Value = match decode_jsonb(&column) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{} ({})", err, err.code().identifier());
            std::process::exit(1);
        }
    };

    println!("\n=== Document ===");
    println!("Root: {}", describe(&value));
    if let Value::Object(fields) = &value {
        for (key, field) in fields.iter().take(20) {
            println!("  {} = {}", key, describe(field));
        }
        if fields.len() > 20 {
            println!("  ... and {} more fields", fields.len() - 20);
        }
    }

    println!("\n=== Pretty ===");
    println!("{}", serde_json::to_string_pretty(&value).expect("Failed to format document"));
}
