//! pg-jsonb: `serde` values in PostgreSQL `jsonb` columns.
//!
//! This crate converts any `serde`-serializable type to and from a `jsonb`
//! column value as it travels on the wire, in either of the two formats a
//! server may use for it.
//!
//! # Overview
//!
//! - **Decoding** accepts text and binary column values, validates the
//!   declared type and the binary version marker, and deserializes the
//!   document into the requested type.
//! - **Encoding** serializes a value to compact JSON and produces the
//!   binary layout the server expects for parameters.
//! - **[`JsonbConvertible`]** lets a type be bound and read directly;
//!   string-keyed maps and `serde_json` values conform out of the box.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use pg_jsonb::{ColumnValue, PgType, decode_jsonb, encode_jsonb};
//!
//! let mut doc = HashMap::new();
//! doc.insert("name".to_string(), "a".to_string());
//!
//! // Encode to a binary jsonb parameter
//! let column = encode_jsonb(&doc).unwrap();
//! assert_eq!(column.data().unwrap()[0], 0x01);
//!
//! // Decode back
//! let decoded: HashMap<String, String> = decode_jsonb(&column).unwrap();
//! assert_eq!(decoded, doc);
//!
//! // Text-format result columns carry the bare document
//! let text = ColumnValue::text(PgType::JSONB, br#"{"name":"b"}"#);
//! let decoded: HashMap<String, String> = decode_jsonb(&text).unwrap();
//! assert_eq!(decoded["name"], "b");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Wire-level types (format, type tag, column value)
//! - [`codec`]: jsonb encoding/decoding and version marker handling
//! - [`convert`]: The [`JsonbConvertible`] capability and its conformances
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and size limits
//!
//! # Wire Format
//!
//! - Binary: `0x01` version byte immediately followed by the JSON document
//! - Text: the JSON document alone
//!
//! Encoding always produces the binary layout unless
//! [`EncodeOptions::text`] is requested. Payloads are never trusted: a
//! missing or unknown version byte is reported as an error.

pub mod codec;
pub mod convert;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, EncodeOptions, decode_jsonb, decode_jsonb_nullable, decode_jsonb_with_options,
    encode_jsonb, encode_jsonb_nullable, encode_jsonb_with_options,
};
pub use convert::JsonbConvertible;
pub use error::{DecodeError, EncodeError, ErrorCode};
pub use limits::{JSONB_VERSION, MAX_JSONB_SIZE};
pub use model::{ColumnValue, Oid, PgFormat, PgType};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
