//! Conversion between typed values and jsonb column values.
//!
//! Decoding accepts both wire formats:
//! - Text: the payload is the bare JSON document
//! - Binary: `JSONB_VERSION` followed by the JSON document
//!
//! Encoding produces the binary layout unless asked otherwise.

use std::any::type_name;
use std::borrow::Cow;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::version::{strip_version, versioned_buffer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_JSONB_SIZE;
use crate::model::{ColumnValue, PgFormat, PgType};

/// Initial buffer size for serialized documents.
const INITIAL_CAPACITY: usize = 128;

// =============================================================================
// DECODING
// =============================================================================

/// Options for decoding jsonb column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest document accepted, in bytes, not counting the version marker.
    pub max_document_len: usize,
    /// Also accept columns declared as plain `json`.
    ///
    /// A `json` column carries the bare document in both formats; there is
    /// no version marker to strip.
    pub accept_json: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_document_len: MAX_JSONB_SIZE,
            accept_json: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options (jsonb only, server size limit).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest accepted document size.
    pub fn with_max_document_len(mut self, max: usize) -> Self {
        self.max_document_len = max;
        self
    }

    /// Accepts plain `json` columns in addition to `jsonb`.
    pub fn accept_json(mut self) -> Self {
        self.accept_json = true;
        self
    }
}

/// Decodes a jsonb column value into `T`.
///
/// Fails with [`DecodeError::NullValue`] on NULL; use
/// [`decode_jsonb_nullable`] when NULL is an expected value.
pub fn decode_jsonb<T: DeserializeOwned>(value: &ColumnValue<'_>) -> Result<T, DecodeError> {
    decode_jsonb_with_options(value, DecodeOptions::default())
}

/// Decodes a jsonb column value into `T` with the given options.
pub fn decode_jsonb_with_options<T: DeserializeOwned>(
    value: &ColumnValue<'_>,
    options: DecodeOptions,
) -> Result<T, DecodeError> {
    let target = type_name::<T>();
    let Some(payload) = value.data() else {
        return Err(DecodeError::NullValue { target });
    };

    let document = document_bytes(value.ty(), value.format(), payload, options, target)
        .inspect_err(|err| {
            tracing::debug!(
                ty = %value.ty(),
                format = %value.format(),
                len = payload.len(),
                error = %err,
                "rejected jsonb column"
            );
        })?;

    tracing::trace!(
        ty = %value.ty(),
        format = %value.format(),
        len = document.len(),
        target_type = target,
        "decoding jsonb"
    );
    serde_json::from_slice(document).map_err(|source| DecodeError::Json { target, source })
}

/// Decodes a jsonb column value, mapping NULL and a `null` document to `None`.
pub fn decode_jsonb_nullable<T: DeserializeOwned>(
    value: &ColumnValue<'_>,
) -> Result<Option<T>, DecodeError> {
    if value.is_null() {
        return Ok(None);
    }
    decode_jsonb::<Option<T>>(value)
}

/// Returns the JSON document inside a payload, validating type, marker and size.
fn document_bytes<'p>(
    ty: PgType,
    format: PgFormat,
    payload: &'p [u8],
    options: DecodeOptions,
    target: &'static str,
) -> Result<&'p [u8], DecodeError> {
    let document = match (ty, format) {
        (PgType::JSONB, PgFormat::Text) => payload,
        (PgType::JSONB, PgFormat::Binary) => strip_version(payload)?,
        (PgType::JSON, _) if options.accept_json => payload,
        (found, _) => return Err(DecodeError::UnsupportedColumnType { found, target }),
    };

    if document.len() > options.max_document_len {
        return Err(DecodeError::LengthExceedsLimit {
            len: document.len(),
            max: options.max_document_len,
        });
    }
    Ok(document)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Options for encoding jsonb column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Wire format of the produced value.
    ///
    /// Binary prefixes the document with `JSONB_VERSION`; text emits the
    /// bare document.
    pub format: PgFormat,
    /// Largest document produced, in bytes, not counting the version marker.
    pub max_document_len: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: PgFormat::Binary,
            max_document_len: MAX_JSONB_SIZE,
        }
    }
}

impl EncodeOptions {
    /// Creates default (binary) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options producing the binary layout.
    pub fn binary() -> Self {
        Self::default()
    }

    /// Creates options producing a bare text-format document.
    pub fn text() -> Self {
        Self {
            format: PgFormat::Text,
            ..Self::default()
        }
    }

    /// Sets the largest produced document size.
    pub fn with_max_document_len(mut self, max: usize) -> Self {
        self.max_document_len = max;
        self
    }
}

/// Encodes a value as a binary-format jsonb column value.
///
/// The payload is `[JSONB_VERSION] ++ compact JSON`.
pub fn encode_jsonb<T: Serialize + ?Sized>(value: &T) -> Result<ColumnValue<'static>, EncodeError> {
    encode_jsonb_with_options(value, EncodeOptions::default())
}

/// Encodes a value as a jsonb column value with the given options.
pub fn encode_jsonb_with_options<T: Serialize + ?Sized>(
    value: &T,
    options: EncodeOptions,
) -> Result<ColumnValue<'static>, EncodeError> {
    let source_type = type_name::<T>();

    // The marker goes in first so the document is written straight after it.
    let (mut buf, header_len) = match options.format {
        PgFormat::Binary => (versioned_buffer(INITIAL_CAPACITY), 1),
        PgFormat::Text => (Vec::with_capacity(INITIAL_CAPACITY), 0),
    };
    serde_json::to_writer(&mut buf, value)
        .map_err(|source| EncodeError::Json { source_type, source })?;

    let len = buf.len() - header_len;
    if len > options.max_document_len {
        tracing::debug!(len, max = options.max_document_len, source_type, "jsonb document too large");
        return Err(EncodeError::LengthExceedsLimit {
            len,
            max: options.max_document_len,
        });
    }

    tracing::trace!(format = %options.format, len, source_type, "encoded jsonb");
    Ok(ColumnValue::new(PgType::JSONB, options.format, Some(Cow::Owned(buf))))
}

/// Encodes an optional value, mapping `None` to a NULL jsonb column.
pub fn encode_jsonb_nullable<T: Serialize + ?Sized>(
    value: Option<&T>,
) -> Result<ColumnValue<'static>, EncodeError> {
    match value {
        Some(value) => encode_jsonb(value),
        None => Ok(ColumnValue::null(PgType::JSONB, PgFormat::Binary)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use super::*;
    use crate::convert::JsonbConvertible;
    use crate::error::ErrorCode;
    use crate::limits::JSONB_VERSION;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: i64,
    }

    fn counter_map() -> HashMap<String, Value> {
        HashMap::from([
            ("name".to_string(), json!("a")),
            ("count".to_string(), json!(3)),
        ])
    }

    #[test]
    fn test_end_to_end_bytes() {
        let counter = Counter { name: "a".to_string(), count: 3 };
        let column = encode_jsonb(&counter).unwrap();

        let expected: &[u8] = &[
            0x01, 0x7B, 0x22, 0x6E, 0x61, 0x6D, 0x65, 0x22, 0x3A, 0x22, 0x61, 0x22, 0x2C, 0x22,
            0x63, 0x6F, 0x75, 0x6E, 0x74, 0x22, 0x3A, 0x33, 0x7D,
        ];
        assert_eq!(column.ty(), PgType::JSONB);
        assert_eq!(column.format(), PgFormat::Binary);
        assert_eq!(column.data(), Some(expected));

        let decoded: HashMap<String, Value> = decode_jsonb(&column).unwrap();
        assert_eq!(decoded, counter_map());

        let decoded: Counter = decode_jsonb(&column).unwrap();
        assert_eq!(decoded, counter);
    }

    #[test]
    fn test_map_roundtrip() {
        let map = counter_map();
        let column = encode_jsonb(&map).unwrap();
        let decoded: HashMap<String, Value> = decode_jsonb(&column).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_binary_layout() {
        let value = json!({"nested": {"list": [1, 2, 3], "flag": true}});
        let document = serde_json::to_vec(&value).unwrap();
        let column = encode_jsonb(&value).unwrap();
        let data = column.data().unwrap();

        assert_eq!(data[0], JSONB_VERSION);
        assert_eq!(data.len(), document.len() + 1);
        assert_eq!(&data[1..], &document[..]);
    }

    #[test]
    fn test_decode_text_format() {
        let column = ColumnValue::text(PgType::JSONB, b"{\"a\":1}");
        let decoded: HashMap<String, i64> = decode_jsonb(&column).unwrap();
        assert_eq!(decoded, HashMap::from([("a".to_string(), 1)]));
    }

    #[test]
    fn test_decode_text_does_not_strip_leading_byte() {
        // A leading 0x01 on the text path is part of the document, which makes it invalid JSON.
        let column = ColumnValue::text(PgType::JSONB, b"\x01{\"a\":1}");
        let result = decode_jsonb::<Value>(&column);
        assert!(matches!(result, Err(DecodeError::Json { .. })));

        // And a text document that happens to start with a digit keeps it.
        let column = ColumnValue::text(PgType::JSONB, b"12");
        assert_eq!(decode_jsonb::<i64>(&column).unwrap(), 12);
    }

    #[test]
    fn test_decode_binary_wrong_version() {
        let column = ColumnValue::binary(PgType::JSONB, b"\x02{\"a\":1}");
        let err = decode_jsonb::<Value>(&column).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVersion { version: 2 }));
        assert_eq!(err.code(), ErrorCode::MalformedPayload);
    }

    #[test]
    fn test_decode_binary_empty() {
        let column = ColumnValue::binary(PgType::JSONB, b"");
        let err = decode_jsonb::<Value>(&column).unwrap_err();
        assert!(matches!(err, DecodeError::MissingVersion));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_decode_binary_marker_only() {
        let column = ColumnValue::binary(PgType::JSONB, b"\x01");
        let err = decode_jsonb::<Value>(&column).unwrap_err();
        assert!(matches!(err, DecodeError::Json { .. }));
    }

    #[test]
    fn test_decode_null() {
        let column = ColumnValue::null(PgType::JSONB, PgFormat::Binary);
        let err = decode_jsonb::<HashMap<String, Value>>(&column).unwrap_err();
        assert!(matches!(err, DecodeError::NullValue { .. }));
        assert_eq!(err.code(), ErrorCode::NullValue);

        let decoded: Option<HashMap<String, Value>> = decode_jsonb_nullable(&column).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_nullable_present() {
        let column = ColumnValue::text(PgType::JSONB, b"[1,2]");
        let decoded: Option<Vec<u8>> = decode_jsonb_nullable(&column).unwrap();
        assert_eq!(decoded, Some(vec![1, 2]));
    }

    #[test]
    fn test_decode_nullable_json_null_document() {
        for column in [
            ColumnValue::binary(PgType::JSONB, b"\x01null"),
            ColumnValue::text(PgType::JSONB, b"null"),
        ] {
            let decoded: Option<HashMap<String, Value>> = decode_jsonb_nullable(&column).unwrap();
            assert!(decoded.is_none());

            // Agrees with the Option conformance on the same column.
            let via_trait = Option::<HashMap<String, Value>>::from_column(&column).unwrap();
            assert_eq!(decoded, via_trait);
        }

        // Without the optional wrapper the same document is a type error.
        let column = ColumnValue::binary(PgType::JSONB, b"\x01null");
        let err = decode_jsonb::<HashMap<String, Value>>(&column).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Decode);
    }

    #[test]
    fn test_decode_wrong_column_type() {
        for format in [PgFormat::Text, PgFormat::Binary] {
            let column = ColumnValue::new(PgType::TEXT, format, Some(Cow::Borrowed(&b"\x01{}"[..])));
            let err = decode_jsonb::<Value>(&column).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::UnsupportedColumnType { found: PgType::TEXT, .. }
            ));
        }

        // Plain json is rejected unless explicitly allowed.
        let column = ColumnValue::text(PgType::JSON, b"{}");
        let err = decode_jsonb::<Value>(&column).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedColumnType);
    }

    #[test]
    fn test_decode_json_column_when_accepted() {
        let options = DecodeOptions::new().accept_json();
        for format in [PgFormat::Text, PgFormat::Binary] {
            let column = ColumnValue::new(PgType::JSON, format, Some(Cow::Borrowed(&b"{\"a\":1}"[..])));
            let decoded: Value = decode_jsonb_with_options(&column, options).unwrap();
            assert_eq!(decoded, json!({"a": 1}));
        }
    }

    #[test]
    fn test_decode_type_mismatch() {
        let column = encode_jsonb(&json!({"name": 5})).unwrap();
        let err = decode_jsonb::<Counter>(&column).unwrap_err();
        assert!(matches!(err, DecodeError::Json { .. }));
        assert_eq!(err.code(), ErrorCode::Decode);
        assert!(err.to_string().contains("Counter"));
    }

    #[test]
    fn test_decode_length_limit() {
        let column = ColumnValue::binary(PgType::JSONB, b"\x01\"abcdef\"");
        let options = DecodeOptions::new().with_max_document_len(4);
        let err = decode_jsonb_with_options::<String>(&column, options).unwrap_err();
        assert!(matches!(err, DecodeError::LengthExceedsLimit { len: 8, max: 4 }));

        // The marker does not count towards the limit.
        let options = DecodeOptions::new().with_max_document_len(8);
        let decoded: String = decode_jsonb_with_options(&column, options).unwrap();
        assert_eq!(decoded, "abcdef");
    }

    #[test]
    fn test_encode_text_format() {
        let column = encode_jsonb_with_options(&json!([1, "x"]), EncodeOptions::text()).unwrap();
        assert_eq!(column.format(), PgFormat::Text);
        assert_eq!(column.data(), Some(&b"[1,\"x\"]"[..]));

        let decoded: Value = decode_jsonb(&column).unwrap();
        assert_eq!(decoded, json!([1, "x"]));
    }

    #[test]
    fn test_encode_length_limit() {
        let options = EncodeOptions::new().with_max_document_len(2);
        let err = encode_jsonb_with_options(&json!("abc"), options).unwrap_err();
        assert!(matches!(err, EncodeError::LengthExceedsLimit { len: 5, max: 2 }));
        assert_eq!(err.code(), ErrorCode::LengthExceedsLimit);
    }

    #[test]
    fn test_encode_serializer_failure() {
        // JSON object keys must be strings.
        let map = HashMap::from([(vec![1u8], 1)]);
        let err = encode_jsonb(&map).unwrap_err();
        assert!(matches!(err, EncodeError::Json { .. }));
        assert_eq!(err.code(), ErrorCode::Encode);
    }

    #[test]
    fn test_encode_unsized() {
        let column = encode_jsonb("hello").unwrap();
        assert_eq!(column.data(), Some(&b"\x01\"hello\""[..]));

        let items: &[i32] = &[1, 2];
        let column = encode_jsonb(items).unwrap();
        assert_eq!(column.data(), Some(&b"\x01[1,2]"[..]));
    }

    #[test]
    fn test_encode_nullable() {
        let column = encode_jsonb_nullable::<Value>(None).unwrap();
        assert!(column.is_null());
        assert_eq!(column.ty(), PgType::JSONB);

        let column = encode_jsonb_nullable(Some(&json!(null))).unwrap();
        assert_eq!(column.data(), Some(&b"\x01null"[..]));
    }
}
