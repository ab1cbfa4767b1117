//! Types storable in a jsonb column.
//!
//! [`JsonbConvertible`] is the capability a type needs to be bound as a
//! jsonb parameter or read from a jsonb result column. The capability is
//! the `serde` pair itself: anything that is `Serialize + DeserializeOwned`
//! can opt in with an empty impl, and nothing else can.
//!
//! ```rust
//! use pg_jsonb::{JsonbConvertible, PgFormat};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Settings {
//!     theme: String,
//!     volume: u8,
//! }
//!
//! impl JsonbConvertible for Settings {}
//!
//! let settings = Settings { theme: "dark".to_string(), volume: 7 };
//! let column = settings.to_column().unwrap();
//! assert_eq!(column.format(), PgFormat::Binary);
//! assert_eq!(Settings::from_column(&column).unwrap(), settings);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{decode_jsonb, decode_jsonb_nullable, encode_jsonb};
use crate::error::{DecodeError, EncodeError};
use crate::model::{ColumnValue, PgFormat, PgType};

/// A value representable by a jsonb column.
pub trait JsonbConvertible: Serialize + DeserializeOwned {
    /// Column type used for single values.
    const PG_TYPE: PgType = PgType::JSONB;

    /// Column type used for arrays of values.
    const PG_ARRAY_TYPE: PgType = PgType::JSONB_ARRAY;

    /// Decodes a value from a jsonb column in either wire format.
    fn from_column(value: &ColumnValue<'_>) -> Result<Self, DecodeError> {
        decode_jsonb(value)
    }

    /// Encodes the value as a binary-format jsonb column.
    fn to_column(&self) -> Result<ColumnValue<'static>, EncodeError> {
        encode_jsonb(self)
    }
}

// String-keyed maps are JSON objects already; any hasher will do.
impl<V, S> JsonbConvertible for HashMap<String, V, S>
where
    V: Serialize + DeserializeOwned,
    S: BuildHasher + Default,
{
}

impl<V> JsonbConvertible for BTreeMap<String, V> where V: Serialize + DeserializeOwned {}

impl JsonbConvertible for serde_json::Map<String, serde_json::Value> {}

impl JsonbConvertible for serde_json::Value {}

/// NULL maps to `None` in both directions; a `null` document decodes to `None`.
///
/// Both directions go through the codec directly, never through `T`'s own
/// `from_column` / `to_column`, so overrides on `T` apply to neither.
impl<T: JsonbConvertible> JsonbConvertible for Option<T> {
    const PG_TYPE: PgType = T::PG_TYPE;
    const PG_ARRAY_TYPE: PgType = T::PG_ARRAY_TYPE;

    fn from_column(value: &ColumnValue<'_>) -> Result<Self, DecodeError> {
        decode_jsonb_nullable(value)
    }

    fn to_column(&self) -> Result<ColumnValue<'static>, EncodeError> {
        match self {
            Some(inner) => encode_jsonb(inner),
            None => Ok(ColumnValue::null(T::PG_TYPE, PgFormat::Binary)),
        }
    }
}
