//! Error types for jsonb column encoding and decoding.

use thiserror::Error;

use crate::model::PgType;

/// Error kinds, one per failure class a caller may want to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// J001: NULL where a value was required
    NullValue,
    /// J002: Declared column type is not jsonb
    UnsupportedColumnType,
    /// J003: Missing or unknown version marker
    MalformedPayload,
    /// J004: Document could not be parsed into the target type
    Decode,
    /// J005: Value could not be serialized
    Encode,
    /// J006: Document exceeds the size limit
    LengthExceedsLimit,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "J001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NullValue => "J001",
            ErrorCode::UnsupportedColumnType => "J002",
            ErrorCode::MalformedPayload => "J003",
            ErrorCode::Decode => "J004",
            ErrorCode::Encode => "J005",
            ErrorCode::LengthExceedsLimit => "J006",
        }
    }

    /// Returns a short identifier for the failing aspect of the value.
    pub fn identifier(&self) -> &'static str {
        match self {
            ErrorCode::NullValue => "data",
            ErrorCode::UnsupportedColumnType | ErrorCode::Decode | ErrorCode::Encode => "json",
            ErrorCode::MalformedPayload => "version",
            ErrorCode::LengthExceedsLimit => "size",
        }
    }
}

/// Error while converting a column value into a typed value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("[J001] unable to decode {target} from NULL jsonb data")]
    NullValue { target: &'static str },

    #[error("[J002] could not decode {target} from data type: {found}")]
    UnsupportedColumnType { found: PgType, target: &'static str },

    #[error("[J003] binary jsonb payload is empty (missing version marker)")]
    MissingVersion,

    #[error("[J003] unsupported jsonb version: {version:#04x}")]
    UnsupportedVersion { version: u8 },

    #[error("[J004] invalid json for {target}: {source}")]
    Json {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("[J006] jsonb document length {len} exceeds maximum {max}")]
    LengthExceedsLimit { len: usize, max: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::NullValue { .. } => ErrorCode::NullValue,
            DecodeError::UnsupportedColumnType { .. } => ErrorCode::UnsupportedColumnType,
            DecodeError::MissingVersion | DecodeError::UnsupportedVersion { .. } => {
                ErrorCode::MalformedPayload
            }
            DecodeError::Json { .. } => ErrorCode::Decode,
            DecodeError::LengthExceedsLimit { .. } => ErrorCode::LengthExceedsLimit,
        }
    }

    /// Returns true for errors caused by the payload bytes rather than by
    /// a NULL or a schema mismatch.
    pub fn is_malformed(&self) -> bool {
        self.code() == ErrorCode::MalformedPayload
    }
}

/// Error while converting a typed value into a column value.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("[J005] failed to serialize {source_type} as json: {source}")]
    Json {
        source_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("[J006] jsonb document length {len} exceeds maximum {max}")]
    LengthExceedsLimit { len: usize, max: usize },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::Json { .. } => ErrorCode::Encode,
            EncodeError::LengthExceedsLimit { .. } => ErrorCode::LengthExceedsLimit,
        }
    }
}
