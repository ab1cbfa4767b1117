//! Wire format codes.

use std::fmt;

/// Format in which a column value travels on the wire.
///
/// The protocol only knows two formats: text has format code zero and
/// binary has format code one. Outbound parameters and inbound result
/// columns each carry their own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PgFormat {
    #[default]
    Text,
    Binary,
}

impl PgFormat {
    /// Returns the format for a wire format code.
    pub fn from_code(code: i16) -> Option<PgFormat> {
        match code {
            0 => Some(PgFormat::Text),
            1 => Some(PgFormat::Binary),
            _ => None,
        }
    }

    /// Returns the wire format code.
    pub fn code(self) -> i16 {
        match self {
            PgFormat::Text => 0,
            PgFormat::Binary => 1,
        }
    }
}

impl fmt::Display for PgFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgFormat::Text => f.write_str("text"),
            PgFormat::Binary => f.write_str("binary"),
        }
    }
}
