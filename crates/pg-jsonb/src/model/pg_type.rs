//! Column type tags.

use std::fmt;

/// Object identifier of a catalog type.
pub type Oid = u32;

/// Declared type of a column value, identified by its catalog OID.
///
/// Only the handful of types this crate needs to name have constants;
/// any other OID is carried through as-is so that errors can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PgType(Oid);

impl PgType {
    pub const BYTEA: PgType = PgType(17);
    pub const INT4: PgType = PgType(23);
    pub const TEXT: PgType = PgType(25);
    pub const JSON: PgType = PgType(114);
    pub const JSON_ARRAY: PgType = PgType(199);
    pub const VARCHAR: PgType = PgType(1043);
    pub const JSONB: PgType = PgType(3802);
    pub const JSONB_ARRAY: PgType = PgType(3807);

    /// Wraps a raw OID.
    pub const fn from_oid(oid: Oid) -> Self {
        Self(oid)
    }

    /// Returns the raw OID.
    pub const fn oid(self) -> Oid {
        self.0
    }

    /// Returns the catalog name, or `"unknown"` for OIDs without a constant.
    pub fn name(self) -> &'static str {
        match self {
            PgType::BYTEA => "bytea",
            PgType::INT4 => "int4",
            PgType::TEXT => "text",
            PgType::JSON => "json",
            PgType::JSON_ARRAY => "_json",
            PgType::VARCHAR => "varchar",
            PgType::JSONB => "jsonb",
            PgType::JSONB_ARRAY => "_jsonb",
            _ => "unknown",
        }
    }

    /// Returns true for the types known to this crate.
    pub fn is_known(self) -> bool {
        self.name() != "unknown"
    }
}

impl From<Oid> for PgType {
    fn from(oid: Oid) -> Self {
        Self(oid)
    }
}

impl fmt::Display for PgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            f.write_str(self.name())
        } else {
            write!(f, "oid {}", self.0)
        }
    }
}
