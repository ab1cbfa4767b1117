//! Wire-level types for column values.
//!
//! - Formats (text / binary)
//! - Type tags (catalog OIDs)
//! - Column values (type + format + optional payload)

pub mod column;
pub mod format;
pub mod pg_type;

pub use column::ColumnValue;
pub use format::PgFormat;
pub use pg_type::{Oid, PgType};
