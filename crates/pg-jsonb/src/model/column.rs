//! Column values as they travel on the wire.

use std::borrow::Cow;

use crate::model::{PgFormat, PgType};

/// A single parameter or result column in wire representation.
///
/// `data` is `None` for SQL NULL. The payload may borrow from a row buffer
/// so result columns can be decoded without copying; values produced by
/// the encoder always own their bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValue<'a> {
    ty: PgType,
    format: PgFormat,
    data: Option<Cow<'a, [u8]>>,
}

impl<'a> ColumnValue<'a> {
    /// Creates a column value from its parts.
    pub fn new(ty: PgType, format: PgFormat, data: Option<Cow<'a, [u8]>>) -> Self {
        Self { ty, format, data }
    }

    /// Creates a SQL NULL of the given type.
    pub fn null(ty: PgType, format: PgFormat) -> Self {
        Self { ty, format, data: None }
    }

    /// Creates a text-format value borrowing `data`.
    pub fn text(ty: PgType, data: &'a [u8]) -> Self {
        Self {
            ty,
            format: PgFormat::Text,
            data: Some(Cow::Borrowed(data)),
        }
    }

    /// Creates a binary-format value borrowing `data`.
    pub fn binary(ty: PgType, data: &'a [u8]) -> Self {
        Self {
            ty,
            format: PgFormat::Binary,
            data: Some(Cow::Borrowed(data)),
        }
    }

    /// Declared column type.
    pub fn ty(&self) -> PgType {
        self.ty
    }

    /// Wire format of the payload.
    pub fn format(&self) -> PgFormat {
        self.format
    }

    /// Raw payload, `None` for NULL.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Returns true for SQL NULL.
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Payload length in bytes (zero for NULL).
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.len())
    }

    /// Returns true for NULL or a zero-length payload.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the value and returns the payload.
    pub fn into_data(self) -> Option<Cow<'a, [u8]>> {
        self.data
    }

    /// Detaches the value from any borrowed buffer.
    pub fn into_owned(self) -> ColumnValue<'static> {
        ColumnValue {
            ty: self.ty,
            format: self.format,
            data: self.data.map(|d| Cow::Owned(d.into_owned())),
        }
    }
}
