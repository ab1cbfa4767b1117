//! jsonb column encoding/decoding.
//!
//! Bridges `serde` types and the two wire representations of a jsonb
//! column: the bare text document and the version-prefixed binary layout.

pub mod jsonb;
pub mod version;


pub use jsonb::{
    DecodeOptions, EncodeOptions, decode_jsonb, decode_jsonb_nullable, decode_jsonb_with_options,
    encode_jsonb, encode_jsonb_nullable, encode_jsonb_with_options,
};
pub use version::{strip_version, with_version};
