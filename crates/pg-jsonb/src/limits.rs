//! Wire constants and size limits.

/// Version marker prefixed to every binary-format jsonb payload.
pub const JSONB_VERSION: u8 = 0x01;

/// Maximum size of a single jsonb document in bytes (server limit).
pub const MAX_JSONB_SIZE: usize = 268_435_455;
