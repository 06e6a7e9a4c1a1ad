//! Fixed-width constants for the ctf token format.
//!
//! These values come from the bit layout described in the external
//! interface: a 71-81 digit decimal string made of a version digit, a
//! 12-digit serial, a run of 3-bits-per-digit packed binary payload, and a
//! 5-digit checksum.

/// Size of an AES-128 key and block, in bytes.
pub const AES_KEY_SIZE: usize = 16;

/// Number of bits packed into each ctf string digit (`'0'..='7'`).
pub const TOKEN_BITS_PER_CHAR: u32 = 3;

/// Length of the version character.
pub const VER_CHARS: usize = 1;

/// Length of the serial number field.
pub const SERIAL_CHARS: usize = 12;

/// Character offset where the packed binary payload begins.
pub const BINENC_OFS: usize = VER_CHARS + SERIAL_CHARS;

/// Number of bits in the packed binary payload: 128 (enc_seed) + 16 (flags)
/// + 14 (exp_date) + 1 (reserved, always written as zero) + 15
/// (dec_seed_hash) + 15 (device_id_hash).
pub const BINENC_BITS: usize = 128 + 16 + 14 + 1 + 15 + 15;

/// Number of ctf characters the binary payload occupies.
pub const BINENC_CHARS: usize = BINENC_BITS / TOKEN_BITS_PER_CHAR as usize;

/// Character offset where the checksum begins.
pub const CHECKSUM_OFS: usize = BINENC_OFS + BINENC_CHARS;

/// Number of digits in the checksum field.
pub const CHECKSUM_CHARS: usize = 5;

/// Number of bits encoded by the checksum field.
pub const CHECKSUM_BITS: usize = 15;

/// Shortest legal ctf string.
pub const MIN_TOKEN_CHARS: usize = 71;

/// Longest legal ctf string, and the length of a freshly-encoded (v2) token.
pub const MAX_TOKEN_CHARS: usize = CHECKSUM_OFS + CHECKSUM_CHARS;

/// Maximum accepted password length, in bytes.
pub const MAX_PASS: usize = 40;

/// Device-id field width for a smartphone (hex) ctf string.
pub const DEVID_CHARS_SMARTPHONE: usize = 40;

/// Device-id field width for a classic (decimal) ctf string.
pub const DEVID_CHARS_CLASSIC: usize = 32;

/// 7-byte magic suffix appended to the key-hash input buffer.
pub const KEY_HASH_MAGIC: [u8; 7] = [0xd8, 0xf5, 0x32, 0x53, 0x82, 0x89, 0x00];

/// Shortest accepted PIN length.
pub const MIN_PIN: usize = 4;

/// Longest accepted PIN length.
pub const MAX_PIN: usize = 8;

/// `2000-01-01 00:00:00 UTC`, the reference point for `exp_date`.
pub const SECURID_EPOCH: i64 = 946_684_800;

pub(crate) const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
pub(crate) const SECONDS_PER_HALF_DAY: i64 = 12 * 60 * 60;
