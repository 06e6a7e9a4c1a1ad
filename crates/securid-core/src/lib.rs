//! securid-core - decode, decrypt, and compute tokencodes for
//! SecurID-compatible ctf tokens.
//!
//! This crate implements the ctf token wire format: a custom AES-ECB-based
//! MAC, key-hash derivation from an optional password and device id, a
//! bit-packed token string codec, a five-round AES cascade tokencode
//! generator, and PIN encryption for local storage. There is no wire
//! tolerance anywhere in this stack — every codec here must match a real
//! device bit-for-bit or the token is useless.

pub mod aes_block;
pub mod bits;
pub mod codec;
pub mod constants;
pub mod error;
pub mod flags;
pub mod keyhash;
pub mod mac;
pub mod pin;
pub mod random;
pub mod seed;
pub mod token;
pub mod tokencode;

pub use codec::{decode_token, encode_token};
pub use error::{Result, SecurIdError};
pub use flags::Flags;
pub use keyhash::{generate_key_hash, KeyHash};
pub use mac::{securid_mac, short_mac};
pub use pin::{decrypt_pin, encrypt_pin, pin_format_ok};
pub use random::random_token;
pub use seed::decrypt_seed;
pub use token::Token;
pub use tokencode::compute_tokencode;
