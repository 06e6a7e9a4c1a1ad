//! Single-block AES-128-ECB helpers.
//!
//! Every cryptographic operation in this crate works on exactly one
//! 16-byte block at a time (the custom MAC, the key-hash derivation, the
//! seed cryptor, and the tokencode cascade all chain single-block AES
//! calls rather than running AES in a true multi-block mode), so this
//! module exposes `encrypt_block`/`decrypt_block` directly over
//! `aes::Aes128` instead of pulling in a block-cipher-mode crate.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::constants::AES_KEY_SIZE;

/// Encrypt one 16-byte block under `key` using AES-128-ECB.
///
/// `aes::Aes128::new` and `encrypt_block` cannot fail for a 16-byte key and
/// a 16-byte block; there is no error path to propagate.
pub fn encrypt_block(key: &[u8; AES_KEY_SIZE], block: &[u8; AES_KEY_SIZE]) -> [u8; AES_KEY_SIZE] {
    let cipher = Aes128::new(key.into());
    let mut out = *block;
    cipher.encrypt_block((&mut out).into());
    out
}

/// Decrypt one 16-byte block under `key` using AES-128-ECB.
pub fn decrypt_block(key: &[u8; AES_KEY_SIZE], block: &[u8; AES_KEY_SIZE]) -> [u8; AES_KEY_SIZE] {
    let cipher = Aes128::new(key.into());
    let mut out = *block;
    cipher.decrypt_block((&mut out).into());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_then_decrypt_is_identity() {
        let key = [0x42u8; AES_KEY_SIZE];
        let plaintext = [0x11u8; AES_KEY_SIZE];
        let ciphertext = encrypt_block(&key, &plaintext);
        assert_ne!(ciphertext, plaintext);
        assert_eq!(decrypt_block(&key, &ciphertext), plaintext);
    }
}
