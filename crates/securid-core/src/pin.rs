//! PIN validation and password-based PIN encryption.
//!
//! The encrypted form is a 64-character lowercase hex string: a random
//! 16-byte IV followed by one AES block holding the PIN XORed with that
//! IV, encrypted under the MAC of the password. There is no wire
//! tolerance here either — `decrypt_pin` rejects anything that doesn't
//! decrypt back to a well-formed, correctly-terminated PIN.

use rand::RngCore;

use crate::aes_block::{decrypt_block, encrypt_block};
use crate::constants::{AES_KEY_SIZE, MAX_PIN, MIN_PIN};
use crate::error::{Result, SecurIdError};
use crate::mac::securid_mac;

/// Validate a PIN: 4-8 decimal digits.
pub fn pin_format_ok(pin: &str) -> Result<()> {
    if pin.len() < MIN_PIN || pin.len() > MAX_PIN {
        return Err(SecurIdError::BadLen);
    }
    if !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SecurIdError::General);
    }
    Ok(())
}

/// Encrypt `pin` under `password`, returning a 64-character hex string.
pub fn encrypt_pin(pin: &str, password: &str) -> Result<String> {
    pin_format_ok(pin)?;

    let pin_bytes = pin.as_bytes();
    let mut buf = [0u8; AES_KEY_SIZE];
    buf[..pin_bytes.len()].copy_from_slice(pin_bytes);
    buf[AES_KEY_SIZE - 1] = pin_bytes.len() as u8;

    let passhash = securid_mac(password.as_bytes());

    let mut iv = [0u8; AES_KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);

    for i in 0..AES_KEY_SIZE {
        buf[i] ^= iv[i];
    }
    let ciphertext = encrypt_block(&passhash, &buf);

    let mut out = String::with_capacity(AES_KEY_SIZE * 4);
    out.push_str(&hex::encode(iv));
    out.push_str(&hex::encode(ciphertext));
    Ok(out)
}

/// Decrypt a PIN encrypted with [`encrypt_pin`] under the same password.
pub fn decrypt_pin(enc_pin: &str, password: &str) -> Result<String> {
    let raw = hex::decode(enc_pin).map_err(|_| SecurIdError::BadLen)?;
    if raw.len() != AES_KEY_SIZE * 2 {
        return Err(SecurIdError::BadLen);
    }

    let iv: [u8; AES_KEY_SIZE] = raw[..AES_KEY_SIZE].try_into().unwrap();
    let ciphertext: [u8; AES_KEY_SIZE] = raw[AES_KEY_SIZE..].try_into().unwrap();

    let passhash = securid_mac(password.as_bytes());
    let mut buf = decrypt_block(&passhash, &ciphertext);
    for i in 0..AES_KEY_SIZE {
        buf[i] ^= iv[i];
    }

    if buf[AES_KEY_SIZE - 2] != 0 {
        return Err(SecurIdError::General);
    }
    let len = buf[AES_KEY_SIZE - 1] as usize;
    let str_len = buf[..AES_KEY_SIZE - 2]
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(AES_KEY_SIZE - 2);
    if len != str_len {
        return Err(SecurIdError::General);
    }

    let pin = std::str::from_utf8(&buf[..len])
        .map_err(|_| SecurIdError::General)?
        .to_string();
    pin_format_ok(&pin)?;
    Ok(pin)
}
