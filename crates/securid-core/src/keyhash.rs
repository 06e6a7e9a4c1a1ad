//! Derivation of the AES key used to wrap/unwrap a token's seed.

use zeroize::Zeroize;

use crate::constants::{DEVID_CHARS_CLASSIC, DEVID_CHARS_SMARTPHONE, KEY_HASH_MAGIC, MAX_PASS};
use crate::error::{Result, SecurIdError};
use crate::mac::{securid_mac, short_mac};

/// Derived key-hash material: the AES key used to wrap/unwrap a seed, and
/// the short MAC of the (possibly all-zero) device-id buffer that fed it.
#[derive(Clone)]
pub struct KeyHash {
    pub key: [u8; 16],
    pub device_id_hash: u16,
}

impl Drop for KeyHash {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive the AES key used to protect a seed from an optional password and
/// an optional device id.
///
/// `pass`/`devid` of `None` are hashed as absent; the device-id slice is
/// still hashed (as all-zero bytes when `devid` is `None`) so callers that
/// don't bind a token to a device still get a stable `device_id_hash` back
/// (see the "device id in non-SNPROT mode" note: the encoder always writes
/// this hash, decoders under no-SNPROT never check it).
pub fn generate_key_hash(
    pass: Option<&str>,
    devid: Option<&str>,
    is_smartphone: bool,
) -> Result<KeyHash> {
    let devid_len = if is_smartphone {
        DEVID_CHARS_SMARTPHONE
    } else {
        DEVID_CHARS_CLASSIC
    };

    let pass_bytes = pass.unwrap_or("").as_bytes();
    if pass_bytes.len() > MAX_PASS {
        return Err(SecurIdError::BadPassword);
    }

    let mut buf = vec![0u8; pass_bytes.len() + devid_len + KEY_HASH_MAGIC.len()];
    buf[..pass_bytes.len()].copy_from_slice(pass_bytes);

    let devid_start = pass_bytes.len();
    let mut count = 0usize;
    if let Some(devid) = devid {
        for ch in devid.chars() {
            let is_valid = if is_smartphone {
                ch.is_ascii_hexdigit()
            } else {
                ch.is_ascii_digit()
            };
            if !is_valid {
                continue;
            }
            if count >= devid_len {
                buf.zeroize();
                return Err(SecurIdError::BadPassword);
            }
            buf[devid_start + count] = ch as u8;
            count += 1;
        }
    }

    let device_id_hash = short_mac(&buf[devid_start..devid_start + devid_len]);

    let magic_start = devid_start + devid_len;
    buf[magic_start..].copy_from_slice(&KEY_HASH_MAGIC);

    let key = securid_mac(&buf);
    buf.zeroize();

    Ok(KeyHash { key, device_id_hash })
}
