//! Tokencode generator: the five-round AES cascade that turns a decrypted
//! seed, a serial number, and the current time into a displayed code.

use chrono::{Datelike, Timelike};

use crate::aes_block::encrypt_block;
use crate::bits::bcd_write;
use crate::constants::AES_KEY_SIZE;
use crate::error::{Result, SecurIdError};
use crate::token::Token;

/// Build the per-round AES plaintext block: the first `k` bytes of
/// `bcd_time`, `0xaa`-padded out to byte 8, BCD-packed serial digits 4..11
/// in bytes 8..12, and `0xbb` in bytes 12..16.
fn key_material(bcd_time: &[u8; 8], k: usize, serial: &str) -> [u8; AES_KEY_SIZE] {
    let mut key = [0xaau8; AES_KEY_SIZE];
    key[..k].copy_from_slice(&bcd_time[..k]);
    key[12..16].copy_from_slice(&[0xbbu8; 4]);

    let serial_bytes = serial.as_bytes();
    for (slot, i) in (8..12).zip((4..12).step_by(2)) {
        let hi = serial_bytes[i] - b'0';
        let lo = serial_bytes[i + 1] - b'0';
        key[slot] = (hi << 4) | lo;
    }
    key
}

/// Compute the 8-digit (PIN-blended) tokencode for `token` at `now`.
///
/// Requires `token.dec_seed` to already be populated (see
/// [`crate::seed::decrypt_seed`] or [`crate::random::random_token`]).
pub fn compute_tokencode(token: &Token, now: i64) -> Result<String> {
    let seed = token.dec_seed.ok_or(SecurIdError::General)?;
    let dt = chrono::DateTime::from_timestamp(now, 0).ok_or(SecurIdError::General)?;

    let mut bcd_time = [0u8; 8];
    bcd_write(&mut bcd_time[0..2], dt.year() as u32, 2);
    bcd_write(&mut bcd_time[2..3], dt.month(), 1);
    bcd_write(&mut bcd_time[3..4], dt.day(), 1);
    bcd_write(&mut bcd_time[4..5], dt.hour(), 1);
    bcd_write(&mut bcd_time[5..6], dt.minute() & !0x03, 1);
    // bcd_time[6..8] stay zero.

    let serial = &token.serial;
    let r1 = encrypt_block(&seed, &key_material(&bcd_time, 2, serial));
    let r2 = encrypt_block(&r1, &key_material(&bcd_time, 3, serial));
    let r3 = encrypt_block(&r2, &key_material(&bcd_time, 4, serial));
    let r4 = encrypt_block(&r3, &key_material(&bcd_time, 5, serial));
    let r5 = encrypt_block(&r4, &key_material(&bcd_time, 8, serial));

    // r5 holds four consecutive tokencodes; pick the one for this minute.
    let slice = 4 * ((dt.minute() & 0x03) as usize);
    let tokencode = u32::from_be_bytes(r5[slice..slice + 4].try_into().unwrap());

    let pin_bytes = token.pin.as_bytes();
    let pin_len = pin_bytes.len();

    let mut digits = [0u8; 8];
    let mut value = tokencode;
    for i in 0..8 {
        let mut c = (value % 10) as u8;
        value /= 10;
        if i < pin_len {
            c += pin_bytes[pin_len - i - 1] - b'0';
        }
        digits[7 - i] = (c % 10) + b'0';
    }

    Ok(String::from_utf8(digits.to_vec()).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECURID_EPOCH;
    use crate::flags::Flags;

    fn zero_seed_token(pin: &str) -> Token {
        Token {
            serial: "000000000000".to_string(),
            flags: Flags::empty(),
            exp_date: 0,
            enc_seed: None,
            dec_seed: Some([0u8; AES_KEY_SIZE]),
            dec_seed_hash: 0,
            device_id_hash: 0,
            is_smartphone: false,
            pin: pin.to_string(),
            pinmode: 0,
        }
    }

    // Known-answer vectors from an all-zero seed, serial "000000000000",
    // no PIN. Computed by hand-running this module's algorithm against an
    // AES-128-ECB reference rather than the actual hardware (no ground
    // truth device exists for an all-zero seed).
    #[test]
    fn known_answer_vectors_all_zero_seed() {
        let t = zero_seed_token("");
        assert_eq!(
            compute_tokencode(&t, SECURID_EPOCH).unwrap(),
            "44979261"
        );
        assert_eq!(
            compute_tokencode(&t, SECURID_EPOCH + 60).unwrap(),
            "89499364"
        );
        assert_eq!(
            compute_tokencode(&t, SECURID_EPOCH + 3600).unwrap(),
            "09439798"
        );
        assert_eq!(
            compute_tokencode(&t, SECURID_EPOCH + 86400).unwrap(),
            "62107774"
        );
    }

    #[test]
    fn pin_blends_into_low_order_digits() {
        let t = zero_seed_token("1234");
        assert_eq!(
            compute_tokencode(&t, SECURID_EPOCH).unwrap(),
            "44970495"
        );
    }

    #[test]
    fn empty_pin_leaves_tokencode_unchanged() {
        let with_empty_pin = zero_seed_token("");
        let with_no_pin = zero_seed_token("");
        assert_eq!(
            compute_tokencode(&with_empty_pin, SECURID_EPOCH).unwrap(),
            compute_tokencode(&with_no_pin, SECURID_EPOCH).unwrap()
        );
    }

    #[test]
    fn all_four_minutes_in_a_cascade_differ() {
        let t = zero_seed_token("");
        let mut codes = std::collections::HashSet::new();
        for minute_offset in 0..4 {
            codes.insert(compute_tokencode(&t, SECURID_EPOCH + minute_offset * 60).unwrap());
        }
        assert_eq!(codes.len(), 4);
    }

    #[test]
    fn missing_decrypted_seed_is_rejected() {
        let mut t = zero_seed_token("");
        t.dec_seed = None;
        assert_eq!(
            compute_tokencode(&t, SECURID_EPOCH),
            Err(SecurIdError::General)
        );
    }
}
