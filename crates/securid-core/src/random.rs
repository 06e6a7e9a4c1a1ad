//! Generation of a fresh, unprotected, 128-bit random token.

use rand::RngCore;

use crate::aes_block::encrypt_block;
use crate::constants::{AES_KEY_SIZE, SECURID_EPOCH, SECONDS_PER_DAY};
use crate::error::Result;
use crate::flags::{Flags, DIGIT_MASK, NUMSECONDS_SHIFT, PINMODE_MASK};
use crate::keyhash::generate_key_hash;
use crate::mac::short_mac;
use crate::token::Token;

/// Generate a random, password- and device-unprotected 128-bit token good
/// for roughly two to five months, matching the reference implementation's
/// "a couple of months out, plus up to 4.5 more" expiration spread.
pub fn random_token(now: i64) -> Result<Token> {
    let mut rng = rand::thread_rng();

    let mut dec_seed = [0u8; AES_KEY_SIZE];
    rng.fill_bytes(&mut dec_seed);

    let mut randbytes = [0u8; AES_KEY_SIZE];
    rng.fill_bytes(&mut randbytes);

    let dec_seed_hash = short_mac(&dec_seed);

    let key_hash = generate_key_hash(None, None, false)?;
    let enc_seed = encrypt_block(&key_hash.key, &dec_seed);

    let flag_bits =
        Flags::FEAT5.bits() | DIGIT_MASK | PINMODE_MASK | (1u16 << NUMSECONDS_SHIFT) | Flags::BIT128.bits();
    let flags = Flags::from_bits_retain(flag_bits);

    let mut serial = String::with_capacity(12);
    for b in &randbytes[..12] {
        serial.push((b'0' + b % 10) as char);
    }

    let exp_date = ((now - SECURID_EPOCH) / SECONDS_PER_DAY) as u16 + 60 + (randbytes[12] & 0x0f) as u16 * 30;

    Ok(Token {
        serial,
        flags,
        exp_date,
        enc_seed: Some(enc_seed),
        dec_seed: Some(dec_seed),
        dec_seed_hash,
        device_id_hash: key_hash.device_id_hash,
        is_smartphone: false,
        pin: String::new(),
        pinmode: 3,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_token;
    use crate::seed::decrypt_seed;
    use crate::tokencode::compute_tokencode;

    #[test]
    fn random_token_is_unprotected_and_128bit() {
        let t = random_token(SECURID_EPOCH).unwrap();
        assert!(!t.pass_required());
        assert!(!t.devid_required());
        assert!(t.flags.is_128bit());
        assert_eq!(t.pinmode, 3);
        assert_eq!(t.serial.len(), 12);
        assert!(t.serial.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn random_token_expiration_is_in_expected_window() {
        let t = random_token(SECURID_EPOCH).unwrap();
        assert!(t.exp_date >= 60);
        assert!(t.exp_date <= 60 + 15 * 30);
    }

    #[test]
    fn random_token_produces_a_usable_tokencode() {
        let t = random_token(SECURID_EPOCH).unwrap();
        let code = compute_tokencode(&t, SECURID_EPOCH).unwrap();
        assert_eq!(code.len(), 8);
        assert!(code.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn random_token_encode_decode_decrypt_roundtrips() {
        use crate::codec::encode_token;

        let t = random_token(SECURID_EPOCH).unwrap();
        let dec_seed = t.dec_seed.unwrap();
        let encoded = encode_token(&t, None, None).unwrap();

        let mut decoded = decode_token(&encoded).unwrap();
        decrypt_seed(&mut decoded, None, None).unwrap();
        assert_eq!(decoded.dec_seed, Some(dec_seed));
    }
}
