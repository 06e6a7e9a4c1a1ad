//! Token string codec: `decode_token`/`encode_token`.
//!
//! The ctf string layout is `<version><serial><binary-payload><checksum>`.
//! `decode_token` never bounds the binary-payload read to the checksum
//! offset — it hands the whole string remainder to [`numinput_to_bits`],
//! exactly as the reference implementation's null-terminated-string
//! traversal does, so a short (v1, 71-character) token naturally yields a
//! binary payload missing its trailing bits (no `device_id_hash`) rather
//! than an out-of-bounds read.

use log::{debug, trace};

use crate::aes_block::encrypt_block;
use crate::bits::{bits_to_numoutput, get_bits, numinput_to_bits, set_bits};
use crate::constants::{
    AES_KEY_SIZE, BINENC_BITS, BINENC_OFS, CHECKSUM_BITS, CHECKSUM_CHARS, MAX_TOKEN_CHARS,
    MIN_TOKEN_CHARS, SERIAL_CHARS, VER_CHARS,
};
use crate::error::{Result, SecurIdError};
use crate::flags::Flags;
use crate::keyhash::generate_key_hash;
use crate::mac::short_mac;
use crate::token::Token;

/// Decode a ctf string into a [`Token`] with only its encrypted seed set.
pub fn decode_token(s: &str) -> Result<Token> {
    let len = s.len();
    if len < MIN_TOKEN_CHARS || len > MAX_TOKEN_CHARS || !s.is_ascii() {
        return Err(SecurIdError::BadLen);
    }

    let version = s.as_bytes()[0];
    if version != b'1' && version != b'2' {
        return Err(SecurIdError::TokenVersion);
    }

    let checksum_start = len - CHECKSUM_CHARS;
    let checksum_bytes = numinput_to_bits(&s[checksum_start..], CHECKSUM_BITS as u32);
    let token_mac = get_bits(&checksum_bytes, 0, CHECKSUM_BITS as u32) as u16;
    let computed_mac = short_mac(s[..checksum_start].as_bytes());
    if token_mac != computed_mac {
        debug!("decode_token: checksum mismatch");
        return Err(SecurIdError::ChecksumFailed);
    }

    let serial = s[VER_CHARS..VER_CHARS + SERIAL_CHARS].to_string();

    let d = numinput_to_bits(&s[BINENC_OFS..], BINENC_BITS as u32);
    let mut enc_seed = [0u8; AES_KEY_SIZE];
    enc_seed.copy_from_slice(&d[..AES_KEY_SIZE]);

    let flags = Flags::from_bits_retain(get_bits(&d, 128, 16) as u16);
    let exp_date = get_bits(&d, 144, 14) as u16;
    let dec_seed_hash = get_bits(&d, 159, 15) as u16;
    let device_id_hash = get_bits(&d, 174, 15) as u16;

    trace!("decode_token: serial={serial} flags={flags:?}");

    Ok(Token {
        serial,
        flags,
        exp_date,
        enc_seed: Some(enc_seed),
        dec_seed: None,
        dec_seed_hash,
        device_id_hash,
        is_smartphone: false,
        pin: String::new(),
        pinmode: 0,
    })
}

/// Re-encrypt `token`'s decrypted seed under `pass`/`devid` and render it
/// as a fresh v2 ctf string. An empty password or device id string is
/// treated as absent, matching the reference implementation.
pub fn encode_token(token: &Token, pass: Option<&str>, devid: Option<&str>) -> Result<String> {
    let pass = pass.filter(|p| !p.is_empty());
    let devid = devid.filter(|d| !d.is_empty());

    let dec_seed = token.dec_seed.ok_or(SecurIdError::General)?;
    let key_hash = generate_key_hash(pass, devid, token.is_smartphone)?;

    let mut flag_bits = token.flags.bits();
    flag_bits = if pass.is_some() {
        flag_bits | Flags::PASSPROT.bits()
    } else {
        flag_bits & !Flags::PASSPROT.bits()
    };
    flag_bits = if devid.is_some() {
        flag_bits | Flags::SNPROT.bits()
    } else {
        flag_bits & !Flags::SNPROT.bits()
    };

    let enc_seed = encrypt_block(&key_hash.key, &dec_seed);

    let mut d = vec![0u8; (BINENC_BITS + 7) / 8 + 1];
    d[..AES_KEY_SIZE].copy_from_slice(&enc_seed);
    set_bits(&mut d, 128, 16, flag_bits as u32);
    set_bits(&mut d, 144, 14, token.exp_date as u32);
    set_bits(&mut d, 159, 15, short_mac(&dec_seed) as u32);
    set_bits(&mut d, 174, 15, key_hash.device_id_hash as u32);

    let mut out = String::with_capacity(MAX_TOKEN_CHARS);
    out.push('2');
    out.push_str(&token.serial);
    out.push_str(&bits_to_numoutput(&d, BINENC_BITS as u32));

    let checksum = short_mac(out.as_bytes());
    let mut csum_buf = [0u8; 2];
    set_bits(&mut csum_buf, 0, CHECKSUM_BITS as u32, checksum as u32);
    out.push_str(&bits_to_numoutput(&csum_buf, CHECKSUM_BITS as u32));

    debug!("encode_token: serial={} len={}", token.serial, out.len());
    Ok(out)
}
