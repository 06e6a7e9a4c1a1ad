//! Seed cryptor: turns an encrypted seed into a usable decrypted one.

use log::{debug, warn};

use crate::aes_block::decrypt_block;
use crate::error::{Result, SecurIdError};
use crate::keyhash::generate_key_hash;
use crate::mac::short_mac;
use crate::token::Token;

/// Decrypt `token`'s encrypted seed in place, populating its decrypted
/// seed on success.
///
/// Requires `pass` when [`Token::pass_required`] is set and `devid` when
/// [`Token::devid_required`] is set; a device id is checked against the
/// token's bound hash only when the token is `SNPROT`-protected, matching
/// the reference implementation's "device id in non-SNPROT mode" behavior
/// (the hash is always computed, but only ever compared under `SNPROT`).
pub fn decrypt_seed(token: &mut Token, pass: Option<&str>, devid: Option<&str>) -> Result<()> {
    if token.pass_required() && pass.is_none() {
        return Err(SecurIdError::MissingPassword);
    }
    if token.devid_required() && devid.is_none() {
        return Err(SecurIdError::MissingPassword);
    }

    let key_hash = generate_key_hash(
        if token.pass_required() { pass } else { None },
        if token.devid_required() { devid } else { None },
        token.is_smartphone,
    )?;

    if token.devid_required() && key_hash.device_id_hash != token.device_id_hash {
        warn!("decrypt_seed: device id hash mismatch");
        return Err(SecurIdError::BadDevid);
    }

    let enc_seed = token.enc_seed.ok_or(SecurIdError::General)?;
    let dec_seed = decrypt_block(&key_hash.key, &enc_seed);

    let computed_mac = short_mac(&dec_seed);
    if computed_mac != token.dec_seed_hash {
        warn!("decrypt_seed: seed integrity check failed");
        return Err(SecurIdError::DecryptFailed);
    }

    debug!("decrypt_seed: serial={} ok", token.serial);
    token.dec_seed = Some(dec_seed);
    Ok(())
}
