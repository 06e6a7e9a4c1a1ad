//! End-to-end exercise of the public API: random generation, encoding
//! under a password and device id, decoding, decrypting, and computing a
//! tokencode all round-trip through the crate boundary rather than a
//! single module's internals.

use securid_core::{
    compute_tokencode, decode_token, decrypt_pin, decrypt_seed, encode_token, encrypt_pin,
    random_token,
};

const NOW: i64 = 946_684_800; // SECURID_EPOCH

#[test]
fn random_token_survives_unprotected_encode_decode_decrypt_compute() {
    let generated = random_token(NOW).unwrap();
    let dec_seed = generated.dec_seed.unwrap();

    let encoded = encode_token(&generated, None, None).unwrap();
    let mut decoded = decode_token(&encoded).unwrap();
    assert_eq!(decoded.serial, generated.serial);

    decrypt_seed(&mut decoded, None, None).unwrap();
    assert_eq!(decoded.dec_seed, Some(dec_seed));

    let code = compute_tokencode(&decoded, NOW).unwrap();
    assert_eq!(code.len(), 8);
}

#[test]
fn password_and_devid_protected_token_requires_both_on_decrypt() {
    let mut generated = random_token(NOW).unwrap();
    generated.is_smartphone = false;

    let encoded = encode_token(&generated, Some("correct horse"), Some("98765432109876543210"))
        .unwrap();
    let mut decoded = decode_token(&encoded).unwrap();

    assert!(decrypt_seed(&mut decoded, None, None).is_err());
    assert!(decrypt_seed(&mut decoded, Some("correct horse"), None).is_err());
    decrypt_seed(
        &mut decoded,
        Some("correct horse"),
        Some("98765432109876543210"),
    )
    .unwrap();
    assert_eq!(decoded.dec_seed, generated.dec_seed);
}

#[test]
fn pin_encrypted_for_storage_round_trips_independently_of_tokens() {
    let enc = encrypt_pin("24680", "a passphrase").unwrap();
    assert_eq!(decrypt_pin(&enc, "a passphrase").unwrap(), "24680");
    assert!(decrypt_pin(&enc, "wrong passphrase").is_err());
}
