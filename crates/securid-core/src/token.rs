//! The Token Record: the single value type every other module operates on.

use zeroize::Zeroize;

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HALF_DAY, SECURID_EPOCH};
use crate::flags::Flags;

/// A decoded, generated, or in-progress SecurID-compatible token.
///
/// Encrypted and decrypted seed are modeled as independent optional
/// fields rather than a single `enum Seed`, matching the reference
/// implementation: decoding a ctf string always yields an encrypted seed
/// only, encoding requires a decrypted seed, and decryption populates the
/// decrypted seed alongside whatever encrypted seed was already present.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// 12-digit decimal serial number.
    pub serial: String,
    /// 16-bit flag word.
    pub flags: Flags,
    /// Days since [`SECURID_EPOCH`]; last valid day, grace period applies.
    pub exp_date: u16,
    /// Seed encrypted under the key-hash, present after decode or encrypt.
    pub enc_seed: Option<[u8; 16]>,
    /// Cleartext seed, present after decrypt or random generation.
    pub dec_seed: Option<[u8; 16]>,
    /// 15-bit short MAC of `dec_seed`.
    pub dec_seed_hash: u16,
    /// 15-bit short MAC of the padded device-id input.
    pub device_id_hash: u16,
    /// `true` for a 40-hex-character device id, `false` for 32 decimal.
    pub is_smartphone: bool,
    /// Decimal PIN, empty or 4-8 digits, blended into the displayed code.
    pub pin: String,
    /// 2-bit auxiliary PIN-mode field (independent of `flags`'s copy).
    pub pinmode: u8,
}

impl Drop for Token {
    fn drop(&mut self) {
        if let Some(seed) = self.dec_seed.as_mut() {
            seed.zeroize();
        }
    }
}

impl Token {
    /// Whether this token requires a user-supplied PIN to display a
    /// correct tokencode.
    pub fn pin_required(&self) -> bool {
        self.flags.pin_required()
    }

    /// Whether decrypting the seed requires a password.
    pub fn pass_required(&self) -> bool {
        self.flags.pass_required()
    }

    /// Whether decrypting the seed requires a device id.
    pub fn devid_required(&self) -> bool {
        self.flags.devid_required()
    }

    /// Days until expiry as of `now` (Unix seconds); negative means expired.
    ///
    /// A roughly 12-hour grace period past the last valid day is applied,
    /// matching how other SecurID soft-token implementations behave.
    pub fn check_exp(&self, now: i64) -> i64 {
        let mut exp_unix_time = SECURID_EPOCH + (self.exp_date as i64 + 1) * SECONDS_PER_DAY;
        exp_unix_time += SECONDS_PER_HALF_DAY;
        (exp_unix_time - now) / SECONDS_PER_DAY
    }

    /// Render an ordered sequence of human-readable `(key, value)` pairs
    /// describing this token, in the same order the reference
    /// implementation's `securid_token_info` callback would emit them.
    pub fn info(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        out.push(("Serial number", self.serial.clone()));

        if let Some(dec_seed) = self.dec_seed {
            out.push(("Decrypted seed", hex_with_spaces(&dec_seed)));
        }

        if let Some(enc_seed) = self.enc_seed {
            out.push(("Encrypted seed", hex_with_spaces(&enc_seed)));
            out.push((
                "Encrypted w/password",
                yes_no(self.flags.pass_required()),
            ));
            out.push(("Encrypted w/devid", yes_no(self.flags.devid_required())));
        }

        let exp_unix_time = SECURID_EPOCH + (self.exp_date as i64 + 1) * SECONDS_PER_DAY;
        out.push(("Expiration date", format_ymd(exp_unix_time)));

        out.push((
            "Key length",
            if self.flags.is_128bit() { "128" } else { "64" }.to_string(),
        ));
        out.push(("Tokencode digits", self.flags.digits().to_string()));
        out.push(("PIN mode", self.flags.pin_mode().to_string()));
        out.push((
            "Seconds per tokencode",
            match self.flags.seconds_per_tokencode() {
                Some(s) => s.to_string(),
                None => "unknown".to_string(),
            },
        ));

        out.push(("Feature bit 3", yes_no(self.flags.contains(Flags::FEAT3))));
        out.push(("Feature bit 4", yes_no(self.flags.contains(Flags::FEAT4))));
        out.push(("Feature bit 5", yes_no(self.flags.contains(Flags::FEAT5))));
        out.push(("Feature bit 6", yes_no(self.flags.contains(Flags::FEAT6))));

        out
    }
}

fn yes_no(b: bool) -> String {
    if b { "yes" } else { "no" }.to_string()
}

fn hex_with_spaces(bytes: &[u8; 16]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a Unix timestamp as `YYYY/MM/DD` in UTC.
fn format_ymd(unix_time: i64) -> String {
    match chrono::DateTime::from_timestamp(unix_time, 0) {
        Some(dt) => dt.format("%Y/%m/%d").to_string(),
        None => "unknown".to_string(),
    }
}
