//! The 16-bit flag word carried alongside the seed.
//!
//! Single-bit flags are modeled with `bitflags`; the digit-count,
//! PIN-mode, and seconds-per-tokencode fields are multi-bit subranges of
//! the same word and get their own shift/mask constants, following the
//! `FLD_*_SHIFT`/`FLD_*_MASK` naming the reference implementation uses.
//!
//! Those subfield bits are not declared as members of the `Flags` union,
//! so callers must build a `Flags` value with `from_bits_retain` rather
//! than `from_bits_truncate` — truncate silently drops any bit outside
//! the declared union, which would zero out the digit-count/PIN-mode/
//! seconds-per-tokencode fields on every construction.

use bitflags::bitflags;

bitflags! {
    /// Single-bit flags within the token's flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u16 {
        /// Seed is encrypted under a password-derived key.
        const PASSPROT = 0x0001;
        /// Seed is bound to a specific device id.
        const SNPROT   = 0x0004;
        /// Informational feature bit 3.
        const FEAT3    = 0x0008;
        /// Informational feature bit 4.
        const FEAT4    = 0x0010;
        /// Informational feature bit 5.
        const FEAT5    = 0x0020;
        /// Informational feature bit 6.
        const FEAT6    = 0x0040;
        /// 128-bit seed length indicator.
        const BIT128   = 0x0080;
    }
}

/// Shift/mask of the tokencode digit-count subfield (value = digits - 1).
pub const DIGIT_SHIFT: u16 = 8;
pub const DIGIT_MASK: u16 = 0x0300;

/// Shift/mask of the PIN-mode subfield (>= 2 means a PIN is required).
pub const PINMODE_SHIFT: u16 = 10;
pub const PINMODE_MASK: u16 = 0x0c00;

/// Shift/mask of the seconds-per-tokencode subfield (0 => 30s, 1 => 60s).
pub const NUMSECONDS_SHIFT: u16 = 12;
pub const NUMSECONDS_MASK: u16 = 0x1000;

impl Flags {
    /// Number of digits the tokencode should be displayed with.
    pub fn digits(self) -> u8 {
        (((self.bits() & DIGIT_MASK) >> DIGIT_SHIFT) + 1) as u8
    }

    /// Raw PIN-mode value (0-3); `>= 2` means a PIN is required.
    pub fn pin_mode(self) -> u8 {
        ((self.bits() & PINMODE_MASK) >> PINMODE_SHIFT) as u8
    }

    /// Whether the token requires a PIN to compute a displayable tokencode.
    pub fn pin_required(self) -> bool {
        self.pin_mode() >= 2
    }

    /// Whether the seed is protected by a password.
    pub fn pass_required(self) -> bool {
        self.contains(Flags::PASSPROT)
    }

    /// Whether the seed is bound to a device id.
    pub fn devid_required(self) -> bool {
        self.contains(Flags::SNPROT)
    }

    /// Seconds per tokencode interval, or `None` for an unrecognized value.
    pub fn seconds_per_tokencode(self) -> Option<u8> {
        match (self.bits() & NUMSECONDS_MASK) >> NUMSECONDS_SHIFT {
            0 => Some(30),
            1 => Some(60),
            _ => None,
        }
    }

    /// Whether the 128-bit seed length indicator is set.
    pub fn is_128bit(self) -> bool {
        self.contains(Flags::BIT128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_required_threshold_is_two() {
        let mode0 = Flags::from_bits_retain(0 << PINMODE_SHIFT);
        let mode1 = Flags::from_bits_retain(1 << PINMODE_SHIFT);
        let mode2 = Flags::from_bits_retain(2 << PINMODE_SHIFT);
        let mode3 = Flags::from_bits_retain(3 << PINMODE_SHIFT);
        assert!(!mode0.pin_required());
        assert!(!mode1.pin_required());
        assert!(mode2.pin_required());
        assert!(mode3.pin_required());
    }

    #[test]
    fn numseconds_field_maps_to_30_or_60() {
        let thirty = Flags::from_bits_retain(0 << NUMSECONDS_SHIFT);
        let sixty = Flags::from_bits_retain(1 << NUMSECONDS_SHIFT);
        assert_eq!(thirty.seconds_per_tokencode(), Some(30));
        assert_eq!(sixty.seconds_per_tokencode(), Some(60));
    }

    #[test]
    fn pass_and_devid_required_reflect_single_bits() {
        let both = Flags::PASSPROT | Flags::SNPROT;
        assert!(both.pass_required());
        assert!(both.devid_required());
        assert!(!Flags::FEAT3.pass_required());
    }
}
