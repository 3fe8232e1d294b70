//! CoExp fixed-point encoding.
//!
//! Large integer prices and volumes are re-encoded as a bounded
//! (coefficient, exponent) pair so they fit the computation field's
//! capacity. Two codecs exist, with different steps and bounds:
//!
//! - **volume**: value = co · 0.2 · 10^exp, co ∈ \[1, 49\], exp ≤ 52
//! - **price**:  value = co · 0.005 · 10^(exp − 26), co ∈ \[1, 1999\],
//!   exp ∈ \[26, 52\]
//!
//! Encoding is exact-or-error: a value that cannot be represented without
//! loss, or whose coefficient would exceed its bound, is a reported
//! encoding error — never a silent truncation. In return, decoding an
//! encoded value always reproduces it bit-exactly.

use serde::{Deserialize, Serialize};

use darkpool_types::{DarkpoolError, Result};

/// Largest volume coefficient (inclusive).
pub const VOLUME_CO_BOUND: u64 = 49;
/// Largest price coefficient (inclusive).
pub const PRICE_CO_BOUND: u64 = 1999;
/// Largest exponent either codec accepts (inclusive).
pub const MAX_EXP: u64 = 52;
/// Price exponents are biased by this offset.
pub const PRICE_EXP_OFFSET: u64 = 26;

/// A bounded (coefficient, exponent) pair: `co × 10^exp` in the codec's
/// step unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoExp {
    pub co: u64,
    pub exp: u64,
}

impl CoExp {
    /// Encode a volume magnitude.
    pub fn encode_volume(value: u64) -> Result<Self> {
        if value == 0 {
            return Ok(Self { co: 0, exp: 0 });
        }
        // value = co · 0.2 · 10^exp  ⇔  5·value = co · 10^exp
        let mut co = 5 * u128::from(value);
        let mut exp = 0u64;
        while co > u128::from(VOLUME_CO_BOUND) && co % 10 == 0 {
            co /= 10;
            exp += 1;
        }
        if co > u128::from(VOLUME_CO_BOUND) {
            return Err(DarkpoolError::NotRepresentable { kind: "volume", value });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self { co: co as u64, exp })
    }

    /// Decode a volume magnitude. Rejects out-of-bound pairs and pairs
    /// that do not decode to an integer.
    pub fn decode_volume(self) -> Result<u64> {
        if self.co == 0 {
            return Ok(0);
        }
        if self.co > VOLUME_CO_BOUND {
            return Err(DarkpoolError::CoefficientOutOfRange {
                kind: "volume",
                co: self.co,
                bound: VOLUME_CO_BOUND,
            });
        }
        if self.exp > MAX_EXP {
            return Err(DarkpoolError::ExponentOutOfRange {
                kind: "volume",
                exp: self.exp,
                min: 0,
                max: MAX_EXP,
            });
        }
        let scaled = pow10(self.exp, "volume")?
            .checked_mul(u128::from(self.co))
            .ok_or(DarkpoolError::DecodedValueOverflow { kind: "volume" })?;
        if scaled % 5 != 0 {
            return Err(DarkpoolError::InexactCoExp { kind: "volume", co: self.co, exp: self.exp });
        }
        u64::try_from(scaled / 5).map_err(|_| DarkpoolError::DecodedValueOverflow { kind: "volume" })
    }

    /// Encode a price magnitude.
    pub fn encode_price(value: u64) -> Result<Self> {
        if value == 0 {
            return Ok(Self { co: 0, exp: PRICE_EXP_OFFSET });
        }
        // value = co · 0.005 · 10^(exp − 26)  ⇔  200·value = co · 10^(exp − 26)
        let mut co = 200 * u128::from(value);
        let mut exp = PRICE_EXP_OFFSET;
        while co > u128::from(PRICE_CO_BOUND) && co % 10 == 0 {
            co /= 10;
            exp += 1;
        }
        if co > u128::from(PRICE_CO_BOUND) {
            return Err(DarkpoolError::NotRepresentable { kind: "price", value });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self { co: co as u64, exp })
    }

    /// Decode a price magnitude. Rejects out-of-bound pairs and pairs
    /// that do not decode to an integer.
    pub fn decode_price(self) -> Result<u64> {
        if self.co > PRICE_CO_BOUND {
            return Err(DarkpoolError::CoefficientOutOfRange {
                kind: "price",
                co: self.co,
                bound: PRICE_CO_BOUND,
            });
        }
        if self.exp < PRICE_EXP_OFFSET || self.exp > MAX_EXP {
            return Err(DarkpoolError::ExponentOutOfRange {
                kind: "price",
                exp: self.exp,
                min: PRICE_EXP_OFFSET,
                max: MAX_EXP,
            });
        }
        if self.co == 0 {
            return Ok(0);
        }
        let scaled = pow10(self.exp - PRICE_EXP_OFFSET, "price")?
            .checked_mul(u128::from(self.co))
            .ok_or(DarkpoolError::DecodedValueOverflow { kind: "price" })?;
        if scaled % 200 != 0 {
            return Err(DarkpoolError::InexactCoExp { kind: "price", co: self.co, exp: self.exp });
        }
        u64::try_from(scaled / 200).map_err(|_| DarkpoolError::DecodedValueOverflow { kind: "price" })
    }
}

fn pow10(exp: u64, kind: &'static str) -> Result<u128> {
    let exp = u32::try_from(exp).map_err(|_| DarkpoolError::DecodedValueOverflow { kind })?;
    10u128.checked_pow(exp).ok_or(DarkpoolError::DecodedValueOverflow { kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_vectors() {
        assert_eq!(CoExp::encode_volume(1_000_000_000_000).unwrap(), CoExp { co: 5, exp: 12 });
        assert_eq!(CoExp::encode_volume(100_000_000_000).unwrap(), CoExp { co: 5, exp: 11 });
        assert_eq!(CoExp::encode_volume(500_000_000_000).unwrap(), CoExp { co: 25, exp: 11 });
        assert_eq!(CoExp::encode_volume(5).unwrap(), CoExp { co: 25, exp: 0 });
    }

    #[test]
    fn volume_stays_within_bounds() {
        let coexp = CoExp::encode_volume(100_000_000_000_000_000).unwrap();
        assert!(coexp.co <= VOLUME_CO_BOUND);
        assert!(coexp.exp <= MAX_EXP);
    }

    #[test]
    fn price_vectors() {
        assert_eq!(CoExp::encode_price(1_000_000_000_000).unwrap(), CoExp { co: 200, exp: 38 });
        assert_eq!(CoExp::encode_price(100_000_000_000).unwrap(), CoExp { co: 200, exp: 37 });
        assert_eq!(CoExp::encode_price(500_000_000_000).unwrap(), CoExp { co: 1000, exp: 37 });
        assert_eq!(CoExp::encode_price(5).unwrap(), CoExp { co: 1000, exp: 26 });
    }

    #[test]
    fn inexact_values_are_rejected_not_truncated() {
        assert!(matches!(
            CoExp::encode_volume(4_999_999_999_999),
            Err(DarkpoolError::NotRepresentable { kind: "volume", .. })
        ));
        assert!(matches!(
            CoExp::encode_price(4_999_999_999_999),
            Err(DarkpoolError::NotRepresentable { kind: "price", .. })
        ));
    }

    #[test]
    fn round_trip_holds_for_every_accepted_value() {
        for value in [
            0u64,
            1,
            2,
            5,
            10,
            400,
            100_000_000_000,
            500_000_000_000,
            1_000_000_000_000,
            9_800_000_000_000_000_000,
        ] {
            if let Ok(coexp) = CoExp::encode_volume(value) {
                assert_eq!(coexp.decode_volume().unwrap(), value, "volume {value}");
            }
            if let Ok(coexp) = CoExp::encode_price(value) {
                assert_eq!(coexp.decode_price().unwrap(), value, "price {value}");
            }
        }
    }

    #[test]
    fn concrete_round_trip() {
        assert_eq!(CoExp { co: 5, exp: 12 }.decode_volume().unwrap(), 1_000_000_000_000);
        assert_eq!(CoExp { co: 200, exp: 38 }.decode_price().unwrap(), 1_000_000_000_000);
    }

    #[test]
    fn decode_rejects_out_of_bound_pairs() {
        assert!(CoExp { co: 50, exp: 0 }.decode_volume().is_err());
        assert!(CoExp { co: 5, exp: 53 }.decode_volume().is_err());
        assert!(CoExp { co: 2000, exp: 38 }.decode_price().is_err());
        assert!(CoExp { co: 200, exp: 25 }.decode_price().is_err());
    }

    #[test]
    fn decode_rejects_inexact_pairs() {
        // 24 · 10^0 / 5 and 3 · 10^0 / 200 are not integers.
        assert!(matches!(
            CoExp { co: 24, exp: 0 }.decode_volume(),
            Err(DarkpoolError::InexactCoExp { .. })
        ));
        assert!(matches!(
            CoExp { co: 3, exp: 26 }.decode_price(),
            Err(DarkpoolError::InexactCoExp { .. })
        ));
    }
}
