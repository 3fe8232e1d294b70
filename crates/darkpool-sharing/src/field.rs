//! Arithmetic over the computation field GF(p).
//!
//! The secure-computation layer works in a prime field small enough for
//! single-word shares: `p` is a 64-bit prime, so every share fits a `u64`
//! and all intermediates fit a `u128`. Every non-zero element has a
//! multiplicative inverse, computed by Fermat exponentiation.
//!
//! This module performs no validation of sharing-specific parameters such
//! as thresholds or share indices; those checks live in [`crate::shamir`].

use std::ops::{Add, Mul, Neg, Sub};

/// The computation field modulus. Part of the protocol: every pool member
/// must use the same prime or reconstructed values diverge.
pub const FIELD_MODULUS: u64 = 17_012_364_981_921_935_471;

/// An element of GF([`FIELD_MODULUS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldElement(u64);

impl FieldElement {
    pub const ZERO: Self = FieldElement(0);
    pub const ONE: Self = FieldElement(1);

    /// Constructs a field element, reducing modulo the field modulus.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value % FIELD_MODULUS)
    }

    /// Returns the canonical `u64` representation.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Square-and-multiply exponentiation.
    #[must_use]
    pub fn pow(self, mut exp: u64) -> Self {
        let mut base = self;
        let mut acc = Self::ONE;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            exp >>= 1;
        }
        acc
    }

    /// Multiplicative inverse: `a^(p-2)`. `None` for zero, which has no
    /// inverse.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.pow(FIELD_MODULUS - 2))
        }
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let sum = (u128::from(self.0) + u128::from(rhs.0)) % u128::from(FIELD_MODULUS);
        #[allow(clippy::cast_possible_truncation)]
        Self(sum as u64)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let diff =
            (u128::from(self.0) + u128::from(FIELD_MODULUS) - u128::from(rhs.0)) % u128::from(FIELD_MODULUS);
        #[allow(clippy::cast_possible_truncation)]
        Self(diff as u64)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let prod = (u128::from(self.0) * u128::from(rhs.0)) % u128::from(FIELD_MODULUS);
        #[allow(clippy::cast_possible_truncation)]
        Self(prod as u64)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_reduces() {
        assert_eq!(FieldElement::new(FIELD_MODULUS).value(), 0);
        assert_eq!(FieldElement::new(FIELD_MODULUS + 7).value(), 7);
    }

    #[test]
    fn addition_wraps() {
        let a = FieldElement::new(FIELD_MODULUS - 1);
        assert_eq!((a + FieldElement::ONE).value(), 0);
        assert_eq!((a + FieldElement::new(5)).value(), 4);
    }

    #[test]
    fn subtraction_wraps() {
        let a = FieldElement::new(3);
        let b = FieldElement::new(10);
        assert_eq!((a - b).value(), FIELD_MODULUS - 7);
        assert_eq!((b - a).value(), 7);
    }

    #[test]
    fn inverse_round_trips() {
        for v in [1u64, 2, 3, 12345, FIELD_MODULUS - 1] {
            let a = FieldElement::new(v);
            let inv = a.inverse().unwrap();
            assert_eq!((a * inv).value(), 1, "v = {v}");
        }
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(FieldElement::ZERO.inverse().is_none());
    }

    #[test]
    fn negation_is_additive_inverse() {
        let a = FieldElement::new(42);
        assert_eq!((a + (-a)).value(), 0);
    }
}
