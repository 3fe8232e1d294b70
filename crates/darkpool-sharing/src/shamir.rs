//! (k, n)-threshold secret sharing over the computation field.
//!
//! A secret is the constant term of a random polynomial of degree `k − 1`;
//! share `i` is the polynomial evaluated at `x = i`. Any `k` shares
//! reconstruct the secret by Lagrange interpolation at zero; any `k − 1`
//! shares are distributed independently of the secret — the secrecy is
//! information-theoretic, not computational.

use darkpool_types::{DarkpoolError, Result, Share};
use rand::Rng;

use crate::field::{FIELD_MODULUS, FieldElement};

/// Split `secret` into `n` shares, any `k` of which reconstruct it.
///
/// Requires `1 <= k <= n` and `secret < FIELD_MODULUS`. The polynomial
/// coefficients are freshly sampled, so two splits of the same secret
/// produce unrelated shares.
pub fn split<R: Rng + ?Sized>(secret: u64, n: u64, k: u64, rng: &mut R) -> Result<Vec<Share>> {
    if k < 1 || k > n {
        return Err(DarkpoolError::InvalidThreshold { n, k });
    }
    if secret >= FIELD_MODULUS {
        return Err(DarkpoolError::SecretOutOfField { value: secret });
    }

    // f(x) = secret + a_1 x + ... + a_{k-1} x^{k-1}
    let mut coefficients = Vec::with_capacity(usize::try_from(k).unwrap_or(usize::MAX));
    coefficients.push(FieldElement::new(secret));
    for _ in 1..k {
        coefficients.push(FieldElement::new(rng.gen_range(0..FIELD_MODULUS)));
    }

    Ok((1..=n)
        .map(|index| Share {
            index,
            value: evaluate(&coefficients, FieldElement::new(index)).value(),
        })
        .collect())
}

/// Reconstruct the secret from shares by Lagrange interpolation at zero.
///
/// Callers must supply at least `k` shares from one split for the result
/// to equal the original secret; this function cannot tell a short or
/// mixed subset apart from a valid one — it only rejects structurally
/// invalid input (no shares, zero or duplicate indices).
pub fn join(shares: &[Share]) -> Result<u64> {
    if shares.is_empty() {
        return Err(DarkpoolError::InvalidShares { reason: "no shares supplied".into() });
    }
    for (i, share) in shares.iter().enumerate() {
        if share.index == 0 {
            return Err(DarkpoolError::InvalidShares { reason: "share index zero".into() });
        }
        if shares[..i].iter().any(|other| other.index == share.index) {
            return Err(DarkpoolError::InvalidShares {
                reason: format!("duplicate share index {}", share.index),
            });
        }
    }

    let xs: Vec<FieldElement> = shares.iter().map(|s| FieldElement::new(s.index)).collect();
    let mut acc = FieldElement::ZERO;
    for (i, share) in shares.iter().enumerate() {
        let lambda = lagrange_coefficient(&xs, i)?;
        acc = acc + FieldElement::new(share.value) * lambda;
    }
    Ok(acc.value())
}

/// λ_i(0) = Π_{j≠i} x_j / (x_j − x_i).
fn lagrange_coefficient(xs: &[FieldElement], i: usize) -> Result<FieldElement> {
    let mut numerator = FieldElement::ONE;
    let mut denominator = FieldElement::ONE;
    for (j, &x_j) in xs.iter().enumerate() {
        if i != j {
            numerator = numerator * x_j;
            denominator = denominator * (x_j - xs[i]);
        }
    }
    let inv = denominator.inverse().ok_or_else(|| DarkpoolError::InvalidShares {
        reason: "repeated evaluation point".into(),
    })?;
    Ok(numerator * inv)
}

/// Horner evaluation of the coefficient vector at `x`.
fn evaluate(coefficients: &[FieldElement], x: FieldElement) -> FieldElement {
    let mut acc = FieldElement::ZERO;
    for &c in coefficients.iter().rev() {
        acc = acc * x + c;
    }
    acc
}
