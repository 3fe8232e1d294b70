//! # darkpool-sharing
//!
//! **Encoding and secret sharing for darkpool orders.**
//!
//! This crate turns a sensitive order into field-computable shares and
//! back:
//!
//! - [`field`]: arithmetic over the 64-bit prime computation field
//! - [`shamir`]: (k, n)-threshold sharing with information-theoretic secrecy
//! - [`coexp`]: exact bounded fixed-point (coefficient, exponent) codecs
//! - [`split`]: per-field order splitting into [`darkpool_types::OrderFragment`]s
//! - [`delta`]: share-wise order comparison and delta reconstruction
//!
//! Everything here is pure computation — no I/O, no shared state.

pub mod coexp;
pub mod delta;
pub mod field;
pub mod shamir;
pub mod split;

pub use coexp::CoExp;
pub use delta::{DeltaFragment, join_delta_fragments};
pub use field::{FIELD_MODULUS, FieldElement};
pub use shamir::{join, split};
pub use split::{ReconstructedOrder, join_fragments, split_order};
