//! # darkpool-types
//!
//! Shared types, errors, and configuration for the darkpool node.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`NetworkId`], [`NodeAddress`], [`MultiAddress`], [`EpochHash`],
//!   [`OrderId`], [`FragmentId`], [`DeltaId`], [`Message`]
//! - **Order model**: [`Order`], [`Parity`], [`OrderType`], [`Settlement`], [`Token`], [`TokenPair`]
//! - **Sharing model**: [`Share`], [`OrderFragment`]
//! - **Delta model**: [`Delta`], [`MatchEvent`]
//! - **Epoch model**: [`Epoch`], [`Pool`], [`Pools`]
//! - **Configuration**: [`NodeConfig`], [`NetworkConfig`], [`EpochConfig`]
//! - **Errors**: [`DarkpoolError`] with `DP_ERR_` prefix codes
//! - **Constants**: system-wide defaults
//!
//! Orders, fragments, and deltas are value data: they are copied across
//! task boundaries and never shared mutably.

pub mod config;
pub mod constants;
pub mod delta;
pub mod epoch;
pub mod error;
pub mod fragment;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use darkpool_types::{Order, OrderFragment, Delta, ...};

pub use config::*;
pub use delta::*;
pub use epoch::*;
pub use error::*;
pub use fragment::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `darkpool_types::constants::FOO`
// (not re-exported to avoid name collisions).
