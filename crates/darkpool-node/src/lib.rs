//! The darkpool node core.
//!
//! Ties the data model, secret sharing, and network management together
//! into the epoch lifecycle: watch the registry, derive pool assignments
//! deterministically, keep two overlapping generations of computation
//! networks alive, and surface order matches.
//!
//! The two external boundaries are traits: [`Registry`] wraps the
//! on-chain registry contract and [`Computer`] supplies the multi-party
//! arithmetic a pool runs. Everything between them is this crate.

pub mod compute;
pub mod generation;
pub mod node;
pub mod pools;
pub mod registry;

pub use compute::Computer;
pub use generation::{Generation, GenerationRing};
pub use node::Node;
pub use pools::assign_pools;
pub use registry::Registry;
