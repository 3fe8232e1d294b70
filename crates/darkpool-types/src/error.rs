//! Error types for the darkpool node.
//!
//! All errors use the `DP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Encoding errors
//! - 2xx: Secret-sharing errors
//! - 3xx: Network errors
//! - 4xx: Epoch / registry errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{NetworkId, NodeAddress};

/// Central error enum for all darkpool operations.
#[derive(Debug, Error)]
pub enum DarkpoolError {
    // =================================================================
    // Encoding Errors (1xx)
    // =================================================================
    /// The value cannot be represented exactly as a bounded CoExp pair.
    #[error("DP_ERR_100: value {value} is not exactly representable as {kind} CoExp")]
    NotRepresentable { kind: &'static str, value: u64 },

    /// The coefficient would exceed its bound.
    #[error("DP_ERR_101: {kind} coefficient {co} exceeds bound {bound}")]
    CoefficientOutOfRange { kind: &'static str, co: u64, bound: u64 },

    /// The exponent falls outside its bound.
    #[error("DP_ERR_102: {kind} exponent {exp} outside [{min}, {max}]")]
    ExponentOutOfRange { kind: &'static str, exp: u64, min: u64, max: u64 },

    /// Decoding produced a value that does not fit in 64 bits.
    #[error("DP_ERR_103: decoded {kind} value overflows u64")]
    DecodedValueOverflow { kind: &'static str },

    /// The coefficient/exponent pair does not decode to an integer.
    #[error("DP_ERR_104: {kind} CoExp ({co}, {exp}) does not decode to an integer")]
    InexactCoExp { kind: &'static str, co: u64, exp: u64 },

    // =================================================================
    // Secret-Sharing Errors (2xx)
    // =================================================================
    /// Split parameters must satisfy 1 <= k <= n.
    #[error("DP_ERR_200: invalid threshold: k = {k} not in [1, {n}]")]
    InvalidThreshold { n: u64, k: u64 },

    /// Reconstruction needs at least one share with distinct indices.
    #[error("DP_ERR_201: cannot join shares: {reason}")]
    InvalidShares { reason: String },

    /// Secrets must be elements of the computation field.
    #[error("DP_ERR_202: secret {value} is not below the field modulus")]
    SecretOutOfField { value: u64 },

    /// Fragments being combined disagree on order identity or indices.
    #[error("DP_ERR_203: fragment mismatch: {reason}")]
    FragmentMismatch { reason: String },

    // =================================================================
    // Network Errors (3xx)
    // =================================================================
    /// The named computation network is not connected.
    #[error("DP_ERR_300: unknown network {0}")]
    UnknownNetwork(NetworkId),

    /// The peer is not connected on the named network.
    #[error("DP_ERR_301: unknown peer {peer} on network {network}")]
    UnknownPeer { network: NetworkId, peer: NodeAddress },

    /// A connect or listen attempt for one peer failed.
    #[error("DP_ERR_302: cannot reach peer {peer}: {reason}")]
    PeerConnectionFailed { peer: NodeAddress, reason: String },

    /// Discovery could not resolve a peer address in time.
    #[error("DP_ERR_303: address query for {peer} failed: {reason}")]
    AddressQueryFailed { peer: NodeAddress, reason: String },

    /// Delivery to one peer failed inside a best-effort fan-out.
    #[error("DP_ERR_304: send to {peer} failed: {reason}")]
    SendFailed { peer: NodeAddress, reason: String },

    // =================================================================
    // Epoch / Registry Errors (4xx)
    // =================================================================
    /// Registration was never confirmed; fatal to the epoch stream.
    #[error("DP_ERR_400: registration not confirmed: {reason}")]
    RegistrationFailed { reason: String },

    /// The registry epoch watch reported an error; the loop continues.
    #[error("DP_ERR_401: registry watch error: {reason}")]
    RegistryWatch { reason: String },

    /// The registered node set could not be listed for this epoch.
    #[error("DP_ERR_402: cannot list registered nodes: {reason}")]
    NodeListUnavailable { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("DP_ERR_900: internal error: {0}")]
    Internal(String),

    /// A stream or channel closed unexpectedly.
    #[error("DP_ERR_901: channel closed: {0}")]
    ChannelClosed(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DarkpoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = DarkpoolError::InvalidThreshold { n: 4, k: 7 };
        let msg = format!("{err}");
        assert!(msg.starts_with("DP_ERR_200"), "got: {msg}");
        assert!(msg.contains('7'));
    }

    #[test]
    fn all_errors_have_dp_err_prefix() {
        let errors: Vec<DarkpoolError> = vec![
            DarkpoolError::NotRepresentable { kind: "volume", value: 3 },
            DarkpoolError::SecretOutOfField { value: u64::MAX },
            DarkpoolError::UnknownNetwork(NetworkId([0u8; 32])),
            DarkpoolError::RegistrationFailed { reason: "bond too low".into() },
            DarkpoolError::Internal("test".into()),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(msg.starts_with("DP_ERR_"), "error missing DP_ERR_ prefix: {msg}");
        }
    }
}
