use crate::EncodingError;

/// A private or public key that is not usable on secp256k1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidKeyError {
    /// Key material of the wrong length.
    #[error("expected a {expected}-byte key, got {actual} bytes")]
    Length {
        /// Required length.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// Private scalar is zero or not less than the curve order.
    #[error("private key is zero or not less than the secp256k1 curve order")]
    OutOfRange,
    /// Public key bytes do not describe a curve point.
    #[error("public key is not a valid secp256k1 point")]
    PublicKey,
    /// An account's public key does not belong to its private key.
    #[error("account public key does not match its private key")]
    PublicKeyMismatch,
}

/// Errors that can occur while resolving a key or signing a bundle.
///
/// All of these are raised before any signature is produced.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// No account in the source matches the requested signer address.
    #[error("no account found for signer address {address}")]
    KeyResolution {
        /// The address that was looked up.
        address: String,
    },
    /// The signing key is malformed.
    #[error("invalid signing key: {0}")]
    InvalidKey(#[from] InvalidKeyError),
    /// A transaction could not be decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// The account source itself failed.
    #[error("account source error: {0}")]
    AccountSource(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The ECDSA backend refused to sign.
    #[error(transparent)]
    Ecdsa(#[from] k256::ecdsa::Error),
}

impl SigningError {
    /// Create a new [`SigningError::KeyResolution`].
    pub fn key_resolution(address: impl Into<String>) -> Self {
        Self::KeyResolution { address: address.into() }
    }

    /// True if no account matched the signer address.
    pub const fn is_key_resolution(&self) -> bool {
        matches!(self, Self::KeyResolution { .. })
    }

    /// True if the key material was malformed.
    pub const fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey(_))
    }
}

/// Errors returned when checking a bundle signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The embedded public key is malformed.
    #[error(transparent)]
    PublicKey(#[from] InvalidKeyError),
    /// `r` or `s` is zero or not less than the curve order.
    #[error("signature r or s is out of range")]
    MalformedSignature,
    /// `s` is in the upper half of the curve order.
    #[error("signature s is not normalized to the lower half of the curve order")]
    HighS,
    /// The signature does not cover this digest under this key.
    #[error("signature does not match the bundle digest")]
    Mismatch,
    /// The signed transactions could not be decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
