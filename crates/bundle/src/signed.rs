//! Signature material and the signed bundle sent to the sentinel.
use crate::{bundle::bundle_digest, EncodingError, InvalidKeyError, SentinelBundle, VerifyError};
use alloy::primitives::{hex, B256};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use k256::{
    ecdsa::{signature::hazmat::PrehashVerifier, Signature, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Length of a SEC1 compressed secp256k1 public key.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// Length of a compact `r || s` signature.
pub const COMPACT_SIGNATURE_LEN: usize = 64;

/// A SEC1 compressed secp256k1 public key: a `0x02` or `0x03` parity byte
/// followed by the 32-byte x coordinate.
///
/// Serialized as a base64 string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedPublicKey([u8; COMPRESSED_PUBLIC_KEY_LEN]);

impl CompressedPublicKey {
    /// Compress a verifying key.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.as_affine().to_encoded_point(true);
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }

    /// Parse a compressed key, checking that it is a point on the curve.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, InvalidKeyError> {
        let bytes: [u8; COMPRESSED_PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            InvalidKeyError::Length { expected: COMPRESSED_PUBLIC_KEY_LEN, actual: bytes.len() }
        })?;
        let key = Self(bytes);
        key.to_verifying_key()?;
        Ok(key)
    }

    /// The raw compressed bytes.
    pub const fn as_bytes(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.0
    }

    /// True if the point's y coordinate is odd.
    pub const fn is_odd_y(&self) -> bool {
        self.0[0] == 0x03
    }

    /// Decompress into a verifying key.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, InvalidKeyError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| InvalidKeyError::PublicKey)
    }
}

impl core::fmt::Debug for CompressedPublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CompressedPublicKey").field(&hex::encode_prefixed(self.0)).finish()
    }
}

impl AsRef<[u8]> for CompressedPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&VerifyingKey> for CompressedPublicKey {
    fn from(key: &VerifyingKey) -> Self {
        Self::from_verifying_key(key)
    }
}

/// A compact ECDSA signature: `r` then `s`, each a 32-byte big-endian
/// integer. Signatures produced by this crate always have a low `s`.
///
/// Serialized as a base64 string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactSignature([u8; COMPACT_SIGNATURE_LEN]);

impl CompactSignature {
    /// Wrap raw `r || s` bytes.
    pub const fn from_bytes(bytes: [u8; COMPACT_SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a k256 signature.
    pub fn from_signature(sig: &Signature) -> Self {
        let mut bytes = [0u8; COMPACT_SIGNATURE_LEN];
        bytes.copy_from_slice(&sig.to_bytes());
        Self(bytes)
    }

    /// The raw `r || s` bytes.
    pub const fn as_bytes(&self) -> &[u8; COMPACT_SIGNATURE_LEN] {
        &self.0
    }

    /// The `r` component.
    pub fn r(&self) -> B256 {
        B256::from_slice(&self.0[..32])
    }

    /// The `s` component.
    pub fn s(&self) -> B256 {
        B256::from_slice(&self.0[32..])
    }

    /// Parse into a k256 signature. Fails if `r` or `s` is zero or not less
    /// than the curve order.
    pub fn to_signature(&self) -> Result<Signature, VerifyError> {
        Signature::from_slice(&self.0).map_err(|_| VerifyError::MalformedSignature)
    }
}

impl core::fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CompactSignature").field(&hex::encode_prefixed(self.0)).finish()
    }
}

impl AsRef<[u8]> for CompactSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Signature> for CompactSignature {
    fn from(sig: Signature) -> Self {
        Self::from_signature(&sig)
    }
}

/// Serialize fixed-size byte wrappers as base64 strings.
macro_rules! base64_serde {
    ($ty:ty, $parse:expr) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&B64.encode(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                let bytes = B64.decode(s).map_err(de::Error::custom)?;
                $parse(bytes.as_slice()).map_err(de::Error::custom)
            }
        }
    };
}

base64_serde!(CompressedPublicKey, CompressedPublicKey::from_slice);
base64_serde!(CompactSignature, |bytes: &[u8]| {
    <[u8; COMPACT_SIGNATURE_LEN]>::try_from(bytes)
        .map(CompactSignature)
        .map_err(|_| {
            format!("expected {COMPACT_SIGNATURE_LEN} signature bytes, got {}", bytes.len())
        })
});

/// A bundle signature together with the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSignature {
    /// Compressed public key of the signer.
    pub pub_key: CompressedPublicKey,
    /// Compact low-s signature over the bundle digest.
    pub signature: CompactSignature,
}

impl BundleSignature {
    /// Check the signature against a bundle digest.
    ///
    /// High-s signatures are rejected.
    pub fn verify_digest(&self, digest: &B256) -> Result<(), VerifyError> {
        let key = self.pub_key.to_verifying_key()?;
        let sig = self.signature.to_signature()?;
        if sig.normalize_s().is_some() {
            return Err(VerifyError::HighS);
        }
        key.verify_prehash(digest.as_slice(), &sig).map_err(|_| VerifyError::Mismatch)
    }

    /// Check the signature against an ordered list of raw transactions.
    pub fn verify<T: AsRef<[u8]>>(&self, txs: &[T]) -> Result<(), VerifyError> {
        self.verify_digest(&bundle_digest(txs))
    }
}

/// A signed bundle, ready for transport.
///
/// Transactions are carried individually as base64 strings, in the order
/// they were signed over. The signature covers their canonical encoding, so
/// reordering them invalidates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedBundle {
    /// Base64 encoded transactions.
    transactions: Vec<String>,
    /// Signer public key and signature.
    #[serde(flatten)]
    signature: BundleSignature,
}

impl SignedBundle {
    pub(crate) const fn new(transactions: Vec<String>, signature: BundleSignature) -> Self {
        Self { transactions, signature }
    }

    /// The base64 encoded transactions, in signing order.
    pub fn transactions(&self) -> &[String] {
        self.transactions.as_slice()
    }

    /// The compressed public key of the signer.
    pub const fn pub_key(&self) -> &CompressedPublicKey {
        &self.signature.pub_key
    }

    /// The compact signature.
    pub const fn signature(&self) -> &CompactSignature {
        &self.signature.signature
    }

    /// The key and signature together.
    pub const fn bundle_signature(&self) -> &BundleSignature {
        &self.signature
    }

    /// Decompose into transactions and signature.
    pub fn into_parts(self) -> (Vec<String>, BundleSignature) {
        (self.transactions, self.signature)
    }

    /// Decode the transactions back into a [`SentinelBundle`].
    pub fn decode_bundle(&self) -> Result<SentinelBundle, EncodingError> {
        SentinelBundle::from_base64(&self.transactions)
    }

    /// Recompute the digest the signature should cover.
    pub fn digest(&self) -> Result<B256, EncodingError> {
        self.decode_bundle().map(|bundle| bundle.digest())
    }

    /// Check that the signature covers these transactions in this order.
    pub fn verify(&self) -> Result<(), VerifyError> {
        self.signature.verify_digest(&self.digest()?)
    }
}
