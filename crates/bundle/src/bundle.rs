//! Sentinel bundle types.
use crate::{encode, EncodingError};
use alloy::primitives::{Bytes, B256};
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An ordered bundle of already-signed transactions.
///
/// Transactions are opaque byte strings. Their order is the execution order
/// the sentinel is asked to honor, and it is preserved through encoding,
/// hashing and the wire payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentinelBundle {
    /// The transactions, in execution order.
    txs: Vec<Bytes>,
}

impl SentinelBundle {
    /// Create a bundle from raw transactions.
    pub const fn new(txs: Vec<Bytes>) -> Self {
        Self { txs }
    }

    /// Create a bundle from base64 encoded transactions.
    ///
    /// Fails on the first string that does not decode, reporting its index.
    pub fn from_base64<S: AsRef<str>>(txs: &[S]) -> Result<Self, EncodingError> {
        txs.iter()
            .enumerate()
            .map(|(index, tx)| {
                B64.decode(tx.as_ref())
                    .map(Bytes::from)
                    .map_err(|err| EncodingError::base64(index, err))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Split a canonical encoding back into a bundle.
    pub fn from_canonical_bytes(buf: &[u8]) -> Result<Self, EncodingError> {
        encode::decode(buf).map(Self::new)
    }

    /// Returns the transactions in this bundle.
    pub fn txs(&self) -> &[Bytes] {
        self.txs.as_slice()
    }

    /// Append a transaction to the end of the bundle.
    pub fn push_tx(&mut self, tx: impl Into<Bytes>) {
        self.txs.push(tx.into());
    }

    /// Number of transactions in the bundle.
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    /// True if the bundle holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// Consume the bundle, returning its transactions.
    pub fn into_txs(self) -> Vec<Bytes> {
        self.txs
    }

    /// The canonical byte encoding that bundle signatures commit to.
    pub fn canonical_bytes(&self) -> Bytes {
        encode::encode(&self.txs)
    }

    /// SHA-256 of [`Self::canonical_bytes`].
    pub fn digest(&self) -> B256 {
        bundle_digest(&self.txs)
    }

    /// Base64 encode each transaction, in order, for the wire payload.
    pub fn to_base64_txs(&self) -> Vec<String> {
        self.txs.iter().map(|tx| B64.encode(tx)).collect()
    }
}

impl From<Vec<Bytes>> for SentinelBundle {
    fn from(txs: Vec<Bytes>) -> Self {
        Self::new(txs)
    }
}

impl FromIterator<Bytes> for SentinelBundle {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// SHA-256 of the canonical encoding of `txs`.
pub fn bundle_digest<T: AsRef<[u8]>>(txs: &[T]) -> B256 {
    let mut buf = Vec::with_capacity(encode::encoded_len(txs));
    encode::encode_to(txs, &mut buf);
    B256::from_slice(&Sha256::digest(&buf))
}
