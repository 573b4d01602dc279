mod account;
pub use account::{Account, AccountSource};

mod error;
pub use error::{InvalidKeyError, SigningError, VerifyError};

use crate::{
    bundle::bundle_digest, BundleSignature, CompactSignature, CompressedPublicKey,
    SentinelBundle, SignedBundle,
};
use alloy::primitives::B256;
use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey, VerifyingKey};
use tracing::{debug, instrument, warn};

/// Length of a raw secp256k1 private key.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Signs bundles with a secp256k1 key.
///
/// The key is resolved once, either from raw private key bytes or from an
/// [`AccountSource`], after which signing is pure computation. The signer
/// holds no other state and may be shared across tasks.
///
/// Signatures are computed over the SHA-256 digest of the bundle's canonical
/// encoding, with RFC 6979 nonces and `s` normalized to the lower half of
/// the curve order.
#[derive(Clone)]
pub struct BundleSigner {
    key: SigningKey,
    pub_key: CompressedPublicKey,
}

impl core::fmt::Debug for BundleSigner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BundleSigner").field("pub_key", &self.pub_key).finish_non_exhaustive()
    }
}

impl From<SigningKey> for BundleSigner {
    fn from(key: SigningKey) -> Self {
        Self::from_signing_key(key)
    }
}

impl BundleSigner {
    /// Create a signer from a k256 signing key.
    pub fn from_signing_key(key: SigningKey) -> Self {
        let pub_key = CompressedPublicKey::from_verifying_key(key.verifying_key());
        Self { key, pub_key }
    }

    /// Create a signer from a raw 32-byte private key.
    ///
    /// Fails if the key is the wrong length, zero, or not less than the
    /// curve order.
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, SigningError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(
                InvalidKeyError::Length { expected: PRIVATE_KEY_LEN, actual: bytes.len() }.into()
            );
        }
        SigningKey::from_slice(bytes)
            .map(Self::from_signing_key)
            .map_err(|_| InvalidKeyError::OutOfRange.into())
    }

    /// Create a signer from an account record, checking that the account's
    /// public key (if any) belongs to its private key.
    pub fn from_account(account: &Account) -> Result<Self, SigningError> {
        let signer = Self::from_private_key(account.private_key().as_slice())?;

        if !account.public_key().is_empty() {
            let claimed = VerifyingKey::from_sec1_bytes(account.public_key())
                .map_err(|_| InvalidKeyError::PublicKey)?;
            if &claimed != signer.key.verifying_key() {
                return Err(InvalidKeyError::PublicKeyMismatch.into());
            }
        }

        Ok(signer)
    }

    /// Resolve a signer by querying an [`AccountSource`] for `address`.
    ///
    /// Fails with [`SigningError::KeyResolution`] if no account matches.
    #[instrument(skip_all, fields(address = %address))]
    pub async fn from_account_source<S>(source: &S, address: &str) -> Result<Self, SigningError>
    where
        S: AccountSource + ?Sized,
    {
        let accounts =
            source.accounts().await.map_err(|err| SigningError::AccountSource(Box::new(err)))?;

        let Some(account) = accounts.iter().find(|account| account.address() == address) else {
            warn!(accounts = accounts.len(), "No account found for signer address");
            return Err(SigningError::key_resolution(address));
        };

        debug!("Resolved bundle signer from account source");
        Self::from_account(account)
    }

    /// The compressed public key of this signer.
    pub const fn pub_key(&self) -> &CompressedPublicKey {
        &self.pub_key
    }

    /// Sign a 32-byte digest, returning a low-s compact signature.
    pub fn sign_digest(&self, digest: &B256) -> Result<CompactSignature, SigningError> {
        let sig: Signature = self.key.sign_prehash(digest.as_slice())?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Ok(CompactSignature::from_signature(&sig))
    }

    /// Sign an ordered list of raw transactions.
    #[instrument(skip_all, fields(txs = txs.len()))]
    pub fn sign<T: AsRef<[u8]>>(&self, txs: &[T]) -> Result<BundleSignature, SigningError> {
        let digest = bundle_digest(txs);
        let signature = self.sign_digest(&digest)?;
        debug!(%digest, "Signed bundle");
        Ok(BundleSignature { pub_key: self.pub_key, signature })
    }

    /// Sign a bundle, producing the payload for transport. Transactions are
    /// base64 encoded in bundle order.
    pub fn sign_bundle(&self, bundle: &SentinelBundle) -> Result<SignedBundle, SigningError> {
        let signature = self.sign(bundle.txs())?;
        Ok(SignedBundle::new(bundle.to_base64_txs(), signature))
    }

    /// Sign base64 encoded transactions. The strings are carried into the
    /// [`SignedBundle`] exactly as given.
    pub fn sign_base64<S: AsRef<str>>(&self, txs: &[S]) -> Result<SignedBundle, SigningError> {
        let bundle = SentinelBundle::from_base64(txs)?;
        let signature = self.sign(bundle.txs())?;
        Ok(SignedBundle::new(txs.iter().map(|tx| tx.as_ref().to_owned()).collect(), signature))
    }
}

/// Sign a bundle with a raw 32-byte private key.
pub fn sign_bundle_with_key(
    bundle: &SentinelBundle,
    private_key: &[u8],
) -> Result<SignedBundle, SigningError> {
    BundleSigner::from_private_key(private_key)?.sign_bundle(bundle)
}

/// Sign a bundle with the account matching `address` in `source`.
pub async fn sign_bundle_with_account<S>(
    bundle: &SentinelBundle,
    source: &S,
    address: &str,
) -> Result<SignedBundle, SigningError>
where
    S: AccountSource + ?Sized,
{
    BundleSigner::from_account_source(source, address).await?.sign_bundle(bundle)
}
