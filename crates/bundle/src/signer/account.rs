use crate::CompressedPublicKey;
use alloy::{
    primitives::{Bytes, B256},
    signers::local::PrivateKeySigner,
};
use core::{convert::Infallible, future::Future};
use k256::ecdsa::SigningKey;

/// Key material for one account held by an [`AccountSource`].
///
/// The private key is never printed by the [`Debug`] implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Address the account is looked up by.
    address: String,
    /// Raw private scalar.
    private_key: B256,
    /// SEC1 public key, compressed or not. Empty if the source does not
    /// report one.
    public_key: Bytes,
}

impl core::fmt::Debug for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl Account {
    /// Create a new account record.
    pub fn new(
        address: impl Into<String>,
        private_key: B256,
        public_key: impl Into<Bytes>,
    ) -> Self {
        Self { address: address.into(), private_key, public_key: public_key.into() }
    }

    /// Create an account record from a signing key. The public key is stored
    /// in compressed form.
    pub fn from_signing_key(address: impl Into<String>, key: &SigningKey) -> Self {
        let public_key = CompressedPublicKey::from_verifying_key(key.verifying_key());
        Self::new(
            address,
            B256::from_slice(&key.to_bytes()),
            Bytes::copy_from_slice(public_key.as_bytes()),
        )
    }

    /// The account address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The SEC1 public key reported by the source.
    pub const fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    pub(crate) const fn private_key(&self) -> &B256 {
        &self.private_key
    }
}

/// A source of signing accounts, queried by address when a bundle is signed
/// with an external signer.
///
/// Implementors may hit the network or disk. The query is made once per
/// signing call and is never retried.
pub trait AccountSource {
    /// The error type returned when the accounts cannot be listed.
    type Error: core::error::Error + Send + Sync + 'static;

    /// List every account the source holds.
    fn accounts(&self) -> impl Future<Output = Result<Vec<Account>, Self::Error>> + Send;
}

impl AccountSource for Vec<Account> {
    type Error = Infallible;

    async fn accounts(&self) -> Result<Vec<Account>, Self::Error> {
        Ok(self.clone())
    }
}

impl AccountSource for Account {
    type Error = Infallible;

    async fn accounts(&self) -> Result<Vec<Account>, Self::Error> {
        Ok(vec![self.clone()])
    }
}

/// A local signer holds a single account, addressed by its checksummed EVM
/// address.
impl AccountSource for PrivateKeySigner {
    type Error = Infallible;

    async fn accounts(&self) -> Result<Vec<Account>, Self::Error> {
        Ok(vec![Account::from_signing_key(self.address().to_checksum(None), self.credential())])
    }
}
