//! Deterministic keys for tests.
use alloy::signers::local::PrivateKeySigner;
use sentinel_bundle::{Account, BundleSigner};
use std::sync::LazyLock;

/// Raw private keys used in tests. Key `n` is 32 bytes of `n + 1`.
pub const TEST_KEYS: [[u8; 32]; 4] = [[1u8; 32], [2u8; 32], [3u8; 32], [4u8; 32]];

/// Bundle signers for [`TEST_KEYS`].
pub static TEST_SIGNERS: LazyLock<[BundleSigner; 4]> = LazyLock::new(|| {
    TEST_KEYS.map(|key| BundleSigner::from_private_key(&key).unwrap())
});

/// Local EVM signers for [`TEST_KEYS`].
pub static TEST_LOCAL_SIGNERS: LazyLock<[PrivateKeySigner; 4]> =
    LazyLock::new(|| TEST_KEYS.map(|key| PrivateKeySigner::from_slice(&key).unwrap()));

/// Address of test account `n` in [`test_accounts`].
pub fn test_address(n: usize) -> String {
    format!("sentinel1test{n}")
}

/// Accounts for [`TEST_KEYS`], addressed by [`test_address`].
pub fn test_accounts() -> Vec<Account> {
    TEST_LOCAL_SIGNERS
        .iter()
        .enumerate()
        .map(|(n, signer)| Account::from_signing_key(test_address(n), signer.credential()))
        .collect()
}
