use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use mint_primitives::hash::AccountAddress;
use sha3::{Digest, Sha3_256};
use std::fmt;

/// Authentication key scheme byte for single ed25519 keys.
const ED25519_SCHEME: u8 = 0x00;

/// The account and key that authorize mint transactions.
///
/// Loaded once at startup and only read afterwards. Only one mint attempt is in flight at a
/// time, so the account's sequence number is never raced on.
pub struct SigningIdentity {
    signing_key: SigningKey,
    account_address: AccountAddress,
}

impl SigningIdentity {
    /// Uses the address derived from the key, which is the account address unless the
    /// account's key has been rotated.
    pub fn from_key(signing_key: SigningKey) -> Self {
        let account_address = derive_account_address(&signing_key.verifying_key());
        Self {
            signing_key,
            account_address,
        }
    }

    pub fn with_address(signing_key: SigningKey, account_address: AccountAddress) -> Self {
        Self {
            signing_key,
            account_address,
        }
    }

    pub fn account_address(&self) -> &AccountAddress {
        &self.account_address
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("account_address", &self.account_address)
            .field("public_key", &hex::encode(self.public_key().as_bytes()))
            .finish_non_exhaustive()
    }
}

/// `sha3_256(public_key || 0x00)`
pub fn derive_account_address(public_key: &VerifyingKey) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key.as_bytes());
    hasher.update([ED25519_SCHEME]);
    let digest: [u8; 32] = hasher.finalize().into();
    AccountAddress::from(digest)
}
