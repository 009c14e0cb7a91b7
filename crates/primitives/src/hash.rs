use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;
use derive_more::{AsRef, Deref, Into};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

const HEX_PREFIX: &str = "0x";

/// A 32 byte value rendered as `0x`-prefixed lowercase hex, tagged with a marker type so that
/// hashes, addresses and feed identifiers cannot be mixed up.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    Deref,
    AsRef,
    Into,
)]
pub struct Hash32<T> {
    #[deref]
    #[as_ref]
    #[into]
    bytes: [u8; 32],
    #[into(skip)]
    _marker: PhantomData<T>,
}

impl<T> From<[u8; 32]> for Hash32<T> {
    fn from(bytes: [u8; 32]) -> Self {
        Self {
            bytes,
            _marker: PhantomData,
        }
    }
}

impl<T> Hash32<T> {
    /// Converts the hash to a hexadecimal string representation, without prefix.
    pub fn as_hex(&self) -> String {
        hex::encode(self.as_ref())
    }
}

impl<T> fmt::Display for Hash32<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEX_PREFIX}{}", self.as_hex())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseHash32Error {
    #[error("expected 64 hex characters, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Accepts the value with or without a `0x` prefix.
impl<T> FromStr for Hash32<T> {
    type Err = ParseHash32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(HEX_PREFIX).unwrap_or(s);
        if digits.len() != 64 {
            return Err(ParseHash32Error::InvalidLength(digits.len()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self::from(bytes))
    }
}

// Marker types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transaction;
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account;
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriceFeed;

/// Hash of a transaction submitted to the chain.
pub type TransactionHash = Hash32<Transaction>;

/// On-chain account address. Also used for the address a contract module is published under.
pub type AccountAddress = Hash32<Account>;

/// Identifier of a price feed on the oracle network.
pub type PriceFeedId = Hash32<PriceFeed>;
