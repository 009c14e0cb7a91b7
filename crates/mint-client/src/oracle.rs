use mint_primitives::hash::PriceFeedId;
use std::future::Future;
use thiserror::Error;

pub mod hermes;

#[cfg(test)]
use mockall::automock;

/// A signed price update for a single feed, as returned by the oracle network.
///
/// The timestamp and price are embedded in the blob and only interpreted by the receiving
/// contract. Attestations are fetched fresh for every mint attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceAttestation {
    bytes: Vec<u8>,
}

impl PriceAttestation {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decodes a hex encoded attestation, with or without a `0x` prefix.
    pub fn from_hex(data: &str) -> Result<Self, OracleError> {
        let digits = data.strip_prefix("0x").unwrap_or(data);
        let bytes = hex::decode(digits).map_err(|err| {
            OracleError::InvalidAttestationFormat(format!("attestation is not valid hex: {err}"))
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid price update data format: {0}")]
    InvalidAttestationFormat(String),
}

#[cfg_attr(test, automock)]
pub trait PriceOracle {
    /// Fetches the latest attestation for exactly one feed.
    fn fetch_latest_attestation(
        &self,
        feed_id: &PriceFeedId,
    ) -> impl Future<Output = Result<PriceAttestation, OracleError>> + Send;
}
