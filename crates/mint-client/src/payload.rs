use crate::oracle::PriceAttestation;

/// Price update argument in the shape the mint entry point declares: `vector<vector<u8>>`.
///
/// The oracle emits one flat byte string per feed, while the contract accepts a collection of
/// updates. A mint only ever carries a single feed, so the collection always has one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPricePayload {
    updates: Vec<Vec<u8>>,
}

impl EncodedPricePayload {
    pub fn updates(&self) -> &[Vec<u8>] {
        &self.updates
    }

    pub fn into_updates(self) -> Vec<Vec<u8>> {
        self.updates
    }
}

/// Wraps the attestation bytes as the single element of the update collection.
///
/// Empty attestations are passed through; validating them is up to the contract.
pub fn encode(attestation: &PriceAttestation) -> EncodedPricePayload {
    EncodedPricePayload {
        updates: vec![attestation.as_bytes().to_vec()],
    }
}

/// The complete argument set of one mint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintIntent {
    pub amount_usd: u64,
    pub payload: EncodedPricePayload,
}

impl MintIntent {
    pub fn new(amount_usd: u64, payload: EncodedPricePayload) -> Self {
        Self {
            amount_usd,
            payload,
        }
    }
}
