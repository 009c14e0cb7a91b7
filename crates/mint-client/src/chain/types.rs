use crate::payload::MintIntent;
use mint_primitives::hash::{AccountAddress, TransactionHash};
use serde_json::Value;
use std::fmt;

/// Fully qualified entry point: `{module_address}::{module_name}::{function_name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunctionId {
    pub module_address: AccountAddress,
    pub module_name: String,
    pub function_name: String,
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.module_address, self.module_name, self.function_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFunctionArgument {
    U64(u64),
    /// `vector<vector<u8>>`
    ByteVectors(Vec<Vec<u8>>),
}

impl EntryFunctionArgument {
    /// JSON form accepted by the node REST API: integers wider than 32 bits are decimal
    /// strings and byte vectors are `0x`-prefixed hex strings.
    pub fn to_json(&self) -> Value {
        match self {
            EntryFunctionArgument::U64(value) => Value::String(value.to_string()),
            EntryFunctionArgument::ByteVectors(vectors) => Value::Array(
                vectors
                    .iter()
                    .map(|bytes| Value::String(format!("0x{}", hex::encode(bytes))))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunctionCall {
    pub function: EntryFunctionId,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<EntryFunctionArgument>,
}

impl EntryFunctionCall {
    /// Call of the mint entry point: `(u64 amount, vector<vector<u8>> price_update_data)`.
    pub fn mint(function: EntryFunctionId, intent: MintIntent) -> Self {
        Self {
            function,
            type_arguments: Vec::new(),
            arguments: vec![
                EntryFunctionArgument::U64(intent.amount_usd),
                EntryFunctionArgument::ByteVectors(intent.payload.into_updates()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
    pub payload: EntryFunctionCall,
}

/// A built transaction together with the exact bytes the sender has to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub raw: RawTransaction,
    pub signing_message: Vec<u8>,
}

/// A transaction that was included and executed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTransaction {
    pub hash: TransactionHash,
    pub version: Option<u64>,
    pub vm_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::PriceAttestation;
    use crate::payload::encode;
    use serde_json::json;

    fn mint_function() -> EntryFunctionId {
        EntryFunctionId {
            module_address: AccountAddress::from([0x43; 32]),
            module_name: "btc_pegged_coin".to_string(),
            function_name: "mint_coins".to_string(),
        }
    }

    #[test]
    fn entry_function_id_is_fully_qualified() {
        assert_eq!(
            mint_function().to_string(),
            format!("0x{}::btc_pegged_coin::mint_coins", "43".repeat(32))
        );
    }

    #[test]
    fn mint_call_carries_amount_and_single_price_update() {
        // Given
        let attestation = PriceAttestation::from_hex("a1b2").unwrap();
        let intent = MintIntent::new(100, encode(&attestation));

        // When
        let call = EntryFunctionCall::mint(mint_function(), intent);

        // Then
        assert!(call.type_arguments.is_empty());
        assert_eq!(
            call.arguments,
            vec![
                EntryFunctionArgument::U64(100),
                EntryFunctionArgument::ByteVectors(vec![vec![0xa1, 0xb2]]),
            ]
        );
    }

    #[test]
    fn arguments_use_rest_api_json_encoding() {
        let amount = EntryFunctionArgument::U64(u64::MAX);
        let updates = EntryFunctionArgument::ByteVectors(vec![vec![0xa1, 0xb2], vec![]]);

        assert_eq!(amount.to_json(), json!("18446744073709551615"));
        assert_eq!(updates.to_json(), json!(["0xa1b2", "0x"]));
    }
}
