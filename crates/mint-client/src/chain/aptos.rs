//! [`ChainClient`] backed by the Aptos node REST API.
//!
//! https://fullnode.testnet.aptoslabs.com/v1/spec

use super::{
    ChainClient, ChainError, ChainOp, CommittedTransaction, EntryFunctionCall, RawTransaction,
    SigningIdentity, UnsignedTransaction,
};
use crate::constants::{
    DEFAULT_EXPIRATION_SECS, DEFAULT_MAX_GAS_AMOUNT, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_SEC,
};
use ed25519_dalek::{Signature, VerifyingKey};
use http::StatusCode;
use mint_primitives::hash::{AccountAddress, TransactionHash};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::time::{Duration, Instant};
use url::Url;

const ENTRY_FUNCTION_PAYLOAD_TYPE: &str = "entry_function_payload";
const ED25519_SIGNATURE_TYPE: &str = "ed25519_signature";
const PENDING_TRANSACTION_TYPE: &str = "pending_transaction";
const MICROS_PER_SECOND: u64 = 1_000_000;

/// Public networks and their full node endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    Local,
}

impl Network {
    pub fn node_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.aptoslabs.com/v1/",
            Network::Testnet => "https://fullnode.testnet.aptoslabs.com/v1/",
            Network::Devnet => "https://fullnode.devnet.aptoslabs.com/v1/",
            Network::Local => "http://127.0.0.1:8080/v1/",
        }
    }
}

/// Per-transaction parameters and the finality wait behaviour of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSettings {
    pub max_gas_amount: u64,
    /// Transactions expire this long after the ledger timestamp observed while building.
    pub expiration_secs: u64,
    pub poll_interval: Duration,
    pub wait_timeout: Duration,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            wait_timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SEC),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AptosRestClient {
    client: reqwest::Client,
    base_url: Url,
    settings: TransactionSettings,
}

impl AptosRestClient {
    pub fn new(base_url: Url, settings: TransactionSettings) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, settings)
    }

    pub fn with_client(
        client: reqwest::Client,
        mut base_url: Url,
        settings: TransactionSettings,
    ) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client,
            base_url,
            settings,
        }
    }

    fn url(&self, path: &str) -> Result<Url, RequestError> {
        self.base_url
            .join(path)
            .map_err(|err| RequestError::Decode(format!("invalid request path {path}: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self
            .client
            .get(self.url(path)?)
            .send()
            .await
            .map_err(RequestError::Transport)?;
        read_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestError> {
        let response = self
            .client
            .post(self.url(path)?)
            .json(body)
            .send()
            .await
            .map_err(RequestError::Transport)?;
        read_response(response).await
    }

    /// Polls the transaction until it leaves the pending state. Unknown hashes are polled as
    /// well, since a node may not have indexed a transaction it just accepted.
    async fn poll_until_committed(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionView, ChainError> {
        let path = format!("transactions/by_hash/{hash}");
        loop {
            match self.get_json::<TransactionView>(&path).await {
                Ok(view) if view.kind != PENDING_TRANSACTION_TYPE => return Ok(view),
                Ok(_) => {}
                Err(RequestError::Rejected { status, .. }) if status == StatusCode::NOT_FOUND => {}
                Err(err) => {
                    return Err(err.during(ChainOp::TransactionByHash, |message| {
                        ChainError::UnexpectedResponse {
                            op: ChainOp::TransactionByHash,
                            message,
                        }
                    }))
                }
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

impl ChainClient for AptosRestClient {
    async fn build(
        &self,
        sender: &AccountAddress,
        call: EntryFunctionCall,
    ) -> Result<UnsignedTransaction, ChainError> {
        let ledger: LedgerInfo = self
            .get_json("")
            .await
            .map_err(|err| err.during(ChainOp::LedgerInfo, ChainError::Build))?;
        let account: AccountResource = self
            .get_json(&format!("accounts/{sender}"))
            .await
            .map_err(|err| err.during(ChainOp::AccountSequenceNumber, ChainError::Build))?;
        let gas: GasEstimate = self
            .get_json("estimate_gas_price")
            .await
            .map_err(|err| err.during(ChainOp::EstimateGasPrice, ChainError::Build))?;

        let raw = RawTransaction {
            sender: sender.clone(),
            sequence_number: account.sequence_number,
            max_gas_amount: self.settings.max_gas_amount,
            gas_unit_price: gas.gas_estimate,
            expiration_timestamp_secs: ledger.ledger_timestamp / MICROS_PER_SECOND
                + self.settings.expiration_secs,
            chain_id: ledger.chain_id,
            payload: call,
        };

        let encoded: String = self
            .post_json("transactions/encode_submission", &TransactionRequest::from(&raw))
            .await
            .map_err(|err| err.during(ChainOp::EncodeSubmission, ChainError::Build))?;
        let signing_message = hex::decode(encoded.trim_start_matches("0x")).map_err(|err| {
            ChainError::Build(format!("{}: invalid signing message: {err}", ChainOp::EncodeSubmission))
        })?;

        Ok(UnsignedTransaction {
            raw,
            signing_message,
        })
    }

    async fn sign_and_submit(
        &self,
        identity: &SigningIdentity,
        transaction: UnsignedTransaction,
    ) -> Result<TransactionHash, ChainError> {
        let signature = identity.sign(&transaction.signing_message);
        let request = SubmitTransactionRequest {
            transaction: TransactionRequest::from(&transaction.raw),
            signature: SignatureJson::ed25519(&identity.public_key(), &signature),
        };

        let pending: PendingTransaction = self
            .post_json("transactions", &request)
            .await
            .map_err(|err| err.during(ChainOp::SubmitTransaction, ChainError::Submission))?;

        tracing::info!(
            target: "mint",
            tx_hash = %pending.hash,
            sender = %transaction.raw.sender,
            sequence_number = transaction.raw.sequence_number,
            "transaction accepted by node",
        );
        Ok(pending.hash)
    }

    async fn wait_for_transaction(
        &self,
        hash: &TransactionHash,
    ) -> Result<CommittedTransaction, ChainError> {
        let started = Instant::now();
        let view = tokio::time::timeout(self.settings.wait_timeout, self.poll_until_committed(hash))
            .await
            .map_err(|_| ChainError::FinalityTimeout {
                hash: hash.clone(),
                timeout: self.settings.wait_timeout,
            })??;

        let vm_status = view.vm_status.unwrap_or_default();
        if view.success != Some(true) {
            return Err(ChainError::Execution {
                hash: hash.clone(),
                abort_code: parse_abort_code(&vm_status),
                vm_status,
            });
        }

        tracing::debug!(
            target: "mint",
            tx_hash = %hash,
            elapsed = %humantime::format_duration(started.elapsed()),
            "transaction committed",
        );
        Ok(CommittedTransaction {
            hash: view.hash,
            version: view.version,
            vm_status,
        })
    }
}

/// Extracts the abort code from a VM status such as
/// `Move abort in 0x7e78...::pyth: EINVALID_ARGUMENT(0x60008): ...`.
///
/// The module location is skipped, so the first hex literal after it is the code.
pub fn parse_abort_code(vm_status: &str) -> Option<u64> {
    let (_, abort) = vm_status.split_once("Move abort")?;
    let detail = abort.split_once(": ").map_or(abort, |(_, detail)| detail);
    detail
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter_map(|token| token.strip_prefix("0x"))
        .filter(|digits| !digits.is_empty() && digits.len() <= 16)
        .find_map(|digits| u64::from_str_radix(digits, 16).ok())
}

#[derive(Debug)]
enum RequestError {
    Transport(reqwest::Error),
    Rejected { status: StatusCode, message: String },
    Decode(String),
}

impl RequestError {
    /// Transport failures become [`ChainError::Network`]; everything else is reported through
    /// `rejected`, which decides the step the failure is attributed to.
    fn during(self, op: ChainOp, rejected: impl FnOnce(String) -> ChainError) -> ChainError {
        match self {
            RequestError::Transport(source) => ChainError::Network { op, source },
            RequestError::Rejected { status, message } => {
                rejected(format!("{op}: {message} (status {status})"))
            }
            RequestError::Decode(message) => rejected(format!("{op}: {message}")),
        }
    }
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    let status = response.status();
    let body = response.bytes().await.map_err(RequestError::Transport)?;
    if !status.is_success() {
        let message = match serde_json::from_slice::<ErrorResponse>(&body) {
            Ok(error) => error.describe(),
            Err(_) => String::from_utf8_lossy(&body).into_owned(),
        };
        return Err(RequestError::Rejected { status, message });
    }
    serde_json::from_slice(&body)
        .map_err(|err| RequestError::Decode(format!("unexpected response body: {err}")))
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
    error_code: Option<String>,
    vm_error_code: Option<u64>,
}

impl ErrorResponse {
    fn describe(self) -> String {
        match (self.error_code, self.vm_error_code) {
            (Some(code), Some(vm_code)) => format!("{} [{code}, vm error {vm_code}]", self.message),
            (Some(code), None) => format!("{} [{code}]", self.message),
            (None, _) => self.message,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct LedgerInfo {
    chain_id: u8,
    /// Microseconds since the unix epoch.
    #[serde_as(as = "DisplayFromStr")]
    ledger_timestamp: u64,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct AccountResource {
    #[serde_as(as = "DisplayFromStr")]
    sequence_number: u64,
}

#[derive(Debug, Deserialize)]
struct GasEstimate {
    gas_estimate: u64,
}

#[derive(Debug, Deserialize)]
struct PendingTransaction {
    hash: TransactionHash,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct TransactionView {
    #[serde(rename = "type")]
    kind: String,
    hash: TransactionHash,
    #[serde(default)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    version: Option<u64>,
    success: Option<bool>,
    vm_status: Option<String>,
}

/// Body of `POST /transactions/encode_submission`, and the unsigned part of
/// `POST /transactions`.
#[serde_as]
#[derive(Debug, Serialize)]
struct TransactionRequest {
    sender: AccountAddress,
    #[serde_as(as = "DisplayFromStr")]
    sequence_number: u64,
    #[serde_as(as = "DisplayFromStr")]
    max_gas_amount: u64,
    #[serde_as(as = "DisplayFromStr")]
    gas_unit_price: u64,
    #[serde_as(as = "DisplayFromStr")]
    expiration_timestamp_secs: u64,
    payload: EntryFunctionPayload,
}

impl From<&RawTransaction> for TransactionRequest {
    fn from(raw: &RawTransaction) -> Self {
        Self {
            sender: raw.sender.clone(),
            sequence_number: raw.sequence_number,
            max_gas_amount: raw.max_gas_amount,
            gas_unit_price: raw.gas_unit_price,
            expiration_timestamp_secs: raw.expiration_timestamp_secs,
            payload: EntryFunctionPayload::from(&raw.payload),
        }
    }
}

#[derive(Debug, Serialize)]
struct EntryFunctionPayload {
    #[serde(rename = "type")]
    kind: &'static str,
    function: String,
    type_arguments: Vec<String>,
    arguments: Vec<serde_json::Value>,
}

impl From<&EntryFunctionCall> for EntryFunctionPayload {
    fn from(call: &EntryFunctionCall) -> Self {
        Self {
            kind: ENTRY_FUNCTION_PAYLOAD_TYPE,
            function: call.function.to_string(),
            type_arguments: call.type_arguments.clone(),
            arguments: call.arguments.iter().map(|arg| arg.to_json()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitTransactionRequest {
    #[serde(flatten)]
    transaction: TransactionRequest,
    signature: SignatureJson,
}

#[derive(Debug, Serialize)]
struct SignatureJson {
    #[serde(rename = "type")]
    kind: &'static str,
    public_key: String,
    signature: String,
}

impl SignatureJson {
    fn ed25519(public_key: &VerifyingKey, signature: &Signature) -> Self {
        Self {
            kind: ED25519_SIGNATURE_TYPE,
            public_key: format!("0x{}", hex::encode(public_key.as_bytes())),
            signature: format!("0x{}", hex::encode(signature.to_bytes())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::testing::unsigned_transaction;
    use crate::chain::{EntryFunctionArgument, EntryFunctionId};
    use assert_matches::assert_matches;
    use ed25519_dalek::{SigningKey, Verifier};
    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    const SENDER: [u8; 32] = [0x11; 32];
    const HASH: [u8; 32] = [0xab; 32];

    fn settings() -> TransactionSettings {
        TransactionSettings {
            max_gas_amount: 5_000,
            expiration_secs: 30,
            poll_interval: Duration::from_millis(10),
            wait_timeout: Duration::from_millis(500),
        }
    }

    fn client_for(server: &MockServer) -> AptosRestClient {
        AptosRestClient::new(Url::parse(&server.url("/v1")).unwrap(), settings())
    }

    fn mint_call() -> EntryFunctionCall {
        EntryFunctionCall {
            function: EntryFunctionId {
                module_address: AccountAddress::from([0x43; 32]),
                module_name: "btc_pegged_coin".to_string(),
                function_name: "mint_coins".to_string(),
            },
            type_arguments: vec![],
            arguments: vec![
                EntryFunctionArgument::U64(100),
                EntryFunctionArgument::ByteVectors(vec![vec![0xa1, 0xb2]]),
            ],
        }
    }

    fn mock_ledger_account_and_gas(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200).json_body(json!({
                "chain_id": 2,
                "epoch": "100",
                "ledger_version": "5000",
                "ledger_timestamp": "1700000000123456"
            }));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path(format!("/v1/accounts/{}", AccountAddress::from(SENDER)));
            then.status(200).json_body(json!({
                "sequence_number": "7",
                "authentication_key": format!("{}", AccountAddress::from(SENDER))
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/estimate_gas_price");
            then.status(200).json_body(json!({ "gas_estimate": 100 }));
        });
    }

    #[tokio::test]
    async fn build_assembles_transaction_from_node_state() {
        // Given
        let server = MockServer::start();
        mock_ledger_account_and_gas(&server);
        let encode_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/transactions/encode_submission")
                .json_body(json!({
                    "sender": format!("{}", AccountAddress::from(SENDER)),
                    "sequence_number": "7",
                    "max_gas_amount": "5000",
                    "gas_unit_price": "100",
                    "expiration_timestamp_secs": "1700000030",
                    "payload": {
                        "type": "entry_function_payload",
                        "function": format!("0x{}::btc_pegged_coin::mint_coins", "43".repeat(32)),
                        "type_arguments": [],
                        "arguments": ["100", ["0xa1b2"]]
                    }
                }));
            then.status(200).json_body(json!("0xdeadbeef"));
        });

        // When
        let transaction = client_for(&server)
            .build(&AccountAddress::from(SENDER), mint_call())
            .await
            .unwrap();

        // Then
        encode_mock.assert();
        assert_eq!(transaction.signing_message, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(transaction.raw.sequence_number, 7);
        assert_eq!(transaction.raw.gas_unit_price, 100);
        assert_eq!(transaction.raw.chain_id, 2);
        assert_eq!(transaction.raw.expiration_timestamp_secs, 1_700_000_030);
        assert_eq!(transaction.raw.payload, mint_call());
    }

    #[tokio::test]
    async fn build_fails_for_unknown_account() {
        // Given
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200)
                .json_body(json!({ "chain_id": 2, "ledger_timestamp": "1700000000000000" }));
        });
        server.mock(|when, then| {
            when.method(GET).path_contains("/v1/accounts/");
            then.status(404).json_body(json!({
                "message": "Account not found",
                "error_code": "account_not_found",
                "vm_error_code": null
            }));
        });
        let encode_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/transactions/encode_submission");
            then.status(200).json_body(json!("0x00"));
        });

        // When
        let result = client_for(&server)
            .build(&AccountAddress::from(SENDER), mint_call())
            .await;

        // Then
        assert_matches!(result, Err(ChainError::Build(message)) => {
            assert!(message.contains("Account not found"));
            assert!(message.contains("account_not_found"));
        });
        encode_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn build_reports_unreachable_node_as_network_error() {
        // Given
        // point to a closed socket address
        let client = AptosRestClient::new(Url::parse("http://127.0.0.1:0/v1").unwrap(), settings());

        // When
        let result = client.build(&AccountAddress::from(SENDER), mint_call()).await;

        // Then
        assert_matches!(
            result,
            Err(ChainError::Network {
                op: ChainOp::LedgerInfo,
                ..
            })
        );
    }

    #[tokio::test]
    async fn sign_and_submit_posts_signed_transaction() {
        // Given
        let server = MockServer::start();
        let identity = SigningIdentity::with_address(
            SigningKey::from_bytes(&[5; 32]),
            AccountAddress::from(SENDER),
        );
        let signing_message = b"APTOS::RawTransaction payload".to_vec();
        let expected_signature = identity.sign(&signing_message);
        let submit_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/transactions")
                .json_body_partial(
                    json!({
                        "sender": format!("{}", AccountAddress::from(SENDER)),
                        "sequence_number": "7",
                        "signature": {
                            "type": "ed25519_signature",
                            "public_key": format!("0x{}", hex::encode(identity.public_key().as_bytes())),
                            "signature": format!("0x{}", hex::encode(expected_signature.to_bytes()))
                        }
                    })
                    .to_string(),
                );
            then.status(202).json_body(json!({
                "hash": format!("{}", TransactionHash::from(HASH)),
                "sender": format!("{}", AccountAddress::from(SENDER))
            }));
        });
        let mut transaction = unsigned_transaction(AccountAddress::from(SENDER), mint_call());
        transaction.signing_message = signing_message.clone();

        // When
        let hash = client_for(&server)
            .sign_and_submit(&identity, transaction)
            .await
            .unwrap();

        // Then
        submit_mock.assert();
        assert_eq!(hash, TransactionHash::from(HASH));
        assert!(identity
            .public_key()
            .verify(&signing_message, &expected_signature)
            .is_ok());
    }

    #[tokio::test]
    async fn rejected_submission_is_submission_error() {
        // Given
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/transactions");
            then.status(400).json_body(json!({
                "message": "Invalid transaction: Type: Validation Code: SEQUENCE_NUMBER_TOO_OLD",
                "error_code": "vm_error",
                "vm_error_code": 3
            }));
        });
        let identity = SigningIdentity::from_key(SigningKey::from_bytes(&[5; 32]));
        let transaction = unsigned_transaction(identity.account_address().clone(), mint_call());

        // When
        let result = client_for(&server).sign_and_submit(&identity, transaction).await;

        // Then
        assert_matches!(result, Err(ChainError::Submission(message)) => {
            assert!(message.contains("SEQUENCE_NUMBER_TOO_OLD"));
        });
    }

    #[tokio::test]
    async fn wait_returns_committed_transaction() {
        // Given
        let server = MockServer::start();
        let hash = TransactionHash::from(HASH);
        server.mock(|when, then| {
            when.method(GET).path(format!("/v1/transactions/by_hash/{hash}"));
            then.status(200).json_body(json!({
                "type": "user_transaction",
                "hash": format!("{hash}"),
                "version": "123456",
                "success": true,
                "vm_status": "Executed successfully"
            }));
        });

        // When
        let committed = client_for(&server).wait_for_transaction(&hash).await.unwrap();

        // Then
        assert_eq!(committed.hash, hash);
        assert_eq!(committed.version, Some(123456));
        assert_eq!(committed.vm_status, "Executed successfully");
    }

    #[tokio::test]
    async fn wait_reports_abort_with_code() {
        // Given
        let server = MockServer::start();
        let hash = TransactionHash::from(HASH);
        let vm_status = format!(
            "Move abort in 0x{}::pyth: EINVALID_PRICE_UPDATE(0x60008): ",
            "7e".repeat(32)
        );
        {
            let vm_status = vm_status.clone();
            let hash = hash.clone();
            server.mock(move |when, then| {
                when.method(GET).path(format!("/v1/transactions/by_hash/{hash}"));
                then.status(200).json_body(json!({
                    "type": "user_transaction",
                    "hash": format!("{hash}"),
                    "version": "123457",
                    "success": false,
                    "vm_status": vm_status
                }));
            });
        }

        // When
        let result = client_for(&server).wait_for_transaction(&hash).await;

        // Then
        assert_matches!(
            result,
            Err(ChainError::Execution { abort_code: Some(0x60008), vm_status: status, .. }) => {
                assert_eq!(status, vm_status);
            }
        );
    }

    #[tokio::test]
    async fn wait_times_out_while_pending() {
        // Given
        let server = MockServer::start();
        let hash = TransactionHash::from(HASH);
        let mock = server.mock(|when, then| {
            when.method(GET).path(format!("/v1/transactions/by_hash/{hash}"));
            then.status(200).json_body(json!({
                "type": "pending_transaction",
                "hash": format!("{hash}")
            }));
        });

        // When
        let result = client_for(&server).wait_for_transaction(&hash).await;

        // Then
        assert_matches!(result, Err(ChainError::FinalityTimeout { .. }));
        assert!(mock.hits() > 1, "pending transactions are polled repeatedly");
    }

    #[tokio::test]
    async fn wait_keeps_polling_unknown_hash_until_timeout() {
        // Given
        let server = MockServer::start();
        let hash = TransactionHash::from(HASH);
        server.mock(|when, then| {
            when.method(GET).path(format!("/v1/transactions/by_hash/{hash}"));
            then.status(404).json_body(json!({
                "message": "Transaction not found",
                "error_code": "transaction_not_found",
                "vm_error_code": null
            }));
        });

        // When
        let result = client_for(&server).wait_for_transaction(&hash).await;

        // Then
        assert_matches!(result, Err(ChainError::FinalityTimeout { .. }));
    }

    #[rstest]
    #[case::with_reason(
        "Move abort in 0x7e783b349d3e89cf5931af376ebeadbfab855b3fa239b7ada8f5a92fbea6b387::pyth: EINVALID_ARGUMENT(0x60008): invalid",
        Some(0x60008)
    )]
    #[case::bare_code("Move abort in 0x1::coin: 0x10006", Some(0x10006))]
    #[case::short_module_address("Move abort in 0x1::coin: EINSUFFICIENT_BALANCE(0x10006): ", Some(0x10006))]
    #[case::decimal_code("Move abort in 0x1::coin: code 5", None)]
    #[case::success("Executed successfully", None)]
    #[case::out_of_gas("Out of gas", None)]
    fn abort_code_is_parsed_from_vm_status(#[case] vm_status: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_abort_code(vm_status), expected);
    }
}
