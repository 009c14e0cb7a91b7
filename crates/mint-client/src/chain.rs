use crate::payload::MintIntent;
use mint_primitives::hash::{AccountAddress, TransactionHash};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub mod aptos;
pub mod signer;
mod types;

pub use signer::SigningIdentity;
pub use types::{
    CommittedTransaction, EntryFunctionArgument, EntryFunctionCall, EntryFunctionId,
    RawTransaction, UnsignedTransaction,
};

#[cfg(test)]
use mockall::automock;

/// The chain request that was in progress when a transport error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOp {
    LedgerInfo,
    AccountSequenceNumber,
    EstimateGasPrice,
    EncodeSubmission,
    SubmitTransaction,
    TransactionByHash,
}

impl fmt::Display for ChainOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainOp::LedgerInfo => write!(f, "fetching ledger info"),
            ChainOp::AccountSequenceNumber => write!(f, "fetching account sequence number"),
            ChainOp::EstimateGasPrice => write!(f, "estimating gas price"),
            ChainOp::EncodeSubmission => write!(f, "encoding transaction for signing"),
            ChainOp::SubmitTransaction => write!(f, "submitting transaction"),
            ChainOp::TransactionByHash => write!(f, "fetching transaction by hash"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain request failed while {op}: {source}")]
    Network {
        op: ChainOp,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build transaction: {0}")]
    Build(String),
    #[error("failed to submit transaction: {0}")]
    Submission(String),
    #[error("Transaction {hash} failed with an error: {vm_status}")]
    Execution {
        hash: TransactionHash,
        vm_status: String,
        abort_code: Option<u64>,
    },
    #[error("unexpected response while {op}: {message}")]
    UnexpectedResponse { op: ChainOp, message: String },
    #[error("transaction {hash} was not committed within {}", format_timeout(.timeout))]
    FinalityTimeout {
        hash: TransactionHash,
        timeout: Duration,
    },
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

impl ChainError {
    pub fn abort_code(&self) -> Option<u64> {
        match self {
            ChainError::Execution { abort_code, .. } => *abort_code,
            _ => None,
        }
    }

    /// The failure as reported by the node, without locally added context such as the
    /// transaction hash.
    pub fn node_message(&self) -> Option<&str> {
        match self {
            ChainError::Build(message)
            | ChainError::Submission(message)
            | ChainError::UnexpectedResponse { message, .. } => Some(message),
            ChainError::Execution { vm_status, .. } => Some(vm_status),
            ChainError::Network { .. } | ChainError::FinalityTimeout { .. } => None,
        }
    }
}

/// Client side of the three transaction steps. Each step suspends until the node answers and
/// fails independently of the others.
#[cfg_attr(test, automock)]
pub trait ChainClient {
    /// Builds an unsigned transaction for `call` sent by `sender`.
    fn build(
        &self,
        sender: &AccountAddress,
        call: EntryFunctionCall,
    ) -> impl Future<Output = Result<UnsignedTransaction, ChainError>> + Send;

    /// Signs and submits the transaction. Returns as soon as the node accepted it.
    fn sign_and_submit(
        &self,
        identity: &SigningIdentity,
        transaction: UnsignedTransaction,
    ) -> impl Future<Output = Result<TransactionHash, ChainError>> + Send;

    /// Waits until the transaction is committed. Fails if it was committed but aborted.
    fn wait_for_transaction(
        &self,
        hash: &TransactionHash,
    ) -> impl Future<Output = Result<CommittedTransaction, ChainError>> + Send;
}

/// Builds, signs, submits and awaits one mint transaction.
///
/// `on_submitted` is invoked once the node accepted the transaction and before waiting for it to
/// be committed. Nothing is submitted if building fails, and no wait happens if submission fails.
pub async fn submit_mint<C: ChainClient>(
    chain: &C,
    identity: &SigningIdentity,
    function: &EntryFunctionId,
    intent: MintIntent,
    on_submitted: impl FnOnce(&TransactionHash) + Send,
) -> Result<TransactionHash, ChainError> {
    let call = EntryFunctionCall::mint(function.clone(), intent);
    let transaction = chain.build(identity.account_address(), call).await?;
    tracing::debug!(
        target: "mint",
        sender = %transaction.raw.sender,
        sequence_number = transaction.raw.sequence_number,
        function = %function,
        "built transaction",
    );

    let hash = chain.sign_and_submit(identity, transaction).await?;
    on_submitted(&hash);

    let committed = chain.wait_for_transaction(&hash).await?;
    tracing::info!(
        target: "mint",
        tx_hash = %committed.hash,
        version = ?committed.version,
        vm_status = %committed.vm_status,
        "mint transaction committed",
    );
    Ok(hash)
}
