use crate::chain::{self, ChainClient, EntryFunctionId, SigningIdentity};
use crate::config::MintConfig;
use crate::errors::{AbortMessages, MintError};
use crate::oracle::PriceOracle;
use crate::payload::{self, MintIntent};
use mint_primitives::hash::{PriceFeedId, TransactionHash};
use std::fmt;
use tokio::sync::{watch, Mutex};

/// Progress of the current (or last) mint attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintState {
    Idle,
    Fetching,
    Encoding,
    Submitting,
    AwaitingFinality,
    Success(TransactionHash),
    /// Carries the message shown to the user.
    Failed(String),
}

impl MintState {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            MintState::Fetching
                | MintState::Encoding
                | MintState::Submitting
                | MintState::AwaitingFinality
        )
    }
}

impl fmt::Display for MintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintState::Idle => write!(f, "idle"),
            MintState::Fetching => write!(f, "fetching price update"),
            MintState::Encoding => write!(f, "encoding price update"),
            MintState::Submitting => write!(f, "submitting transaction"),
            MintState::AwaitingFinality => write!(f, "awaiting finality"),
            MintState::Success(_) => write!(f, "success"),
            MintState::Failed(_) => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    Success(TransactionHash),
    Failed(String),
    /// Another attempt was already running. Nothing was done.
    InProgress,
}

/// Runs mint attempts: fetch a price attestation, encode it and submit the mint transaction.
///
/// At most one attempt runs at a time. Every state change is published to the receivers
/// returned by [`MintFlow::subscribe`].
pub struct MintFlow<O, C> {
    oracle: O,
    chain: C,
    identity: SigningIdentity,
    price_feed_id: PriceFeedId,
    mint_function: EntryFunctionId,
    amount_usd: u64,
    abort_messages: AbortMessages,
    state: watch::Sender<MintState>,
    /// Held for the whole duration of an attempt.
    attempt: Mutex<()>,
}

impl<O, C> MintFlow<O, C>
where
    O: PriceOracle + Sync,
    C: ChainClient + Sync,
{
    pub fn new(oracle: O, chain: C, identity: SigningIdentity, config: &MintConfig) -> Self {
        Self {
            oracle,
            chain,
            identity,
            price_feed_id: config.price_feed_id.clone(),
            mint_function: config.mint_function.clone(),
            amount_usd: config.amount_usd,
            abort_messages: AbortMessages::default(),
            state: watch::Sender::new(MintState::Idle),
            attempt: Mutex::new(()),
        }
    }

    pub fn with_abort_messages(mut self, abort_messages: AbortMessages) -> Self {
        self.abort_messages = abort_messages;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<MintState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MintState {
        self.state.borrow().clone()
    }

    /// Discards the result of the last attempt. Returns `false` while an attempt is running.
    pub fn reset(&self) -> bool {
        match self.attempt.try_lock() {
            Ok(_attempt) => {
                self.transition(MintState::Idle);
                true
            }
            Err(_) => false,
        }
    }

    /// Runs one mint attempt to completion.
    ///
    /// Returns [`MintOutcome::InProgress`] right away if an attempt is already running.
    /// Otherwise the previous result is discarded by publishing [`MintState::Idle`] before the
    /// attempt moves on to [`MintState::Fetching`].
    pub async fn mint(&self) -> MintOutcome {
        let Ok(_attempt) = self.attempt.try_lock() else {
            tracing::debug!(target: "mint", "mint attempt already in progress");
            return MintOutcome::InProgress;
        };
        self.transition(MintState::Idle);
        self.transition(MintState::Fetching);

        match self.run().await {
            Ok(hash) => {
                tracing::info!(target: "mint", tx_hash = %hash, "mint succeeded");
                self.transition(MintState::Success(hash.clone()));
                MintOutcome::Success(hash)
            }
            Err(err) => {
                let message = self.abort_messages.normalize(&err);
                tracing::warn!(target: "mint", error = %err, %message, "mint failed");
                self.transition(MintState::Failed(message.clone()));
                MintOutcome::Failed(message)
            }
        }
    }

    async fn run(&self) -> Result<TransactionHash, MintError> {
        let attestation = self
            .oracle
            .fetch_latest_attestation(&self.price_feed_id)
            .await?;

        self.transition(MintState::Encoding);
        let intent = MintIntent::new(self.amount_usd, payload::encode(&attestation));

        self.transition(MintState::Submitting);
        let hash = chain::submit_mint(
            &self.chain,
            &self.identity,
            &self.mint_function,
            intent,
            |_| self.transition(MintState::AwaitingFinality),
        )
        .await?;
        Ok(hash)
    }

    fn transition(&self, state: MintState) {
        tracing::debug!(target: "mint", %state, "mint state changed");
        self.state.send_replace(state);
    }
}
