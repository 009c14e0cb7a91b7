use crate::chain::ChainError;
use crate::constants::{INVALID_PRICE_UPDATE_ABORT_CODE, INVALID_PRICE_UPDATE_MESSAGE};
use crate::oracle::OracleError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Any failure of a mint attempt. The display text is the raw message of the failing step.
#[derive(Debug, Error)]
pub enum MintError {
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl MintError {
    pub fn abort_code(&self) -> Option<u64> {
        match self {
            MintError::Oracle(_) => None,
            MintError::Chain(err) => err.abort_code(),
        }
    }

    /// Text that came from the oracle or the node, if any.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            MintError::Oracle(OracleError::InvalidAttestationFormat(message)) => Some(message),
            MintError::Oracle(OracleError::Network(_)) => None,
            MintError::Chain(err) => err.node_message(),
        }
    }
}

/// Human readable replacements for known contract abort codes.
///
/// An error matches a code if the transaction aborted with it, or if the message reported by the
/// oracle or the node mentions it in `0x` hex form. Errors without a match are shown unchanged.
#[derive(Debug, Clone)]
pub struct AbortMessages {
    messages: BTreeMap<u64, String>,
}

impl AbortMessages {
    pub fn empty() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, code: u64, message: impl Into<String>) -> &mut Self {
        self.messages.insert(code, message.into());
        self
    }

    pub fn get(&self, code: u64) -> Option<&str> {
        self.messages.get(&code).map(String::as_str)
    }

    pub fn normalize(&self, error: &MintError) -> String {
        if let Some(message) = error.abort_code().and_then(|code| self.get(code)) {
            return message.to_string();
        }
        let remote_message = error.remote_message().unwrap_or_default();
        let signature = self
            .messages
            .iter()
            .find(|(code, _)| remote_message.contains(&format!("{code:#x}")));
        match signature {
            Some((_, message)) => message.clone(),
            None => error.to_string(),
        }
    }
}

impl Default for AbortMessages {
    fn default() -> Self {
        let mut messages = Self::empty();
        messages.register(INVALID_PRICE_UPDATE_ABORT_CODE, INVALID_PRICE_UPDATE_MESSAGE);
        messages
    }
}
