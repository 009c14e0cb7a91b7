use crate::chain::aptos::{Network, TransactionSettings};
use crate::chain::{EntryFunctionId, SigningIdentity};
use crate::constants::{
    BTC_USD_PRICE_FEED_ID, DEFAULT_EXPIRATION_SECS, DEFAULT_MAX_GAS_AMOUNT,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_SEC, HERMES_BETA_URL, MINT_AMOUNT_USD,
    MINT_FUNCTION_NAME, MINT_MODULE_ADDRESS, MINT_MODULE_NAME,
};
use anyhow::Context;
use ed25519_dalek::SigningKey;
use mint_primitives::hash::{AccountAddress, ParseHash32Error, PriceFeedId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no signing key configured, pass --private-key or set MINT_SIGNER_PRIVATE_KEY")]
    MissingSigningKey,
    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),
    #[error("invalid price feed id: {0}")]
    InvalidFeedId(#[source] ParseHash32Error),
    #[error("invalid module address: {0}")]
    InvalidModuleAddress(#[source] ParseHash32Error),
    #[error("invalid signer account address: {0}")]
    InvalidAccountAddress(#[source] ParseHash32Error),
    #[error("invalid {field} url: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// The contents of the optional YAML config file. Contains no secrets.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub chain: ChainConfig,
    pub oracle: OracleConfig,
    pub contract: ContractConfig,
    pub signer: SignerConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
    pub network: Network,
    /// Overrides the node url of `network`.
    pub node_url: Option<String>,
    pub max_gas_amount: u64,
    pub expiration_secs: u64,
    pub poll_interval_ms: u64,
    pub wait_timeout_sec: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            node_url: None,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            wait_timeout_sec: DEFAULT_WAIT_TIMEOUT_SEC,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OracleConfig {
    pub endpoint: String,
    pub price_feed_id: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: HERMES_BETA_URL.to_string(),
            price_feed_id: BTC_USD_PRICE_FEED_ID.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContractConfig {
    pub module_address: String,
    pub module_name: String,
    pub function_name: String,
    pub amount_usd: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            module_address: MINT_MODULE_ADDRESS.to_string(),
            module_name: MINT_MODULE_NAME.to_string(),
            function_name: MINT_FUNCTION_NAME.to_string(),
            amount_usd: MINT_AMOUNT_USD,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SignerConfig {
    /// Only needed if the account's authentication key was rotated away from the signing key.
    pub account_address: Option<String>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        let config = serde_yaml::from_str(&content).context("failed to parse config file")?;
        Ok(config)
    }

    pub fn resolve(&self) -> Result<MintConfig, ConfigError> {
        let node_url = match &self.chain.node_url {
            Some(url) => url.as_str(),
            None => self.chain.network.node_url(),
        };
        Ok(MintConfig {
            node_url: parse_url("node", node_url)?,
            transaction: TransactionSettings {
                max_gas_amount: self.chain.max_gas_amount,
                expiration_secs: self.chain.expiration_secs,
                poll_interval: Duration::from_millis(self.chain.poll_interval_ms),
                wait_timeout: Duration::from_secs(self.chain.wait_timeout_sec),
            },
            oracle_endpoint: parse_url("oracle", &self.oracle.endpoint)?,
            price_feed_id: self
                .oracle
                .price_feed_id
                .parse()
                .map_err(ConfigError::InvalidFeedId)?,
            mint_function: EntryFunctionId {
                module_address: self
                    .contract
                    .module_address
                    .parse()
                    .map_err(ConfigError::InvalidModuleAddress)?,
                module_name: self.contract.module_name.clone(),
                function_name: self.contract.function_name.clone(),
            },
            amount_usd: self.contract.amount_usd,
        })
    }
}

fn parse_url(field: &'static str, url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|source| ConfigError::InvalidUrl { field, source })
}

/// Fully resolved settings of the mint flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintConfig {
    pub node_url: Url,
    pub transaction: TransactionSettings,
    pub oracle_endpoint: Url,
    pub price_feed_id: PriceFeedId,
    pub mint_function: EntryFunctionId,
    pub amount_usd: u64,
}

/// Parses a hex encoded ed25519 private key of 32 bytes, with or without `0x` prefix.
pub fn parse_private_key(hex_key: &str) -> Result<SigningKey, ConfigError> {
    let trimmed = hex_key.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits)
        .map_err(|err| ConfigError::InvalidSigningKey(format!("not valid hex: {err}")))?;
    let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        ConfigError::InvalidSigningKey(format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    Ok(SigningKey::from_bytes(&bytes))
}

/// Loads the config file (if any) and the signing identity.
pub fn load_config(
    config_path: Option<&Path>,
    private_key: Option<&str>,
) -> anyhow::Result<(MintConfig, SigningIdentity)> {
    let file = match config_path {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("load config from {}", path.display()))?,
        None => ConfigFile::default(),
    };
    let config = file.resolve().context("validate config")?;

    let signing_key = parse_private_key(private_key.ok_or(ConfigError::MissingSigningKey)?)?;
    let identity = match &file.signer.account_address {
        Some(address) => {
            let address: AccountAddress =
                address.parse().map_err(ConfigError::InvalidAccountAddress)?;
            SigningIdentity::with_address(signing_key, address)
        }
        None => SigningIdentity::from_key(signing_key),
    };

    tracing::info!(
        target: "mint",
        node_url = %config.node_url,
        oracle = %config.oracle_endpoint,
        account = %identity.account_address(),
        "loaded config",
    );
    Ok((config, identity))
}
