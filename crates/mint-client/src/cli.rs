use crate::chain::aptos::AptosRestClient;
use crate::config::load_config;
use crate::flow::{MintFlow, MintOutcome};
use crate::oracle::hermes::HermesClient;
use crate::presentation::render_states;
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mint-client")]
#[command(about = "Mints BTC pegged coins against a Pyth price attestation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[arg(long, value_enum, env("MINT_LOG_FORMAT"), default_value = "plain")]
    pub log_format: LogFormat,
    #[clap(subcommand)]
    pub command: CliCommand,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Plaintext logs
    Plain,
    /// JSON logs
    Json,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Fetches the latest price update and submits one mint transaction.
    Mint(MintCmd),
    /// Prints the account that signs mint transactions.
    Account(AccountCmd),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a YAML config file. Defaults are used for everything that is not set.
    #[arg(long, env("MINT_CONFIG"))]
    pub config: Option<PathBuf>,
    /// Hex encoded ed25519 private key of the signing account.
    #[arg(long, env("MINT_SIGNER_PRIVATE_KEY"), hide_env_values = true)]
    pub private_key: Option<String>,
}

#[derive(Args, Debug)]
pub struct MintCmd {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct AccountCmd {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            CliCommand::Mint(cmd) => cmd.run().await,
            CliCommand::Account(cmd) => cmd.run(),
        }
    }
}

impl MintCmd {
    /// Mint failures are shown to the user and do not fail the command.
    pub async fn run(self) -> anyhow::Result<()> {
        let (config, identity) = load_config(
            self.config.config.as_deref(),
            self.config.private_key.as_deref(),
        )?;
        let oracle = HermesClient::new(config.oracle_endpoint.clone())
            .context("oracle endpoint cannot be used as a base url")?;
        let chain = AptosRestClient::new(config.node_url.clone(), config.transaction.clone());
        let flow = MintFlow::new(oracle, chain, identity, &config);

        let render = tokio::spawn(render_states(
            flow.subscribe(),
            config.amount_usd,
            io::stdout(),
        ));
        let outcome = flow.mint().await;
        // Closes the state channel, which ends rendering.
        drop(flow);
        render.await??;

        if let MintOutcome::Failed(message) = outcome {
            tracing::debug!(target: "mint", %message, "mint attempt finished with an error");
        }
        Ok(())
    }
}

impl AccountCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let (_, identity) = load_config(
            self.config.config.as_deref(),
            self.config.private_key.as_deref(),
        )?;
        println!("account: {}", identity.account_address());
        println!(
            "public key: 0x{}",
            hex::encode(identity.public_key().as_bytes())
        );
        Ok(())
    }
}
