use clap::Parser;
use mint_client::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    mint_client::tracing::init_logging(cli.log_format);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(cli.run())
}
