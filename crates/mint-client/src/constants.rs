/// Pyth BTC/USD price feed on the beta (testnet) Hermes service.
pub const BTC_USD_PRICE_FEED_ID: &str =
    "0xf9c0172ba10dfa4d19088d94f5bf61d3b54d5bd7483a322a982e1373ee8ea31b";
pub const HERMES_BETA_URL: &str = "https://hermes-beta.pyth.network/";

/// Address the mint module is published under on testnet.
pub const MINT_MODULE_ADDRESS: &str =
    "0x435c07fee9a83d1c65f667513a72d49156b001229b08db94162826e0ab02c916";
pub const MINT_MODULE_NAME: &str = "btc_pegged_coin";
pub const MINT_FUNCTION_NAME: &str = "mint_coins";
/// Amount in USD passed as the first argument of every mint call.
pub const MINT_AMOUNT_USD: u64 = 100;

pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 200_000;
pub const DEFAULT_EXPIRATION_SECS: u64 = 20;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_WAIT_TIMEOUT_SEC: u64 = 20;

/// Abort code the price oracle module raises when the update data cannot be parsed or verified.
pub const INVALID_PRICE_UPDATE_ABORT_CODE: u64 = 0x60008;
pub const INVALID_PRICE_UPDATE_MESSAGE: &str =
    "Error: Invalid price update data format or state verification failed";
