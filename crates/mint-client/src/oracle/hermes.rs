//! Client for the Pyth Hermes price service.
//!
//! https://hermes.pyth.network/docs/#/rest/latest_price_updates

use super::{OracleError, PriceAttestation, PriceOracle};
use mint_primitives::hash::PriceFeedId;
use serde::Deserialize;
use url::Url;

const LATEST_PRICE_UPDATES_PATH: &str = "v2/updates/price/latest";
const HEX_ENCODING: &str = "hex";

#[derive(Debug, Clone)]
pub struct HermesClient {
    client: reqwest::Client,
    latest_price_updates_url: Url,
}

impl HermesClient {
    pub fn new(endpoint: Url) -> Result<Self, url::ParseError> {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Fails if `endpoint` cannot serve as a base url, e.g. `mailto:` or `data:` urls.
    pub fn with_client(
        client: reqwest::Client,
        mut endpoint: Url,
    ) -> Result<Self, url::ParseError> {
        // `Url::join` replaces the last path segment unless the base ends with a slash.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        Ok(Self {
            client,
            latest_price_updates_url: endpoint.join(LATEST_PRICE_UPDATES_PATH)?,
        })
    }
}

impl PriceOracle for HermesClient {
    async fn fetch_latest_attestation(
        &self,
        feed_id: &PriceFeedId,
    ) -> Result<PriceAttestation, OracleError> {
        let url = self.latest_price_updates_url.clone();
        let feed_id_param = feed_id.to_string();
        tracing::debug!(target: "mint", %feed_id, %url, "fetching latest price update");

        let body = self
            .client
            .get(url)
            .query(&[("ids[]", feed_id_param.as_str()), ("encoding", HEX_ENCODING)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let response: PriceUpdateResponse = serde_json::from_slice(&body).map_err(|err| {
            OracleError::InvalidAttestationFormat(format!("unexpected response body: {err}"))
        })?;

        if let Some(parsed) = response.parsed.first() {
            tracing::info!(
                target: "mint",
                feed_id = %parsed.id,
                price = %parsed.price.price,
                expo = parsed.price.expo,
                publish_time = parsed.price.publish_time,
                "received price update",
            );
        }

        response.into_attestation()
    }
}

/// Partial response of `GET /v2/updates/price/latest`.
///
/// `binary.data` is aligned with the requested ids. We only ever request one id, so the
/// attestation for it is at index 0.
#[derive(Debug, Deserialize)]
struct PriceUpdateResponse {
    binary: Option<BinaryPriceUpdate>,
    #[serde(default)]
    parsed: Vec<ParsedPriceUpdate>,
}

#[derive(Debug, Deserialize)]
struct BinaryPriceUpdate {
    encoding: Option<String>,
    #[serde(default)]
    data: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ParsedPriceUpdate {
    id: String,
    price: RpcPrice,
}

#[derive(Debug, Deserialize)]
struct RpcPrice {
    price: String,
    expo: i32,
    publish_time: i64,
}

impl PriceUpdateResponse {
    fn into_attestation(self) -> Result<PriceAttestation, OracleError> {
        let Some(binary) = self.binary else {
            return Err(OracleError::InvalidAttestationFormat(
                "response has no binary section".to_string(),
            ));
        };
        if let Some(encoding) = binary.encoding.as_deref() {
            if encoding != HEX_ENCODING {
                return Err(OracleError::InvalidAttestationFormat(format!(
                    "expected hex encoded data, got {encoding}"
                )));
            }
        }
        let Some(data) = binary.data.into_iter().next() else {
            return Err(OracleError::InvalidAttestationFormat(
                "response has no binary data entry".to_string(),
            ));
        };
        PriceAttestation::from_hex(&data)
    }
}
