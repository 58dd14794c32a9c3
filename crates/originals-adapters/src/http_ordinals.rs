//! A real Ordinals provider backed by an HTTP indexer, gated behind the
//! `http` feature so the default build stays dependency-light. Talks plain
//! JSON over POST rather than a full RPC client crate, same trade-off
//! `chronx-wallet`'s `WalletRpcClient` makes.

use async_trait::async_trait;
use originals_core::{OriginalsError, Result};

use crate::ordinals::{CreateInscriptionRequest, Inscription, OrdinalsProvider, TransactionStatus, TransferOptions, TransferResult};

pub struct HttpOrdinalsProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOrdinalsProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    async fn post<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| OriginalsError::network_with_cause(format!("connecting to {url}"), true, e.to_string()))?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| OriginalsError::network(format!("parsing response from {url}: {e}"), false))
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OriginalsError::network_with_cause(format!("connecting to {url}"), true, e.to_string()))?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| OriginalsError::network(format!("parsing response from {url}: {e}"), false))
    }
}

#[async_trait]
impl OrdinalsProvider for HttpOrdinalsProvider {
    async fn create_inscription(&self, request: CreateInscriptionRequest) -> Result<Inscription> {
        let value = self.post("inscriptions", &request).await?;
        serde_json::from_value(value).map_err(|e| OriginalsError::network(format!("malformed inscription response: {e}"), false))
    }

    async fn get_inscription_by_id(&self, id: &str) -> Result<Option<Inscription>> {
        let value = self.get(&format!("inscriptions/{id}")).await?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value).map(Some).map_err(|e| OriginalsError::network(format!("malformed inscription response: {e}"), false))
    }

    async fn get_inscriptions_by_satoshi(&self, satoshi: u64) -> Result<Vec<Inscription>> {
        let value = self.get(&format!("satoshi/{satoshi}/inscriptions")).await?;
        serde_json::from_value(value).map_err(|e| OriginalsError::network(format!("malformed inscription list: {e}"), false))
    }

    async fn transfer_inscription(&self, id: &str, to_address: &str, options: TransferOptions) -> Result<TransferResult> {
        let body = serde_json::json!({ "toAddress": to_address, "feeRate": options.fee_rate });
        let value = self.post(&format!("inscriptions/{id}/transfer"), &body).await?;
        serde_json::from_value(value).map_err(|e| OriginalsError::network(format!("malformed transfer response: {e}"), false))
    }

    async fn broadcast_transaction(&self, hex: &str) -> Result<String> {
        let value = self.post("transactions", &serde_json::json!({ "hex": hex })).await?;
        value
            .get("txid")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| OriginalsError::network("broadcast response missing txid", false))
    }

    async fn get_transaction_status(&self, txid: &str) -> Result<TransactionStatus> {
        let value = self.get(&format!("transactions/{txid}/status")).await?;
        serde_json::from_value(value).map_err(|e| OriginalsError::network(format!("malformed status response: {e}"), false))
    }

    async fn estimate_fee(&self, blocks_ahead: Option<u32>) -> Result<f64> {
        let path = match blocks_ahead {
            Some(blocks) => format!("fees?blocksAhead={blocks}"),
            None => "fees".to_string(),
        };
        let value = self.get(&path).await?;
        value.get("satPerVByte").and_then(|v| v.as_f64()).ok_or_else(|| OriginalsError::network("fee response missing satPerVByte", false))
    }
}
