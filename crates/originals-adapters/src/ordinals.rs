use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use originals_core::{OriginalsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInscriptionRequest {
    pub data: Vec<u8>,
    pub content_type: String,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub fee_rate: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inscription {
    pub inscription_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_tx_id: Option<String>,
    pub reveal_tx_id: String,
    pub satoshi: u64,
    pub txid: String,
    pub vout: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    pub content_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    #[serde(default)]
    pub fee_rate: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub txid: String,
    pub vin: u32,
    pub vout: u32,
    pub fee: u64,
    pub block_height: Option<u64>,
    pub confirmations: u32,
    pub satoshi: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    pub confirmed: bool,
    pub block_height: Option<u64>,
    pub confirmations: Option<u32>,
}

/// The Ordinals provider, pluggable per §6. Implementations talk to a real
/// indexer/node; `MockOrdinalsProvider` below is an in-memory stand-in for
/// tests and the demo CLI.
#[async_trait]
pub trait OrdinalsProvider: Send + Sync {
    async fn create_inscription(&self, request: CreateInscriptionRequest) -> Result<Inscription>;
    async fn get_inscription_by_id(&self, id: &str) -> Result<Option<Inscription>>;
    async fn get_inscriptions_by_satoshi(&self, satoshi: u64) -> Result<Vec<Inscription>>;
    async fn transfer_inscription(&self, id: &str, to_address: &str, options: TransferOptions) -> Result<TransferResult>;
    async fn broadcast_transaction(&self, hex: &str) -> Result<String>;
    async fn get_transaction_status(&self, txid: &str) -> Result<TransactionStatus>;
    async fn estimate_fee(&self, blocks_ahead: Option<u32>) -> Result<f64>;
}

struct MockState {
    inscriptions: HashMap<String, Inscription>,
    by_satoshi: HashMap<u64, Vec<String>>,
    next_satoshi: u64,
    fee_rate: f64,
}

/// Deterministic in-memory Ordinals provider: assigns sequential satoshis,
/// accepts every broadcast, and reports everything confirmed at height 1.
pub struct MockOrdinalsProvider {
    state: Mutex<MockState>,
}

impl MockOrdinalsProvider {
    pub fn new(starting_satoshi: u64, fee_rate: f64) -> Self {
        Self {
            state: Mutex::new(MockState {
                inscriptions: HashMap::new(),
                by_satoshi: HashMap::new(),
                next_satoshi: starting_satoshi,
                fee_rate,
            }),
        }
    }
}

impl Default for MockOrdinalsProvider {
    fn default() -> Self {
        Self::new(1_000_000, 5.0)
    }
}

#[async_trait]
impl OrdinalsProvider for MockOrdinalsProvider {
    async fn create_inscription(&self, request: CreateInscriptionRequest) -> Result<Inscription> {
        let mut state = self.state.lock().map_err(|_| OriginalsError::network("mock ordinals state poisoned", false))?;
        let satoshi = state.next_satoshi;
        state.next_satoshi += 1;

        let inscription_id = format!("{:064x}i0", satoshi);
        let txid = format!("{:064x}", satoshi);
        let inscription = Inscription {
            inscription_id: inscription_id.clone(),
            commit_tx_id: Some(format!("{:064x}", satoshi.wrapping_add(1))),
            reveal_tx_id: txid.clone(),
            satoshi,
            txid,
            vout: 0,
            block_height: Some(1),
            content_type: request.content_type,
        };

        state.inscriptions.insert(inscription_id.clone(), inscription.clone());
        state.by_satoshi.entry(satoshi).or_default().push(inscription_id);
        Ok(inscription)
    }

    async fn get_inscription_by_id(&self, id: &str) -> Result<Option<Inscription>> {
        let state = self.state.lock().map_err(|_| OriginalsError::network("mock ordinals state poisoned", false))?;
        Ok(state.inscriptions.get(id).cloned())
    }

    async fn get_inscriptions_by_satoshi(&self, satoshi: u64) -> Result<Vec<Inscription>> {
        let state = self.state.lock().map_err(|_| OriginalsError::network("mock ordinals state poisoned", false))?;
        Ok(state
            .by_satoshi
            .get(&satoshi)
            .into_iter()
            .flatten()
            .filter_map(|id| state.inscriptions.get(id).cloned())
            .collect())
    }

    async fn transfer_inscription(&self, id: &str, _to_address: &str, _options: TransferOptions) -> Result<TransferResult> {
        let state = self.state.lock().map_err(|_| OriginalsError::network("mock ordinals state poisoned", false))?;
        let inscription = state.inscriptions.get(id).ok_or_else(|| OriginalsError::not_found(format!("unknown inscription {id}")))?;
        Ok(TransferResult {
            txid: format!("{:064x}", inscription.satoshi.wrapping_add(2)),
            vin: 0,
            vout: 0,
            fee: 200,
            block_height: Some(2),
            confirmations: 1,
            satoshi: inscription.satoshi,
        })
    }

    async fn broadcast_transaction(&self, hex: &str) -> Result<String> {
        Ok(originals_crypto::sha256_hex(hex.as_bytes()))
    }

    async fn get_transaction_status(&self, _txid: &str) -> Result<TransactionStatus> {
        Ok(TransactionStatus { confirmed: true, block_height: Some(1), confirmations: Some(1) })
    }

    async fn estimate_fee(&self, _blocks_ahead: Option<u32>) -> Result<f64> {
        let state = self.state.lock().map_err(|_| OriginalsError::network("mock ordinals state poisoned", false))?;
        Ok(state.fee_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inscriptions_get_sequential_satoshis_and_are_retrievable() {
        let provider = MockOrdinalsProvider::new(5_000_000, 4.0);
        let a = provider.create_inscription(CreateInscriptionRequest { data: vec![1], content_type: "text/plain".to_string(), metadata: None, fee_rate: None }).await.unwrap();
        let b = provider.create_inscription(CreateInscriptionRequest { data: vec![2], content_type: "text/plain".to_string(), metadata: None, fee_rate: None }).await.unwrap();
        assert_eq!(b.satoshi, a.satoshi + 1);

        let fetched = provider.get_inscription_by_id(&a.inscription_id).await.unwrap();
        assert_eq!(fetched.unwrap().satoshi, a.satoshi);

        let by_sat = provider.get_inscriptions_by_satoshi(a.satoshi).await.unwrap();
        assert_eq!(by_sat.len(), 1);
    }

    #[tokio::test]
    async fn transfer_of_unknown_inscription_is_not_found() {
        let provider = MockOrdinalsProvider::default();
        assert!(provider.transfer_inscription("missing", "addr", TransferOptions { fee_rate: None }).await.is_err());
    }
}
