use std::sync::Arc;

use originals_core::{Resource, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::manager::{
    AssetHandle, CreateDraftOptions, InscribeOptions, LifecycleManager, PublishOptions,
    PublishTarget, TransferRequestOptions,
};

#[derive(Clone, Debug)]
pub struct CreateDraftRequest {
    pub resources: Vec<Resource>,
    pub options: CreateDraftOptions,
}

#[derive(Clone, Debug)]
pub struct BatchError {
    pub index: usize,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BatchStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub struct BatchResult<T> {
    pub successes: Vec<T>,
    pub failures: Vec<BatchError>,
    pub stats: BatchStats,
}

/// Drains a `JoinSet` of `(index, Result<R>)` tasks into a `BatchResult`,
/// preserving submission order among the successes. A panicked task is
/// reported with `index = usize::MAX` since `JoinError` does not carry the
/// original index.
async fn drain<R: Send + 'static>(mut set: JoinSet<(usize, Result<R>)>) -> BatchResult<R> {
    let mut successes: Vec<(usize, R)> = Vec::new();
    let mut failures = Vec::new();
    let mut total = 0usize;

    while let Some(joined) = set.join_next().await {
        total += 1;
        match joined {
            Ok((index, Ok(value))) => successes.push((index, value)),
            Ok((index, Err(e))) => failures.push(BatchError { index, message: e.to_string() }),
            Err(join_err) => failures.push(BatchError { index: usize::MAX, message: join_err.to_string() }),
        }
    }

    successes.sort_by_key(|(index, _)| *index);
    let succeeded = successes.len();
    let failed = failures.len();
    BatchResult {
        successes: successes.into_iter().map(|(_, v)| v).collect(),
        failures,
        stats: BatchStats { total, succeeded, failed },
    }
}

/// Bounded-concurrency fan-out over `createDraft`/`publish`/`inscribe`/
/// `transfer`, per §5's Batch Operations. Each item runs independently; one
/// failure does not cancel its siblings.
pub struct BatchOperations {
    manager: Arc<LifecycleManager>,
    concurrency: usize,
}

impl BatchOperations {
    pub fn new(manager: Arc<LifecycleManager>, concurrency: usize) -> Self {
        Self { manager, concurrency: concurrency.max(1) }
    }

    pub async fn create_batch(&self, requests: Vec<CreateDraftRequest>) -> BatchResult<AssetHandle> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut set = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let manager = self.manager.clone();
            let semaphore = semaphore.clone();
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                (index, manager.create_draft(request.resources, request.options))
            });
        }
        drain(set).await
    }

    pub async fn publish_batch(&self, handles: Vec<AssetHandle>, target: PublishTarget, options: PublishOptions) -> BatchResult<AssetHandle> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut set = JoinSet::new();
        for (index, mut handle) in handles.into_iter().enumerate() {
            let manager = self.manager.clone();
            let semaphore = semaphore.clone();
            let target = target.clone();
            let options = options.clone();
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let result = manager.publish(&mut handle, target, options).await;
                (index, result.map(|_| handle))
            });
        }
        drain(set).await
    }

    pub async fn inscribe_batch(&self, handles: Vec<AssetHandle>, options: InscribeOptions) -> BatchResult<AssetHandle> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut set = JoinSet::new();
        for (index, mut handle) in handles.into_iter().enumerate() {
            let manager = self.manager.clone();
            let semaphore = semaphore.clone();
            let options = options.clone();
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let result = manager.inscribe(&mut handle, options).await;
                (index, result.map(|_| handle))
            });
        }
        drain(set).await
    }

    /// Each handle is paired with the recipient address it should be
    /// transferred to; `options` applies uniformly across the batch.
    pub async fn transfer_batch(&self, handles: Vec<(AssetHandle, String)>, options: TransferRequestOptions) -> BatchResult<AssetHandle> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut set = JoinSet::new();
        for (index, (mut handle, recipient)) in handles.into_iter().enumerate() {
            let manager = self.manager.clone();
            let semaphore = semaphore.clone();
            let options = options.clone();
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let result = manager.transfer(&mut handle, &recipient, options).await;
                (index, result.map(|_| handle))
            });
        }
        drain(set).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_adapters::{FixedFeeOracle, InMemoryStorageAdapter, MockOrdinalsProvider};
    use originals_core::{BitcoinNetwork, KeyType, ResourceContent, ResourceType};
    use originals_did::DidManager;

    fn batch_ops(concurrency: usize) -> BatchOperations {
        let manager = LifecycleManager::new(
            DidManager::new(KeyType::Ed25519),
            Arc::new(MockOrdinalsProvider::default()),
            Arc::new(FixedFeeOracle::new(2.0)),
            Arc::new(InMemoryStorageAdapter::new("example.com", "widget")),
            BitcoinNetwork::Mainnet,
        );
        BatchOperations::new(Arc::new(manager), concurrency)
    }

    fn request(id: &str) -> CreateDraftRequest {
        CreateDraftRequest {
            resources: vec![Resource {
                id: id.to_string(),
                resource_type: ResourceType::Text,
                content_type: "text/plain".to_string(),
                hash: originals_crypto::sha256_hex(id.as_bytes()),
                size: id.len() as u64,
                version: 1,
                previous_version_hash: None,
                created_at: 0,
                url: None,
                content: Some(ResourceContent::Bytes(id.as_bytes().to_vec())),
            }],
            options: CreateDraftOptions::default(),
        }
    }

    #[tokio::test]
    async fn create_batch_succeeds_for_every_independent_request() {
        let ops = batch_ops(2);
        let result = ops.create_batch(vec![request("r1"), request("r2"), request("r3")]).await;
        assert_eq!(result.stats.total, 3);
        assert_eq!(result.stats.succeeded, 3);
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn publish_then_inscribe_batch_round_trip() {
        let ops = batch_ops(4);
        let created = ops.create_batch(vec![request("a"), request("b")]).await;
        assert_eq!(created.stats.succeeded, 2);

        let published = ops
            .publish_batch(created.successes, PublishTarget { domain: "example.com".to_string(), slug: None }, PublishOptions::default())
            .await;
        assert_eq!(published.stats.succeeded, 2);

        let inscribed = ops.inscribe_batch(published.successes, InscribeOptions::default()).await;
        assert_eq!(inscribed.stats.succeeded, 2);
        assert!(inscribed.successes.iter().all(|h| h.id().starts_with("did:btco:")));
    }
}
