use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Progress notification emitted at phase boundaries of a lifecycle
/// operation (validation complete, upload/broadcast started, transaction
/// submitted, confirmed, etc.), per §4.6.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LifecycleProgress {
    pub phase: String,
    pub percentage: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl LifecycleProgress {
    pub fn new(phase: impl Into<String>, percentage: u8, message: impl Into<String>) -> Self {
        Self { phase: phase.into(), percentage, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A subscriber for `LifecycleProgress` events. Boxed the same way
/// `originals_core::asset::EventBus` boxes its subscribers: no inheritance,
/// just a closure.
pub type ProgressHandler = dyn Fn(&LifecycleProgress) + Send + Sync;
