//! Serialized cart submission.
//!
//! The collaborator's dedup is read-then-write with no transactional
//! merge, so two in-flight submissions for the same line key can lose an
//! update. [`CartSubmitter`] closes that hole by holding a per-key lock
//! for the duration of each call: a second submit for the same key
//! queues behind the first, while distinct keys proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tessera_commerce::cart::{LineAction, LineKey};

use crate::error::CartApiError;
use crate::payload::CartLineRequest;
use crate::retry::RetryPolicy;

/// The external cart collaborator.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Insert a new line.
    async fn add_line(&self, request: &CartLineRequest) -> Result<(), CartApiError>;

    /// Replace the quantity/area of an existing line.
    async fn update_line(&self, request: &CartLineRequest) -> Result<(), CartApiError>;
}

/// Submits resolved line actions to a [`CartService`], one in flight per
/// line key, retrying transient failures.
pub struct CartSubmitter<S> {
    service: S,
    retry: RetryPolicy,
    gates: Mutex<HashMap<LineKey, Arc<Mutex<()>>>>,
}

impl<S: CartService> CartSubmitter<S> {
    /// Wrap a cart service with the default retry policy.
    pub fn new(service: S) -> Self {
        Self {
            service,
            retry: RetryPolicy::default(),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Submit a resolved action.
    ///
    /// Holds this key's gate for the whole call, so a concurrent submit
    /// for the same `(product, variation, sample-flag)` waits rather
    /// than racing the collaborator's read-then-write dedup. On failure
    /// the caller's selection state is untouched and the submission can
    /// simply be retried.
    pub async fn submit(&self, action: &LineAction) -> Result<(), CartApiError> {
        let line = action.line();
        let gate = self.gate_for(line.key()).await;
        let _in_flight = gate.lock().await;

        let request = CartLineRequest::from_line(line);
        let mut attempt: u32 = 0;
        loop {
            let result = match action {
                LineAction::Add(_) => self.service.add_line(&request).await,
                LineAction::Update(_) => self.service.update_line(&request).await,
            };
            match result {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff.delay_for_attempt(attempt);
                    tracing::warn!(
                        variation = line.variation_id.get(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "cart submission failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn gate_for(&self, key: LineKey) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        gates
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
