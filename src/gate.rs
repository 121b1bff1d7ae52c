use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::metrics::{HEURISTIC_REJECTIONS, RATE_LIMITED};
use crate::rate_limit::{Decision, RateLimiter};
use crate::spam::{SubmissionMetadata, Verdict, evaluate_heuristics};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("rate limit exceeded")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("submission looks automated: {0:?}")]
    Suspicious(Verdict),
}

/// Admission gate for public booking submissions: a per-client rate limit
/// followed by the anti-spam heuristics.
#[derive(Clone)]
pub struct AdmissionGate {
    limiter: Arc<RateLimiter>,
}

impl AdmissionGate {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn check_rate(&self, client: &str) -> Result<(), GateError> {
        match self.limiter.check(client) {
            Decision::Allowed => Ok(()),
            decision @ Decision::Limited { .. } => {
                RATE_LIMITED.inc();
                warn!(client, retry_after = ?decision.retry_after_secs(), "Rate limit exceeded");
                Err(GateError::RateLimited {
                    retry_after_secs: decision.retry_after_secs(),
                })
            }
        }
    }

    // Submissions without metadata are let through, the form always sends it
    pub fn check_heuristics(
        &self,
        client: &str,
        metadata: Option<&SubmissionMetadata>,
    ) -> Result<(), GateError> {
        let Some(metadata) = metadata else {
            return Ok(());
        };

        match evaluate_heuristics(metadata) {
            Verdict::Human => Ok(()),
            verdict => {
                HEURISTIC_REJECTIONS.inc();
                warn!(
                    client,
                    ?verdict,
                    time_spent_ms = metadata.time_spent_ms,
                    interactions = metadata.interaction_count,
                    "Anti-spam check failed"
                );
                Err(GateError::Suspicious(verdict))
            }
        }
    }
}
