use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::metrics::{LIMITER_ENTRIES, LIMITER_EVICTIONS};

// Entries untouched for this long are dropped by the sweeper
pub const IDLE_TTL: Duration = Duration::from_secs(10 * 60);

// Rate limit entry - tracks requests per client identifier
#[derive(Debug, Clone, Copy)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
    pub last_seen: Instant,
}

impl RateLimitEntry {
    fn fresh(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
            last_seen: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Decision::Allowed => None,
            Decision::Limited { retry_after_secs } => Some(*retry_after_secs),
        }
    }
}

/// Fixed-window request counter keyed by client identifier.
///
/// Each key gets `max_requests` admissions per `window`. The window starts at
/// the first admitted request and resets on the first request after it
/// elapses. State lives only in this process.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    /// Same as [`RateLimiter::check`] with an explicit clock reading.
    ///
    /// The entry's shard stays locked for the whole read-modify-write, so two
    /// concurrent requests for one key cannot both take the last slot.
    ///
    /// Every request refreshes `last_seen`, limited ones included, so a client
    /// that keeps retrying while blocked stays tracked until its window ends
    /// instead of being swept early.
    pub fn check_at(&self, key: &str, now: Instant) -> Decision {
        let decision = match self.entries.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(RateLimitEntry::fresh(now));
                Decision::Allowed
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                entry.last_seen = now;

                // window expired..? start over
                if now.saturating_duration_since(entry.window_start) > self.window {
                    *entry = RateLimitEntry::fresh(now);
                    Decision::Allowed
                } else if entry.count < self.max_requests {
                    entry.count += 1;
                    Decision::Allowed
                } else {
                    let resets_at = entry.window_start + self.window;
                    Decision::Limited {
                        retry_after_secs: ceil_secs(resets_at.saturating_duration_since(now)),
                    }
                }
            }
        };

        LIMITER_ENTRIES.set(self.entries.len() as f64);
        decision
    }

    pub fn sweep(&self, idle_ttl: Duration) -> usize {
        self.sweep_at(idle_ttl, Instant::now())
    }

    /// Drops entries whose last request is older than `idle_ttl`.
    /// Returns how many were removed.
    pub fn sweep_at(&self, idle_ttl: Duration, now: Instant) -> usize {
        let mut evicted = 0;
        // retain locks one shard at a time
        self.entries.retain(|_, entry| {
            let keep = now.saturating_duration_since(entry.last_seen) <= idle_ttl;
            if !keep {
                evicted += 1;
            }
            keep
        });

        LIMITER_ENTRIES.set(self.entries.len() as f64);
        LIMITER_EVICTIONS.inc_by(evicted as f64);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|entry| *entry)
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    if duration.subsec_nanos() > 0 {
        duration.as_secs() + 1
    } else {
        duration.as_secs()
    }
}

// Sweeper - runs forever on its own interval, independent of request handling
pub async fn sweeper(limiter: Arc<RateLimiter>, every: Duration, idle_ttl: Duration) {
    let mut interval = interval(every);

    info!(?every, ?idle_ttl, "Rate limit sweeper started");

    loop {
        interval.tick().await;

        let evicted = limiter.sweep(idle_ttl);
        if evicted > 0 {
            debug!(evicted, remaining = limiter.len(), "Swept idle rate limit entries");
        }
    }
}
