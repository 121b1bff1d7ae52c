use std::sync::Arc;
use std::time::Instant;

use crate::config::Args;
use crate::finance::TaxBrackets;
use crate::gate::AdmissionGate;
use crate::notify::Notifier;
use crate::rate_limit::RateLimiter;
use crate::store::Store;

// app's shared state
pub struct AppState {
    pub gate: AdmissionGate,
    pub store: Store,
    pub notifier: Notifier,
    pub tax_brackets: TaxBrackets,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(limiter: Arc<RateLimiter>, notifier: Notifier, tax_brackets: TaxBrackets) -> Arc<Self> {
        Arc::new(Self {
            gate: AdmissionGate::new(limiter),
            store: Store::new(),
            notifier,
            tax_brackets,
            started_at: Instant::now(),
        })
    }

    pub fn from_args(args: &Args) -> Arc<Self> {
        let limiter = Arc::new(RateLimiter::new(args.rate_limit, args.rate_window()));
        let notifier = Notifier::new(reqwest::Client::new(), args.notify_url.clone());
        Self::new(limiter, notifier, args.tax_brackets())
    }
}
