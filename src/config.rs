use clap::Parser;
use std::time::Duration;

use crate::finance::TaxBrackets;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "salon-gateway")]
#[command(about = "Booking and bookkeeping API for a small beauty salon")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Max public booking submissions per client per window
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 900)]
    pub rate_window: u64,

    // How often idle limiter entries are swept, in seconds
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
    pub sweep_interval: u64,

    // Entries idle longer than this (seconds) are evicted
    #[arg(long, default_value_t = 600)]
    pub idle_ttl: u64,

    // Monthly card income taxed at the low rate (minimum wage)
    #[arg(long, default_value_t = 780.0)]
    pub tax_threshold: f64,

    #[arg(long, default_value_t = 0.10)]
    pub tax_rate_low: f64,

    #[arg(long, default_value_t = 0.25)]
    pub tax_rate_high: f64,

    // Webhook that receives new booking notices
    #[arg(long)]
    pub notify_url: Option<String>,
}

impl Args {
    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl)
    }

    pub fn tax_brackets(&self) -> TaxBrackets {
        TaxBrackets {
            threshold: self.tax_threshold,
            low_rate: self.tax_rate_low,
            high_rate: self.tax_rate_high,
        }
    }
}
