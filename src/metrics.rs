use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref BOOKING_SUBMISSIONS: Counter =
        register_counter!("salon_booking_submissions_total", "Public booking submissions received").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("salon_rate_limited_total", "Submissions rejected by the rate limiter").unwrap();
    pub static ref HEURISTIC_REJECTIONS: Counter =
        register_counter!("salon_heuristic_rejections_total", "Submissions rejected by anti-spam heuristics").unwrap();
    pub static ref RECORDS_CREATED: Counter =
        register_counter!("salon_records_created_total", "Booking records stored").unwrap();
    pub static ref NOTIFY_FAILURES: Counter =
        register_counter!("salon_notify_failures_total", "New booking notices that could not be delivered").unwrap();
    pub static ref LIMITER_EVICTIONS: Counter =
        register_counter!("salon_limiter_evictions_total", "Idle rate limit entries removed by the sweeper").unwrap();
    pub static ref LIMITER_ENTRIES: Gauge =
        register_gauge!("salon_limiter_entries", "Current number of tracked client identifiers").unwrap();
    pub static ref BOOKING_LATENCY: Histogram = register_histogram!(
        "salon_booking_latency_seconds",
        "Booking creation latency in seconds"
    )
    .unwrap();
}
