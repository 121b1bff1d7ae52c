use std::time::Duration;
use tracing::{info, warn};

use crate::metrics::NOTIFY_FAILURES;
use crate::models::{NewBookingNotice, Record};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

// Best-effort new booking notices; never blocks or fails a request
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(client: reqwest::Client, webhook_url: Option<String>) -> Self {
        Self { client, webhook_url }
    }

    pub fn disabled() -> Self {
        Self::new(reqwest::Client::new(), None)
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn new_booking(&self, record: &Record) {
        let notice = NewBookingNotice::from(record);

        let Some(url) = self.webhook_url.clone() else {
            info!(service = %notice.service, date = %notice.date, "New booking (no webhook configured)");
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = send(&client, &url, &notice).await {
                NOTIFY_FAILURES.inc();
                warn!(%url, error = %e, "Failed to send new booking notice");
            }
        });
    }
}

async fn send(client: &reqwest::Client, url: &str, notice: &NewBookingNotice) -> Result<(), reqwest::Error> {
    client
        .post(url)
        .timeout(NOTIFY_TIMEOUT)
        .json(notice)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
