use serde::{Deserialize, Serialize};

use crate::spam::AntiSpamPayload;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    New,
    Confirmed,
    Cancelled,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    #[default]
    Client,
    Master,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

// Stored booking - one row per appointment
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub client_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<String>,
    pub service: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub status: RecordStatus,
    pub source: RecordSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub created_at: String,
}

// New booking data, without id and server-side fields
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecord {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub social_media: Option<String>,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub source: RecordSource,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

// Public form body - booking fields plus the anti-spam block
#[derive(Deserialize, Debug, Clone)]
pub struct BookingSubmission {
    #[serde(flatten)]
    pub record: CreateRecord,
    #[serde(rename = "_antiSpam", default)]
    pub anti_spam: Option<AntiSpamPayload>,
}

// Partial update - absent fields keep their stored values
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub client_name: Option<String>,
    pub phone: Option<String>,
    pub social_media: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub comment: Option<String>,
    pub status: Option<RecordStatus>,
    pub source: Option<RecordSource>,
    pub amount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supplier: String,
    pub created_at: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchase {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supplier: String,
}

// Payload sent to the notification webhook for every new booking
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingNotice {
    pub name: String,
    pub phone: String,
    pub social_media: Option<String>,
    pub service: String,
    pub date: String,
    pub time: String,
    pub comment: Option<String>,
    pub source: RecordSource,
    pub created_at: String,
}

impl From<&Record> for NewBookingNotice {
    fn from(record: &Record) -> Self {
        Self {
            name: record.client_name.clone(),
            phone: record.phone.clone(),
            social_media: record.social_media.clone(),
            service: record.service.clone(),
            date: record.date.clone(),
            time: record.time.clone(),
            comment: record.comment.clone(),
            source: record.source,
            created_at: record.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_submission_splits_anti_spam_block() {
        let body = r#"{
            "clientName": "Anna",
            "phone": "+371 20000000",
            "service": "Manicure",
            "date": "2026-03-14",
            "time": "10:00",
            "_antiSpam": {"timeSpent": 8000, "userActivity": {"clicks": 4, "focuses": 3}}
        }"#;
        let submission: BookingSubmission = serde_json::from_str(body).unwrap();

        assert_eq!(submission.record.client_name, "Anna");
        assert_eq!(submission.record.source, RecordSource::Client);
        assert_eq!(submission.record.payment_method, PaymentMethod::Unspecified);
        let anti_spam = submission.anti_spam.unwrap();
        assert_eq!(anti_spam.time_spent, 8000);
        assert_eq!(anti_spam.user_activity.clicks, 4);
    }

    #[test]
    fn empty_payment_method_is_unspecified() {
        let method: PaymentMethod = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(method, PaymentMethod::Unspecified);
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), r#""card""#);
    }
}
