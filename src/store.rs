use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{CreatePurchase, CreateRecord, Purchase, Record, UpdateRecord};

/// In-process store for bookings and purchases.
///
/// Stands in for the spreadsheet the salon keeps its books in; rows are keyed
/// by generated id and handed out as owned copies.
#[derive(Default)]
pub struct Store {
    records: DashMap<String, Record>,
    purchases: DashMap<String, Purchase>,
    sequence: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // "record-1767225600000-3"
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), seq)
    }

    pub fn add_record(&self, data: CreateRecord) -> Record {
        let record = Record {
            id: self.next_id("record"),
            client_name: data.client_name,
            phone: data.phone,
            social_media: data.social_media,
            service: data.service,
            date: data.date,
            time: data.time,
            comment: data.comment,
            status: data.status.unwrap_or_default(),
            source: data.source,
            amount: data.amount,
            payment_method: data.payment_method,
            created_at: now_rfc3339(),
        };
        self.records.insert(record.id.clone(), record.clone());
        record
    }

    // Sorted by appointment date, then time
    pub fn list_records(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| (&a.date, &a.time, &a.id).cmp(&(&b.date, &b.time, &b.id)));
        records
    }

    pub fn get_record(&self, id: &str) -> Option<Record> {
        self.records.get(id).map(|r| r.value().clone())
    }

    pub fn update_record(&self, id: &str, update: UpdateRecord) -> Option<Record> {
        let mut entry = self.records.get_mut(id)?;
        let record = entry.value_mut();

        if let Some(v) = update.client_name {
            record.client_name = v;
        }
        if let Some(v) = update.phone {
            record.phone = v;
        }
        if let Some(v) = update.social_media {
            record.social_media = Some(v);
        }
        if let Some(v) = update.service {
            record.service = v;
        }
        if let Some(v) = update.date {
            record.date = v;
        }
        if let Some(v) = update.time {
            record.time = v;
        }
        if let Some(v) = update.comment {
            record.comment = Some(v);
        }
        if let Some(v) = update.status {
            record.status = v;
        }
        if let Some(v) = update.source {
            record.source = v;
        }
        if let Some(v) = update.amount {
            record.amount = Some(v);
        }
        if let Some(v) = update.payment_method {
            record.payment_method = v;
        }

        Some(record.clone())
    }

    pub fn delete_record(&self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }

    pub fn add_purchase(&self, data: CreatePurchase) -> Purchase {
        let purchase = Purchase {
            id: self.next_id("purchase"),
            category_id: data.category_id,
            name: data.name,
            amount: data.amount,
            date: data.date,
            description: data.description,
            supplier: data.supplier,
            created_at: now_rfc3339(),
        };
        self.purchases.insert(purchase.id.clone(), purchase.clone());
        purchase
    }

    // Full replace, only id and createdAt survive
    pub fn update_purchase(&self, id: &str, data: CreatePurchase) -> Option<Purchase> {
        let mut entry = self.purchases.get_mut(id)?;
        let purchase = entry.value_mut();

        purchase.category_id = data.category_id;
        purchase.name = data.name;
        purchase.amount = data.amount;
        purchase.date = data.date;
        purchase.description = data.description;
        purchase.supplier = data.supplier;

        Some(purchase.clone())
    }

    pub fn delete_purchase(&self, id: &str) -> bool {
        self.purchases.remove(id).is_some()
    }

    // Newest first
    pub fn list_purchases(&self) -> Vec<Purchase> {
        let mut purchases: Vec<Purchase> = self.purchases.iter().map(|p| p.value().clone()).collect();
        purchases.sort_by(|a, b| (&b.date, &b.id).cmp(&(&a.date, &a.id)));
        purchases
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
