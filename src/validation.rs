use thiserror::Error;

use crate::models::{CreatePurchase, CreateRecord, UpdateRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Missing required fields: categoryId, name, amount, date")]
    MissingPurchaseFields,

    #[error("Invalid amount value")]
    InvalidAmount,

    #[error("Invalid date format")]
    InvalidDate,

    #[error("Invalid time format")]
    InvalidTime,
}

pub fn validate_new_record(record: &CreateRecord) -> Result<(), ValidationError> {
    let required = [&record.client_name, &record.phone, &record.service, &record.date];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ValidationError::MissingFields);
    }

    check_amount(record.amount)?;
    check_date(&record.date)?;
    // time is optional on public bookings
    if !record.time.is_empty() {
        check_time(&record.time)?;
    }
    Ok(())
}

pub fn validate_update(update: &UpdateRecord) -> Result<(), ValidationError> {
    check_amount(update.amount)?;
    if let Some(date) = &update.date {
        check_date(date)?;
    }
    if let Some(time) = update.time.as_deref().filter(|t| !t.is_empty()) {
        check_time(time)?;
    }
    Ok(())
}

pub fn validate_purchase(purchase: &CreatePurchase) -> Result<(), ValidationError> {
    let required = [&purchase.category_id, &purchase.name, &purchase.date];
    if required.iter().any(|field| field.trim().is_empty())
        || !purchase.amount.is_finite()
        || purchase.amount <= 0.0
    {
        return Err(ValidationError::MissingPurchaseFields);
    }
    check_date(&purchase.date)
}

fn check_amount(amount: Option<f64>) -> Result<(), ValidationError> {
    match amount {
        Some(value) if !value.is_finite() || value < 0.0 => Err(ValidationError::InvalidAmount),
        _ => Ok(()),
    }
}

// YYYY-MM-DD
fn check_date(date: &str) -> Result<(), ValidationError> {
    if matches_pattern(date, "dddd-dd-dd") {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate)
    }
}

// HH:MM
fn check_time(time: &str) -> Result<(), ValidationError> {
    if matches_pattern(time, "dd:dd") {
        Ok(())
    } else {
        Err(ValidationError::InvalidTime)
    }
}

// 'd' matches any ASCII digit, every other byte must match literally
fn matches_pattern(value: &str, pattern: &str) -> bool {
    value.len() == pattern.len()
        && value
            .bytes()
            .zip(pattern.bytes())
            .all(|(v, p)| if p == b'd' { v.is_ascii_digit() } else { v == p })
}
