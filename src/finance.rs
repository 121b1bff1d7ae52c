//! Monthly income breakdown and the two-bracket income tax.
//!
//! Only card payments are taxable. Card income up to the threshold (the
//! minimum wage) is taxed at the low rate, everything above it at the high
//! rate. Cash is reported but not taxed.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{PaymentMethod, Purchase, Record};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBrackets {
    pub threshold: f64,
    pub low_rate: f64,
    pub high_rate: f64,
}

impl Default for TaxBrackets {
    fn default() -> Self {
        Self {
            threshold: 780.0,
            low_rate: 0.10,
            high_rate: 0.25,
        }
    }
}

/// Callers must reject negative amounts before calling this.
pub fn compute_progressive_tax(amount: f64, brackets: &TaxBrackets) -> f64 {
    debug_assert!(amount >= 0.0, "taxable amount must be non-negative");

    if amount <= brackets.threshold {
        amount * brackets.low_rate
    } else {
        brackets.threshold * brackets.low_rate + (amount - brackets.threshold) * brackets.high_rate
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month_key: String,
    pub cash: f64,
    pub card: f64,
    pub total: f64,
    pub taxable_amount: f64,
    pub tax_amount: f64,
    pub expenses: f64,
    pub net_income: f64,
}

// "2026-03-14" -> "2026-03"
fn month_key(date: &str) -> Option<&str> {
    date.get(..7).filter(|key| key.as_bytes()[4] == b'-')
}

pub fn aggregate_monthly(
    records: &[Record],
    purchases: &[Purchase],
    brackets: &TaxBrackets,
) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, MonthlySummary> = BTreeMap::new();

    for record in records {
        let Some(amount) = record.amount.filter(|a| *a > 0.0) else {
            continue;
        };
        let Some(key) = month_key(&record.date) else {
            continue;
        };

        let month = months.entry(key.to_string()).or_insert_with(|| MonthlySummary {
            month_key: key.to_string(),
            ..Default::default()
        });
        month.total += amount;
        match record.payment_method {
            PaymentMethod::Cash => month.cash += amount,
            PaymentMethod::Card => {
                month.card += amount;
                month.taxable_amount += amount;
            }
            PaymentMethod::Unspecified => {}
        }
    }

    // expenses only land in months that had income
    for purchase in purchases {
        if let Some(month) = month_key(&purchase.date).and_then(|key| months.get_mut(key)) {
            month.expenses += purchase.amount;
        }
    }

    months
        .into_values()
        .map(|mut month| {
            month.tax_amount = compute_progressive_tax(month.taxable_amount, brackets);
            month.net_income = month.total - month.tax_amount - month.expenses;
            month
        })
        .collect()
}

pub fn filter_period(
    months: Vec<MonthlySummary>,
    year: Option<i32>,
    month: Option<u32>,
) -> Vec<MonthlySummary> {
    let Some(year) = year else {
        return months;
    };

    let prefix = match month {
        Some(month) => format!("{year:04}-{month:02}"),
        None => format!("{year:04}-"),
    };
    months
        .into_iter()
        .filter(|m| m.month_key.starts_with(&prefix))
        .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceReport {
    pub months: Vec<MonthlySummary>,
    pub totals: MonthlySummary,
    pub effective_tax_rate: f64,
}

impl FinanceReport {
    pub fn new(months: Vec<MonthlySummary>) -> Self {
        let totals = months.iter().fold(
            MonthlySummary {
                month_key: "total".to_string(),
                ..Default::default()
            },
            |mut acc, m| {
                acc.cash += m.cash;
                acc.card += m.card;
                acc.total += m.total;
                acc.taxable_amount += m.taxable_amount;
                acc.tax_amount += m.tax_amount;
                acc.expenses += m.expenses;
                acc.net_income += m.net_income;
                acc
            },
        );

        let effective_tax_rate = if totals.taxable_amount > 0.0 {
            totals.tax_amount / totals.taxable_amount * 100.0
        } else {
            0.0
        };

        Self {
            months,
            totals,
            effective_tax_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordSource, RecordStatus};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn paid(date: &str, amount: f64, payment_method: PaymentMethod) -> Record {
        Record {
            id: format!("record-{date}-{amount}"),
            client_name: "Client".into(),
            phone: "20000000".into(),
            social_media: None,
            service: "Haircut".into(),
            date: date.into(),
            time: "12:00".into(),
            comment: None,
            status: RecordStatus::Confirmed,
            source: RecordSource::Master,
            amount: Some(amount),
            payment_method,
            created_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    fn purchase(date: &str, amount: f64) -> Purchase {
        Purchase {
            id: format!("purchase-{date}"),
            category_id: "supplies".into(),
            name: "Shampoo".into(),
            amount,
            date: date.into(),
            description: String::new(),
            supplier: String::new(),
            created_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn tax_below_threshold_uses_low_rate() {
        assert!(approx(compute_progressive_tax(500.0, &TaxBrackets::default()), 50.0));
        assert!(approx(compute_progressive_tax(780.0, &TaxBrackets::default()), 78.0));
        assert!(approx(compute_progressive_tax(0.0, &TaxBrackets::default()), 0.0));
    }

    #[test]
    fn tax_above_threshold_splits_brackets() {
        assert!(approx(compute_progressive_tax(1000.0, &TaxBrackets::default()), 133.0));
    }

    #[test]
    fn only_card_income_is_taxed() {
        let records = vec![
            paid("2026-03-01", 300.0, PaymentMethod::Cash),
            paid("2026-03-05", 1000.0, PaymentMethod::Card),
            paid("2026-03-09", 20.0, PaymentMethod::Unspecified),
        ];
        let months = aggregate_monthly(&records, &[purchase("2026-03-20", 67.0)], &TaxBrackets::default());

        assert_eq!(months.len(), 1);
        let march = &months[0];
        assert_eq!(march.month_key, "2026-03");
        assert!(approx(march.total, 1320.0));
        assert!(approx(march.cash, 300.0));
        assert!(approx(march.card, 1000.0));
        assert!(approx(march.taxable_amount, 1000.0));
        assert!(approx(march.tax_amount, 133.0));
        assert!(approx(march.expenses, 67.0));
        assert!(approx(march.net_income, 1320.0 - 133.0 - 67.0));
    }

    #[test]
    fn months_are_sorted_and_unpaid_records_skipped() {
        let mut free = paid("2026-01-10", 0.0, PaymentMethod::Card);
        free.amount = None;
        let records = vec![
            paid("2026-02-10", 50.0, PaymentMethod::Card),
            free,
            paid("2025-12-24", 80.0, PaymentMethod::Cash),
        ];
        let months = aggregate_monthly(&records, &[purchase("2026-01-05", 10.0)], &TaxBrackets::default());

        let keys: Vec<_> = months.iter().map(|m| m.month_key.as_str()).collect();
        assert_eq!(keys, ["2025-12", "2026-02"]);
        assert!(months.iter().all(|m| m.expenses == 0.0));
    }

    #[test]
    fn filter_and_totals() {
        let records = vec![
            paid("2025-11-03", 100.0, PaymentMethod::Card),
            paid("2026-01-03", 200.0, PaymentMethod::Card),
            paid("2026-02-03", 900.0, PaymentMethod::Card),
        ];
        let months = aggregate_monthly(&records, &[], &TaxBrackets::default());

        assert_eq!(filter_period(months.clone(), None, Some(1)).len(), 3);
        assert_eq!(filter_period(months.clone(), Some(2026), None).len(), 2);
        let january = filter_period(months.clone(), Some(2026), Some(1));
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].month_key, "2026-01");

        let report = FinanceReport::new(filter_period(months, Some(2026), None));
        // 20 + (78 + 120 * 0.25)
        assert!(approx(report.totals.tax_amount, 128.0));
        assert!(approx(report.effective_tax_rate, 128.0 / 1100.0 * 100.0));
    }

    #[test]
    fn empty_report_has_zero_rate() {
        let report = FinanceReport::new(Vec::new());
        assert_eq!(report.effective_tax_rate, 0.0);
        assert_eq!(report.totals.total, 0.0);
    }
}
