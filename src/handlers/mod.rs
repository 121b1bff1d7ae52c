mod finances;
mod health;
mod metrics;
mod purchases;
mod records;

pub use finances::finances_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use purchases::{
    create_purchase_handler, delete_purchase_handler, list_purchases_handler, update_purchase_handler,
};
pub use records::{
    create_record_handler, delete_record_handler, get_record_handler, list_records_handler,
    update_record_handler,
};
