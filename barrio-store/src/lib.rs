pub mod app_config;
pub mod database;
pub mod catalog_repo;
pub mod order_repo;
pub mod shipment_repo;
pub mod notification_repo;

pub use app_config::Config;
pub use database::DbClient;
pub use catalog_repo::StoreProductRepository;
pub use order_repo::StoreOrderRepository;
pub use shipment_repo::StoreShipmentRepository;
pub use notification_repo::StoreNotificationRepository;

use barrio_core::CoreError;

pub(crate) fn storage_error(err: sqlx::Error) -> CoreError {
    CoreError::StorageError(err.to_string())
}

pub(crate) fn corrupt_row(table: &str, id: i64, detail: impl std::fmt::Display) -> CoreError {
    CoreError::StorageError(format!("corrupt {} row {}: {}", table, id, detail))
}
