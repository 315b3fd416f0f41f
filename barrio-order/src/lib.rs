pub mod builder;
pub mod carriers;
pub mod error;
pub mod form;
pub mod notifications;
pub mod orchestrator;
pub mod selection;
pub mod service;

pub use builder::{OrderBuilder, PackageMetadata};
pub use carriers::CarrierRegistry;
pub use error::{NotificationError, OrderError, ValidationError};
pub use form::OrderForm;
pub use notifications::{DispatchRecord, OrderNotificationSubject, OrderObserver};
pub use orchestrator::{OrderConfirmation, OrderOrchestrator};
pub use selection::{PolicyKind, ProviderSelector, Selection, SelectionPolicy};
pub use service::{OrderService, OrderStatusView};
