pub mod composition;
pub mod models;
pub mod services;
pub mod session;
pub mod tax;

pub use composition::Composition;
pub use models::*;
pub use services::{EventRecorder, ServiceError};
pub use tax::TaxLocationForm;
