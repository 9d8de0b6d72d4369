mod app;
mod http;
mod measure;
mod store;
mod telemetry;
mod validation;

pub use app::{AppError, AppResult};
pub use http::HttpError;
pub use measure::MeasureError;
pub use store::StoreError;
pub use telemetry::TelemetryError;
pub use validation::ValidationError;
