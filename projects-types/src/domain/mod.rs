//! Domain models for the projects service.

pub mod currency;
pub mod money;
pub mod project;
pub mod project_id;

pub use currency::{Currency, CurrencyInfo};
pub use money::Money;
pub use project::{Project, TimeUnit};
pub use project_id::ProjectId;
