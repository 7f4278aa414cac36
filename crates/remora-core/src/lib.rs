pub mod config;
pub mod profile;
pub mod query;
pub mod usage;

mod engine;
mod error;

#[cfg(test)]
mod tests;

pub use engine::{Remora, Selection};
pub use error::{Error, Result};
pub use profile::{ProfileFields, ProfileIndex, ProfileRecord};
pub use query::{DEFAULT_LIMIT, ProfileEntry, query};
pub use usage::UsageStore;
