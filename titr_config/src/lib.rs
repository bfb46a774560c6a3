mod schema;

pub use schema::{Config, LimitsConfig};
