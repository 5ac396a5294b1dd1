pub mod postgres;
pub mod query;
pub mod schema;
