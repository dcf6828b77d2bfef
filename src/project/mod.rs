//! Project-level settings shared by processing and export

pub mod schema;

pub use schema::TrailConfig;
