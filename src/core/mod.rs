pub mod types;
pub mod category;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod registry;
