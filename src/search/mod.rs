pub mod query;
pub mod scorer;
pub mod results;
pub mod executor;
