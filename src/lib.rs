pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sink;
pub mod storage;
#[cfg(test)]
pub mod test_helpers;
pub mod zone;
