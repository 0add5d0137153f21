pub mod config;
pub mod generator;
pub mod host;
pub mod imports;
pub mod snapshot;
