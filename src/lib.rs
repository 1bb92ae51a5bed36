pub mod analytics;
pub mod classifier;
pub mod config;
pub mod db;
pub mod encoding;
pub mod import;
pub mod models;
pub mod pipeline;
pub mod recommendations;
pub mod report;
pub mod risk;
pub mod telemetry;
