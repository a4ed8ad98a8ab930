pub mod configuration;
pub mod questions;
pub mod server;
pub mod telemetry;
pub mod view;
