// Infrastructure
pub mod config;
pub mod error;
pub mod metrics;

// Domain (template resolution and rendering)
pub mod template;

// Application layer
pub mod api;
pub mod server;
pub mod telemetry;
