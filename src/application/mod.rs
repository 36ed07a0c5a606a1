// Application layer - Use cases and trait seams of the refresh cycle
pub mod aggregate_source;
pub mod dataset_store;
pub mod fetch_controller;
pub mod refresh_signal;
pub mod render_sink;
