// Presentation layer - Chart bindings and filter input
pub mod filter_input;
pub mod plot_binder;
