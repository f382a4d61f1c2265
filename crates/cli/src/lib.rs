//! Command-line front end: configuration loading and the compute/render
//! pipeline behind the `taxinvoice` binary.

pub mod pipeline;
pub mod settings;

pub use pipeline::{compute, read_context, render, OutputTarget};
pub use settings::load_config;
