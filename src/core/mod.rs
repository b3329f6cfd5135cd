//! Core types shared across the pipeline.

mod driver;
mod state;

pub use driver::BuildMode;
pub use state::{is_shutdown, setup_shutdown_handler};
