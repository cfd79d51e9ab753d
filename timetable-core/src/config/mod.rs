//! Configuration for a generation run.

mod options;
mod settings;

pub use options::{GenerateOptions, Overrides};
pub use settings::Settings;
