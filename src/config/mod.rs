//! JSON configuration files for the command line tools.

pub mod digitize;

pub use digitize::{load_config, parse_config, OutputConfig, RuntimeConfig};
