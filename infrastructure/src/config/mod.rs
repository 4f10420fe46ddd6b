//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    DeliberationSection, ExpertsSection, FileConfig, GatewaySection, RetrievalSection,
};
pub use loader::ConfigLoader;
