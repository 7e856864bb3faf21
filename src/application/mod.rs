mod application;
mod confirmation;
pub mod data;
mod input;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use runtime_config::RuntimeConfig;
