pub mod commands;
pub mod error;
pub mod install;
pub mod link;
pub mod list;
pub mod lookup;
pub mod paths;
pub mod resolver;
pub mod runtime;
pub mod settings;

pub use error::{LookupError, UseError};
pub use resolver::{Resolution, UseOutcome, VersionResolver};
