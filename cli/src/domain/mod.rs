//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod container;
pub mod descriptor;
pub mod detect;
pub mod error;
pub mod naming;
pub mod record;

pub use config::{AutodockConfig, validate_config_key, validate_config_value};
pub use container::{PsQuery, RunSpec, parse_names, parse_status};
pub use descriptor::{BaseImages, ContainerDescriptor, DESCRIPTOR_FILE};
pub use error::{ConfigError, DetectError, EngineError, RecordError};
pub use naming::{derive_default_name, resolve_name};
