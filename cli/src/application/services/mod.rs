//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod config_service;
pub mod create;
pub mod delete;
pub mod detect;
pub mod inspect;
pub mod logs;
pub mod rebuild;
pub mod show;
pub mod teardown;
