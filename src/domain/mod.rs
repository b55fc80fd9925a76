//! Core domain models for pkgit
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency specs parsed from `owner/repo[@version]` strings
//! - Provider-neutral tags and the capability trait provider records implement
//! - Supported hosting providers

mod provider;
mod spec;
mod tag;

pub use provider::Provider;
pub use spec::DependencySpec;
pub use tag::{Tag, TaggedRelease};
