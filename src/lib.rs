//! pkgit - Minimal source-hosted package manager library
//!
//! This library provides the resolution and materialization pipeline:
//! - Dependency spec parsing (`owner/repo[@version]`)
//! - Tag lookup against the hosting provider's tag feed (GitHub)
//! - Exact-match tag selection
//! - Archive download and Zip Slip safe extraction
//! - Manifest (`pkgit.req`) persistence

pub mod archive;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod registry;
pub mod resolver;
