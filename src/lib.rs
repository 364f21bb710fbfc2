//! stale-deps - Dependency health audit library
//!
//! This library provides the pipeline behind the `stale-deps` binary:
//! - Manifest parsing (requirements.txt, pyproject.toml, package.json)
//! - Release metadata lookups on PyPI and npm
//! - Version drift and staleness classification
//! - Static import detection for Python sources

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod health;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod usage;
