//! Core domain models for stale-deps
//!
//! This module contains the fundamental types used throughout the application:
//! - Ecosystem types for supported registries
//! - Name normalization for loose package/import comparison
//! - Raw dependency declarations and deduplication
//! - Per-dependency health records
//! - Run-level summary counts

mod dependency;
mod ecosystem;
mod health;
mod name;
mod summary;

pub use dependency::{dedupe, DependencyKey, RawDependency};
pub use ecosystem::Ecosystem;
pub use health::{Assessment, DependencyHealth, HealthOutcome};
pub use name::normalize;
pub use summary::{AuditReport, AuditSummary};
