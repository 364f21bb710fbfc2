//! Requirement string parsing
//!
//! This module provides the PEP 508 subset parser shared by the
//! requirement-list and project-metadata manifest parsers.

mod python;

pub use python::{parse_requirement, Requirement, Specifier};
