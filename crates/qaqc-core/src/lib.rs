//! # qaqc-core
//!
//! Core types, rule evaluation, and error types for the QA/QC tracker.
//!
//! This crate provides the foundational types shared across all qaqc crates:
//! - Entity structs for all domain objects (projects, events, documents, questions, ...)
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Cross-cutting error types
//! - The question evaluator and the process runner that aggregates verdicts
//! - Pagination envelope for list responses

pub mod checklist;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod evaluation;
pub mod ids;
pub mod pagination;
pub mod runner;
pub mod values;
