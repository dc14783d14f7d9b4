//! The two computational engines.
//!
//! # Responsibility
//! - Orchestrate calculator and converter state behind narrow APIs.
//! - Keep presentation and storage layers decoupled from the math.
//!
//! # Invariants
//! - Engines exclusively own their state; callers only read snapshots or
//!   issue mutation calls.
//! - Persistence is best-effort; a store failure never fails an operation.

pub mod calculator;
pub mod converter;
