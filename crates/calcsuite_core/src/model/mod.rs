//! Domain model shared by both engines.
//!
//! # Responsibility
//! - Define the closed input vocabulary of the calculator.
//! - Define the history record shapes both engines persist.
//!
//! # Invariants
//! - Action enums are exhaustive; dispatch sites must fail to compile when a
//!   variant is added.
//! - History records are immutable once created.

pub mod action;
pub mod history;
