//! Core domain logic for CalcSuite.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod store;
pub mod surface;
pub mod units;

pub use engine::calculator::{format_result, CalcError, CalcResult, CalculatorEngine};
pub use engine::converter::{round_result, ConversionEngine};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::action::{
    AngleMode, BinaryOp, CalcAction, Constant, MemoryOp, SciFunction, Theme,
};
pub use model::history::{ConversionRecord, HistoryEntry};
pub use store::sqlite::SqliteStateStore;
pub use store::{MemoryStore, StateStore, StoreError, StoreResult};
pub use surface::{CalculatorFrontend, Surface};
pub use units::{category, Category, QuickPair, Unit, CATEGORIES};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
