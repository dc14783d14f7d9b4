//! Input action vocabulary.
//!
//! # Responsibility
//! - Enumerate every action the presentation layer can send to the
//!   calculator engine.
//! - Map operators and functions to their display spellings.
//!
//! # Invariants
//! - One action corresponds to exactly one engine operation.
//! - Display symbols are stable; the expression trace and history entries
//!   are built from them.

use serde::{Deserialize, Serialize};

/// Angle interpretation for trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    Deg,
    Rad,
}

impl AngleMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Deg => Self::Rad,
            Self::Rad => Self::Deg,
        }
    }

    /// Indicator label shown next to the display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Deg => "DEG",
            Self::Rad => "RAD",
        }
    }
}

/// Binary operators resolved by the pending-operator accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    /// Display spelling used in the expression trace and history.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }
}

/// Unary scientific functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SciFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Log,
    Sqrt,
    Cbrt,
    Square,
    Reciprocal,
    Factorial,
    Abs,
    Pow10,
}

impl SciFunction {
    /// Name used in history entries (`sqrt(9)`) and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Square => "square",
            Self::Reciprocal => "reciprocal",
            Self::Factorial => "factorial",
            Self::Abs => "abs",
            Self::Pow10 => "pow10",
        }
    }
}

/// Memory register operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOp {
    Clear,
    Recall,
    Store,
    Add,
    Subtract,
}

/// Mathematical constants available as single-keystroke input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// The complete calculator input vocabulary.
///
/// Every button and keyboard shortcut of the presentation layer maps to one
/// of these variants; `CalculatorEngine::dispatch` matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcAction {
    /// A single digit 0-9.
    Digit(u8),
    Decimal,
    Operator(BinaryOp),
    Equals,
    Clear,
    ClearEntry,
    Backspace,
    Negate,
    Percent,
    Function(SciFunction),
    Memory(MemoryOp),
    Constant(Constant),
    ToggleAngleMode,
}

/// Color theme announced by the presentation layer.
///
/// The engines only acknowledge theme changes; theming itself is
/// presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}
