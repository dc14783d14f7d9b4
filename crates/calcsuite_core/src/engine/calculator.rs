//! Scientific calculator engine.
//!
//! # Responsibility
//! - Run the accumulator-based arithmetic state machine (operand entry,
//!   pending-operator resolution, unary function application).
//! - Own the memory register, angle mode and calculation history.
//!
//! # Invariants
//! - A pending operator always has a captured left operand.
//! - `waiting_for_operand` means the next digit replaces `current_input`.
//! - Failed operations mutate nothing; the caller reports and resets.
//! - History is newest first, at most 100 entries in memory, 50 persisted.

use crate::model::action::{
    AngleMode, BinaryOp, CalcAction, Constant, MemoryOp, SciFunction, Theme,
};
use crate::model::history::{now_epoch_ms, HistoryEntry};
use crate::store::StateStore;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store slot holding `{memory, angle_mode, history}`.
const STATE_KEY: &str = "calculator-data";

const MAX_HISTORY_IN_MEMORY: usize = 100;
const MAX_HISTORY_PERSISTED: usize = 50;

/// Magnitudes below this snap to exactly zero when formatting results.
const ZERO_SNAP: f64 = 1e-10;

pub type CalcResult<T> = Result<T, CalcError>;

/// Non-fatal calculation failures, reported through the error sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    DivisionByZero,
    /// Input outside the domain of a scientific function.
    Domain(SciFunction),
    /// NaN or infinity produced by an otherwise valid operation.
    InvalidResult,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "cannot divide by zero"),
            Self::Domain(func) => write!(f, "invalid input for {}", func.name()),
            Self::InvalidResult => write!(f, "invalid calculation result"),
        }
    }
}

impl Error for CalcError {}

/// Persisted slice of calculator state.
#[derive(Serialize, Deserialize)]
struct PersistedState {
    memory: f64,
    angle_mode: AngleMode,
    history: Vec<HistoryEntry>,
}

/// Accumulator-based scientific calculator.
///
/// Construction rehydrates memory, angle mode and history from the store;
/// an unreadable or corrupt blob falls back to defaults. Every persistent
/// mutation writes the blob back, best-effort.
pub struct CalculatorEngine<S: StateStore> {
    current_input: String,
    expression: String,
    last_result: Option<f64>,
    pending_operator: Option<BinaryOp>,
    waiting_for_operand: bool,
    memory: f64,
    angle_mode: AngleMode,
    history: Vec<HistoryEntry>,
    next_history_id: u64,
    store: S,
}

impl<S: StateStore> CalculatorEngine<S> {
    pub fn new(store: S) -> Self {
        let mut engine = Self {
            current_input: "0".to_string(),
            expression: String::new(),
            last_result: None,
            pending_operator: None,
            waiting_for_operand: false,
            memory: 0.0,
            angle_mode: AngleMode::Deg,
            history: Vec::new(),
            next_history_id: 1,
            store,
        };
        engine.rehydrate();
        engine
    }

    /// Routes one presentation action to its operation.
    pub fn dispatch(&mut self, action: CalcAction) -> CalcResult<()> {
        match action {
            CalcAction::Digit(digit) => {
                self.input_digit(digit);
                Ok(())
            }
            CalcAction::Decimal => {
                self.input_decimal();
                Ok(())
            }
            CalcAction::Operator(op) => self.input_operator(op),
            CalcAction::Equals => self.calculate(),
            CalcAction::Clear => {
                self.clear();
                Ok(())
            }
            CalcAction::ClearEntry => {
                self.clear_entry();
                Ok(())
            }
            CalcAction::Backspace => {
                self.backspace();
                Ok(())
            }
            CalcAction::Negate => {
                self.negate();
                Ok(())
            }
            CalcAction::Percent => {
                self.apply_percent();
                Ok(())
            }
            CalcAction::Function(func) => self.apply_function(func),
            CalcAction::Memory(MemoryOp::Clear) => {
                self.memory_clear();
                Ok(())
            }
            CalcAction::Memory(MemoryOp::Recall) => {
                self.memory_recall();
                Ok(())
            }
            CalcAction::Memory(MemoryOp::Store) => {
                self.memory_store();
                Ok(())
            }
            CalcAction::Memory(MemoryOp::Add) => {
                self.memory_add();
                Ok(())
            }
            CalcAction::Memory(MemoryOp::Subtract) => {
                self.memory_subtract();
                Ok(())
            }
            CalcAction::Constant(constant) => self.input_constant(constant),
            CalcAction::ToggleAngleMode => {
                self.toggle_angle_mode();
                Ok(())
            }
        }
    }

    /// Appends a digit, or starts a fresh operand after an operator.
    ///
    /// Digits above 9 are ignored.
    pub fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let ch = char::from(b'0' + digit);
        if self.waiting_for_operand {
            self.current_input = ch.to_string();
            self.waiting_for_operand = false;
        } else if self.current_input == "0" {
            self.current_input = ch.to_string();
        } else {
            self.current_input.push(ch);
        }
    }

    /// Inserts the decimal point; a no-op if the operand already has one.
    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.current_input = "0.".to_string();
            self.waiting_for_operand = false;
        } else if !self.current_input.contains('.') {
            self.current_input.push('.');
        }
    }

    /// Captures or chains a binary operator.
    ///
    /// A previously pending operator is folded first (left to right, no
    /// precedence). Folding failures leave the pre-error state untouched so
    /// the user can correct the right operand.
    pub fn input_operator(&mut self, op: BinaryOp) -> CalcResult<()> {
        let Some(input_value) = self.parse_input() else {
            return Ok(());
        };

        if self.last_result.is_none() {
            self.last_result = Some(input_value);
        } else if self.pending_operator.is_some() {
            if let Some(result) = self.fold_pending()? {
                self.current_input = result.to_string();
                self.last_result = Some(result);
            }
        }

        self.waiting_for_operand = true;
        self.pending_operator = Some(op);
        self.expression = format!("{} {} ", self.current_input, op.symbol());
        Ok(())
    }

    /// The `=` action: resolves the pending operation and records it.
    pub fn calculate(&mut self) -> CalcResult<()> {
        if self.pending_operator.is_none() || self.waiting_for_operand {
            return Ok(());
        }
        let Some(result) = self.fold_pending()? else {
            return Ok(());
        };

        let expression = format!("{}{}", self.expression, self.current_input);
        self.push_history(expression, result);

        self.current_input = result.to_string();
        self.last_result = None;
        self.pending_operator = None;
        self.waiting_for_operand = true;
        self.expression.clear();
        Ok(())
    }

    /// Applies a unary scientific function to the current operand.
    ///
    /// Domain violations fail without touching state; a non-numeric operand
    /// is a silent no-op.
    pub fn apply_function(&mut self, func: SciFunction) -> CalcResult<()> {
        let Some(value) = self.parse_input() else {
            return Ok(());
        };

        let result = self.eval_function(func, value)?;
        let formatted = format_result(result)?;

        self.push_history(format!("{}({})", func.name(), value), formatted);
        self.current_input = formatted.to_string();
        self.waiting_for_operand = true;
        Ok(())
    }

    /// Loads a mathematical constant as the current operand.
    pub fn input_constant(&mut self, constant: Constant) -> CalcResult<()> {
        let formatted = format_result(constant.value())?;
        self.current_input = formatted.to_string();
        self.waiting_for_operand = true;
        Ok(())
    }

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
        self.persist();
    }

    /// Loads the register into the display and arms operand replacement.
    pub fn memory_recall(&mut self) {
        self.current_input = self.memory.to_string();
        self.waiting_for_operand = true;
    }

    pub fn memory_store(&mut self) {
        if let Some(value) = self.parse_input() {
            self.memory = value;
            self.persist();
        }
    }

    pub fn memory_add(&mut self) {
        if let Some(value) = self.parse_input() {
            self.memory += value;
            self.persist();
        }
    }

    pub fn memory_subtract(&mut self) {
        if let Some(value) = self.parse_input() {
            self.memory -= value;
            self.persist();
        }
    }

    /// Resets the arithmetic state. Memory, angle mode and history survive.
    pub fn clear(&mut self) {
        self.current_input = "0".to_string();
        self.expression.clear();
        self.last_result = None;
        self.pending_operator = None;
        self.waiting_for_operand = false;
    }

    /// Resets only the operand being entered.
    pub fn clear_entry(&mut self) {
        self.current_input = "0".to_string();
        self.waiting_for_operand = false;
    }

    /// Removes the last typed character, flooring at `0`.
    pub fn backspace(&mut self) {
        if self.current_input.len() > 1 {
            self.current_input.pop();
        } else {
            self.current_input = "0".to_string();
        }
    }

    /// Toggles the operand sign; zero stays unsigned.
    pub fn negate(&mut self) {
        if self.current_input == "0" {
            return;
        }
        if let Some(stripped) = self.current_input.strip_prefix('-') {
            self.current_input = stripped.to_string();
        } else {
            self.current_input.insert(0, '-');
        }
    }

    /// Divides the operand by 100 and arms operand replacement.
    pub fn apply_percent(&mut self) {
        if let Some(value) = self.parse_input() {
            self.current_input = (value / 100.0).to_string();
            self.waiting_for_operand = true;
        }
    }

    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
        self.persist();
    }

    /// Deletes one history entry by id; unknown ids are ignored.
    pub fn delete_history_entry(&mut self, id: u64) {
        let before = self.history.len();
        self.history.retain(|entry| entry.id != id);
        if self.history.len() != before {
            self.persist();
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist();
    }

    /// Loads a past result back into the display.
    ///
    /// Returns `false` when the id is unknown.
    pub fn recall_history_entry(&mut self, id: u64) -> bool {
        let Some(entry) = self.history.iter().find(|entry| entry.id == id) else {
            return false;
        };
        self.current_input = entry.result.to_string();
        self.waiting_for_operand = true;
        true
    }

    /// Advisory acknowledgment of a presentation theme change.
    pub fn on_theme_change(&self, theme: Theme) {
        debug!(
            "event=theme_change module=calculator status=ok theme={}",
            theme.label()
        );
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// History snapshot, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn parse_input(&self) -> Option<f64> {
        self.current_input.parse::<f64>().ok()
    }

    /// Resolves the pending binary operation against the current operand.
    ///
    /// `Ok(None)` when nothing is pending or the operand is not numeric.
    fn fold_pending(&self) -> CalcResult<Option<f64>> {
        let (Some(prev), Some(op)) = (self.last_result, self.pending_operator) else {
            return Ok(None);
        };
        let Some(current) = self.parse_input() else {
            return Ok(None);
        };

        let result = match op {
            BinaryOp::Add => prev + current,
            BinaryOp::Subtract => prev - current,
            BinaryOp::Multiply => prev * current,
            BinaryOp::Divide => {
                if current == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                prev / current
            }
            BinaryOp::Power => prev.powf(current),
        };

        format_result(result).map(Some)
    }

    fn eval_function(&self, func: SciFunction, value: f64) -> CalcResult<f64> {
        let result = match func {
            SciFunction::Sin => self.to_radians(value).sin(),
            SciFunction::Cos => self.to_radians(value).cos(),
            SciFunction::Tan => self.to_radians(value).tan(),
            SciFunction::Asin => {
                if !(-1.0..=1.0).contains(&value) {
                    return Err(CalcError::Domain(func));
                }
                self.from_radians(value.asin())
            }
            SciFunction::Acos => {
                if !(-1.0..=1.0).contains(&value) {
                    return Err(CalcError::Domain(func));
                }
                self.from_radians(value.acos())
            }
            SciFunction::Atan => self.from_radians(value.atan()),
            SciFunction::Ln => {
                if value <= 0.0 {
                    return Err(CalcError::Domain(func));
                }
                value.ln()
            }
            SciFunction::Log => {
                if value <= 0.0 {
                    return Err(CalcError::Domain(func));
                }
                value.log10()
            }
            SciFunction::Sqrt => {
                if value < 0.0 {
                    return Err(CalcError::Domain(func));
                }
                value.sqrt()
            }
            SciFunction::Cbrt => value.cbrt(),
            SciFunction::Square => value * value,
            SciFunction::Reciprocal => {
                if value == 0.0 {
                    return Err(CalcError::Domain(func));
                }
                1.0 / value
            }
            SciFunction::Factorial => {
                if value < 0.0 || value.fract() != 0.0 || value > 170.0 {
                    return Err(CalcError::Domain(func));
                }
                factorial(value)
            }
            SciFunction::Abs => value.abs(),
            SciFunction::Pow10 => 10f64.powf(value),
        };
        Ok(result)
    }

    fn to_radians(&self, value: f64) -> f64 {
        match self.angle_mode {
            AngleMode::Deg => value.to_radians(),
            AngleMode::Rad => value,
        }
    }

    fn from_radians(&self, value: f64) -> f64 {
        match self.angle_mode {
            AngleMode::Deg => value.to_degrees(),
            AngleMode::Rad => value,
        }
    }

    fn push_history(&mut self, expression: String, result: f64) {
        let entry = HistoryEntry {
            expression,
            result,
            timestamp: now_epoch_ms(),
            id: self.next_history_id,
        };
        self.next_history_id += 1;
        self.history.insert(0, entry);
        self.history.truncate(MAX_HISTORY_IN_MEMORY);
        self.persist();
    }

    fn rehydrate(&mut self) {
        let raw = match self.store.load(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                warn!(
                    "event=state_load module=calculator status=error error_code=store_read_failed error={err}"
                );
                return;
            }
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) => {
                self.memory = state.memory;
                self.angle_mode = state.angle_mode;
                self.history = state.history;
                self.history.truncate(MAX_HISTORY_IN_MEMORY);
                self.next_history_id = self
                    .history
                    .iter()
                    .map(|entry| entry.id)
                    .max()
                    .map_or(1, |max_id| max_id + 1);
                debug!(
                    "event=state_load module=calculator status=ok entries={}",
                    self.history.len()
                );
            }
            Err(err) => {
                // Corrupt blob: keep defaults rather than failing startup.
                warn!(
                    "event=state_load module=calculator status=error error_code=blob_parse_failed error={err}"
                );
            }
        }
    }

    fn persist(&self) {
        let state = PersistedState {
            memory: self.memory,
            angle_mode: self.angle_mode,
            history: self
                .history
                .iter()
                .take(MAX_HISTORY_PERSISTED)
                .cloned()
                .collect(),
        };
        let raw = match serde_json::to_string(&state) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=state_save module=calculator status=error error_code=blob_encode_failed error={err}"
                );
                return;
            }
        };
        if let Err(err) = self.store.save(STATE_KEY, &raw) {
            warn!(
                "event=state_save module=calculator status=error error_code=store_write_failed error={err}"
            );
        }
    }
}

/// Validates and normalizes a raw result for display.
///
/// Fails on NaN/infinity; snaps near-zero noise to exactly 0; rounds
/// non-integer values to 12 decimal digits. Idempotent.
pub fn format_result(value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::InvalidResult);
    }
    if value.abs() < ZERO_SNAP {
        return Ok(0.0);
    }
    if value.fract() == 0.0 {
        return Ok(value);
    }
    let rounded = format!("{value:.12}")
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidResult)?;
    Ok(rounded)
}

/// Formats a value for indicator display (memory register, history).
///
/// Very large or very small magnitudes switch to exponential notation;
/// everything else keeps at most 12 significant digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.abs() < ZERO_SNAP {
        return "0".to_string();
    }
    if value.abs() >= 1e10 || value.abs() < 1e-4 {
        return format!("{value:.6e}");
    }
    format!("{value:.11e}")
        .parse::<f64>()
        .unwrap_or(value)
        .to_string()
}

/// Recursive product; callers guarantee a non-negative integer input.
fn factorial(n: f64) -> f64 {
    if n <= 1.0 {
        1.0
    } else {
        n * factorial(n - 1.0)
    }
}
