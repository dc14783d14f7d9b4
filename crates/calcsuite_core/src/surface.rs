//! Presentation collaborator seam.
//!
//! # Responsibility
//! - Define the narrow interface the UI implements (display + error sink).
//! - Drive engine actions with the render-after-mutation and
//!   report-then-reset contracts applied uniformly.
//!
//! # Invariants
//! - `render` is called after every handled action, success or failure.
//! - An engine error is reported once, then the engine is reset to a clean
//!   state; errors never stack.

use crate::engine::calculator::CalculatorEngine;
use crate::model::action::{CalcAction, Theme};
use crate::store::StateStore;
use log::warn;

/// What the core needs from the presentation layer.
///
/// The error message is expected to be shown transiently; how long it stays
/// on screen is presentation timing, the engine is already reset when
/// `show_error` returns.
pub trait Surface {
    /// Presents the operand and the pending-expression trace.
    fn render(&mut self, current_input: &str, expression: &str);

    /// Presents a non-fatal engine error.
    fn show_error(&mut self, message: &str);
}

/// Couples one calculator engine with one surface.
///
/// The entry point constructs engines and surfaces explicitly and wires
/// them here; nothing in the core reaches for ambient globals.
pub struct CalculatorFrontend<S: StateStore, V: Surface> {
    engine: CalculatorEngine<S>,
    surface: V,
}

impl<S: StateStore, V: Surface> CalculatorFrontend<S, V> {
    /// Wires engine and surface and renders the initial state.
    pub fn new(engine: CalculatorEngine<S>, mut surface: V) -> Self {
        surface.render(engine.current_input(), engine.expression());
        Self { engine, surface }
    }

    /// Handles one action: dispatch, report failures, render.
    pub fn handle(&mut self, action: CalcAction) {
        if let Err(err) = self.engine.dispatch(action) {
            warn!("event=calc_action module=calculator status=error action={action:?} error={err}");
            self.surface.show_error(&err.to_string());
            self.engine.clear();
        }
        self.surface
            .render(self.engine.current_input(), self.engine.expression());
    }

    /// Forwards a theme change to the engine's advisory hook.
    pub fn on_theme_change(&self, theme: Theme) {
        self.engine.on_theme_change(theme);
    }

    /// Read access for indicators (memory, angle mode, history).
    pub fn engine(&self) -> &CalculatorEngine<S> {
        &self.engine
    }
}
