//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `calcsuite_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use calcsuite_core::{
    BinaryOp, CalcAction, CalculatorEngine, CalculatorFrontend, ConversionEngine, MemoryStore,
    Surface,
};

struct StdoutSurface;

impl Surface for StdoutSurface {
    fn render(&mut self, current_input: &str, expression: &str) {
        println!("display={current_input} expression={expression:?}");
    }

    fn show_error(&mut self, message: &str) {
        println!("error={message}");
    }
}

fn main() {
    println!("calcsuite_core ping={}", calcsuite_core::ping());
    println!("calcsuite_core version={}", calcsuite_core::core_version());

    // One deterministic pass through each engine, against a throwaway store.
    let store = MemoryStore::new();

    let mut frontend =
        CalculatorFrontend::new(CalculatorEngine::new(&store), StdoutSurface);
    for action in [
        CalcAction::Digit(1),
        CalcAction::Digit(2),
        CalcAction::Operator(BinaryOp::Add),
        CalcAction::Digit(7),
        CalcAction::Decimal,
        CalcAction::Digit(5),
        CalcAction::Equals,
    ] {
        frontend.handle(action);
    }

    let converter = ConversionEngine::new(&store);
    println!(
        "convert 100 meter->foot = {}",
        converter.convert(100.0, "meter", "foot", "length")
    );
    println!(
        "formula celsius->fahrenheit: {}",
        converter.formula("celsius", "fahrenheit", "temperature")
    );
}
