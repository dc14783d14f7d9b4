use calcsuite_core::{category, ConversionEngine, MemoryStore, CATEGORIES};

fn engine() -> ConversionEngine<MemoryStore> {
    ConversionEngine::new(MemoryStore::new())
}

#[test]
fn linear_conversion_scales_through_the_base_unit() {
    let converter = engine();

    let feet = converter.convert(100.0, "meter", "foot", "length");
    assert!((feet - 328.08399).abs() < 1e-9, "got {feet}");

    let miles = converter.convert(5.0, "kilometer", "mile", "length");
    assert!((miles - 3.106856).abs() < 1e-9, "got {miles}");

    let pounds = converter.convert(1.0, "kilogram", "pound", "weight");
    assert!((pounds - 2.204624).abs() < 1e-9, "got {pounds}");
}

#[test]
fn linear_round_trip_is_stable_within_rounding() {
    let converter = engine();
    for value in [0.5, 1.0, 42.0, 328.084, 12345.6] {
        let feet = converter.convert(value, "meter", "foot", "length");
        let back = converter.convert(feet, "foot", "meter", "length");
        assert!((back - value).abs() < 1e-5, "{value} -> {feet} -> {back}");
    }
}

#[test]
fn invalid_values_convert_to_zero() {
    let converter = engine();
    assert_eq!(converter.convert(0.0, "meter", "foot", "length"), 0.0);
    assert_eq!(converter.convert(f64::NAN, "meter", "foot", "length"), 0.0);
    assert_eq!(
        converter.convert(f64::INFINITY, "meter", "foot", "length"),
        0.0
    );
}

#[test]
fn unknown_category_converts_to_zero() {
    let converter = engine();
    assert_eq!(converter.convert(5.0, "meter", "foot", "frequency"), 0.0);
}

#[test]
fn unknown_linear_unit_falls_back_to_factor_one() {
    let converter = engine();
    assert_eq!(converter.convert(2.0, "bogus", "meter", "length"), 2.0);
}

#[test]
fn temperature_conversions_use_the_affine_table() {
    let converter = engine();
    assert_eq!(
        converter.convert(100.0, "celsius", "fahrenheit", "temperature"),
        212.0
    );
    assert_eq!(
        converter.convert(-40.0, "fahrenheit", "celsius", "temperature"),
        -40.0
    );
    assert_eq!(
        converter.convert(300.0, "kelvin", "celsius", "temperature"),
        26.85
    );
    assert_eq!(
        converter.convert(100.0, "celsius", "rankine", "temperature"),
        671.67
    );
    assert_eq!(
        converter.convert(491.67, "rankine", "fahrenheit", "temperature"),
        32.0
    );
}

#[test]
fn temperature_round_trip_is_stable() {
    let converter = engine();
    let fahrenheit = converter.convert(100.0, "celsius", "fahrenheit", "temperature");
    let back = converter.convert(fahrenheit, "fahrenheit", "celsius", "temperature");
    assert!((back - 100.0).abs() < 1e-6, "got {back}");
}

#[test]
fn linear_formula_renders_the_unit_ratio() {
    let converter = engine();
    assert_eq!(
        converter.formula("kilometer", "meter", "length"),
        "1 Kilometer = 1000 Meter"
    );
    assert_eq!(
        converter.formula("meter", "kilometer", "length"),
        "1 Meter = 0.001 Kilometer"
    );
    // Torr and mmHg share a factor.
    assert_eq!(
        converter.formula("torr", "mmhg", "pressure"),
        "1 Torr = 1 mmHg"
    );
}

#[test]
fn formula_falls_back_to_raw_keys_for_unknown_units() {
    let converter = engine();
    assert_eq!(
        converter.formula("bogus", "meter", "length"),
        "1 bogus = 1 Meter"
    );
    assert_eq!(converter.formula("meter", "foot", "frequency"), "");
}

#[test]
fn temperature_formula_covers_rankine_pairs() {
    let converter = engine();
    assert_eq!(
        converter.formula("celsius", "fahrenheit", "temperature"),
        "°F = (°C × 9/5) + 32"
    );
    assert_eq!(
        converter.formula("celsius", "rankine", "temperature"),
        "°R = (°C × 9/5) + 491.67"
    );
    assert_eq!(
        converter.formula("rankine", "kelvin", "temperature"),
        "K = °R × 5/9"
    );
    // Identity pairs keep the generic fallback.
    assert_eq!(
        converter.formula("celsius", "celsius", "temperature"),
        "Convert celsius to celsius"
    );
}

#[test]
fn validity_gate_rejects_unknown_keys_and_empty_values() {
    let converter = engine();
    assert!(converter.is_valid_conversion(5.0, "meter", "foot", "length"));
    assert!(!converter.is_valid_conversion(0.0, "meter", "foot", "length"));
    assert!(!converter.is_valid_conversion(f64::NAN, "meter", "foot", "length"));
    assert!(!converter.is_valid_conversion(5.0, "meter", "foot", "frequency"));
    assert!(!converter.is_valid_conversion(5.0, "meter", "bogus", "length"));
    assert!(!converter.is_valid_conversion(5.0, "bogus", "foot", "length"));
}

#[test]
fn record_appends_only_valid_conversions() {
    let mut converter = engine();

    let output = converter.record(1.0, "meter", "foot", "length");
    assert_eq!(output, Some(3.28084));
    assert_eq!(converter.history().len(), 1);

    let entry = &converter.history()[0];
    assert_eq!(entry.category, "length");
    assert_eq!(entry.input_value, 1.0);
    assert_eq!(entry.input_unit, "meter");
    assert_eq!(entry.output_value, 3.28084);
    assert_eq!(entry.output_unit, "foot");

    assert_eq!(converter.record(1.0, "meter", "bogus", "length"), None);
    assert_eq!(converter.history().len(), 1);
}

#[test]
fn table_accessors_expose_the_static_data() {
    let converter = engine();
    assert_eq!(CATEGORIES.len(), 8);
    assert_eq!(converter.categories().len(), 8);
    assert_eq!(converter.category_units("length").len(), 9);
    assert_eq!(converter.quick_conversions("length").len(), 4);
    assert!(converter.category_units("frequency").is_empty());
    assert!(converter.quick_conversions("frequency").is_empty());

    let length = category("length").expect("length category must exist");
    assert_eq!(length.base_unit, "meter");
    let meter = length.unit("meter").expect("meter must exist");
    assert_eq!(meter.symbol, "m");
    assert_eq!(meter.factor, Some(1.0));
}
