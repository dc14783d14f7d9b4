//! Static unit-conversion tables.
//!
//! # Responsibility
//! - Define every conversion category, its units and quick-conversion pairs.
//! - Provide keyed lookup over the table.
//!
//! # Invariants
//! - The table is immutable; engines never mutate category data.
//! - Every `factor` is the multiplicative ratio to the category base unit.
//! - Temperature units carry no factor; the converter routes them through
//!   dedicated affine formulas instead.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Category key that routes through affine temperature conversion.
pub const TEMPERATURE: &str = "temperature";

/// One unit within a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    pub symbol: &'static str,
    /// Ratio to the category base unit; `None` for the temperature family.
    pub factor: Option<f64>,
}

/// A pre-baked conversion shown as a quick-pick chip, with sample values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickPair {
    pub from: &'static str,
    pub to: &'static str,
    /// Display sample: `sample[0] from == sample[1] to`.
    pub sample: [f64; 2],
}

/// A conversion category and its unit table.
#[derive(Debug)]
pub struct Category {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub base_unit: &'static str,
    /// Unit table in presentation order.
    pub units: &'static [(&'static str, Unit)],
    pub quick: &'static [QuickPair],
}

impl Category {
    /// Looks up a unit by key.
    pub fn unit(&self, key: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|(unit_key, _)| *unit_key == key)
            .map(|(_, unit)| unit)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.unit(key).is_some()
    }
}

const fn linear(name: &'static str, symbol: &'static str, factor: f64) -> Unit {
    Unit {
        name,
        symbol,
        factor: Some(factor),
    }
}

const fn affine(name: &'static str, symbol: &'static str) -> Unit {
    Unit {
        name,
        symbol,
        factor: None,
    }
}

const fn quick(from: &'static str, to: &'static str, sample: [f64; 2]) -> QuickPair {
    QuickPair { from, to, sample }
}

/// All categories in presentation order.
pub static CATEGORIES: &[Category] = &[
    Category {
        key: "length",
        name: "Length",
        icon: "📏",
        base_unit: "meter",
        units: &[
            ("meter", linear("Meter", "m", 1.0)),
            ("kilometer", linear("Kilometer", "km", 1000.0)),
            ("centimeter", linear("Centimeter", "cm", 0.01)),
            ("millimeter", linear("Millimeter", "mm", 0.001)),
            ("inch", linear("Inch", "in", 0.0254)),
            ("foot", linear("Foot", "ft", 0.3048)),
            ("yard", linear("Yard", "yd", 0.9144)),
            ("mile", linear("Mile", "mi", 1609.344)),
            ("nautical_mile", linear("Nautical Mile", "nmi", 1852.0)),
        ],
        quick: &[
            quick("meter", "foot", [1.0, 3.28084]),
            quick("kilometer", "mile", [1.0, 0.621371]),
            quick("inch", "centimeter", [1.0, 2.54]),
            quick("foot", "meter", [1.0, 0.3048]),
        ],
    },
    Category {
        key: "weight",
        name: "Weight",
        icon: "⚖️",
        base_unit: "kilogram",
        units: &[
            ("kilogram", linear("Kilogram", "kg", 1.0)),
            ("gram", linear("Gram", "g", 0.001)),
            ("pound", linear("Pound", "lb", 0.453592)),
            ("ounce", linear("Ounce", "oz", 0.0283495)),
            ("ton", linear("Metric Ton", "t", 1000.0)),
            ("stone", linear("Stone", "st", 6.35029)),
            ("short_ton", linear("Short Ton", "ton", 907.185)),
            ("long_ton", linear("Long Ton", "long ton", 1016.05)),
        ],
        quick: &[
            quick("kilogram", "pound", [1.0, 2.20462]),
            quick("gram", "ounce", [1.0, 0.035274]),
            quick("pound", "kilogram", [1.0, 0.453592]),
            quick("stone", "kilogram", [1.0, 6.35029]),
        ],
    },
    Category {
        key: TEMPERATURE,
        name: "Temperature",
        icon: "🌡️",
        base_unit: "celsius",
        units: &[
            ("celsius", affine("Celsius", "°C")),
            ("fahrenheit", affine("Fahrenheit", "°F")),
            ("kelvin", affine("Kelvin", "K")),
            ("rankine", affine("Rankine", "°R")),
        ],
        quick: &[
            quick("celsius", "fahrenheit", [0.0, 32.0]),
            quick("celsius", "fahrenheit", [100.0, 212.0]),
            quick("fahrenheit", "celsius", [32.0, 0.0]),
            quick("fahrenheit", "celsius", [212.0, 100.0]),
        ],
    },
    Category {
        key: "volume",
        name: "Volume",
        icon: "🧪",
        base_unit: "liter",
        units: &[
            ("liter", linear("Liter", "L", 1.0)),
            ("milliliter", linear("Milliliter", "mL", 0.001)),
            ("gallon_us", linear("US Gallon", "gal", 3.78541)),
            ("gallon_uk", linear("UK Gallon", "gal UK", 4.54609)),
            ("quart_us", linear("US Quart", "qt", 0.946353)),
            ("pint_us", linear("US Pint", "pt", 0.473176)),
            ("cup_us", linear("US Cup", "cup", 0.236588)),
            ("fluid_ounce_us", linear("US Fluid Ounce", "fl oz", 0.0295735)),
            ("cubic_meter", linear("Cubic Meter", "m³", 1000.0)),
            ("cubic_foot", linear("Cubic Foot", "ft³", 28.3168)),
        ],
        quick: &[
            quick("liter", "gallon_us", [1.0, 0.264172]),
            quick("milliliter", "fluid_ounce_us", [1.0, 0.033814]),
            quick("gallon_us", "liter", [1.0, 3.78541]),
            quick("cup_us", "milliliter", [1.0, 236.588]),
        ],
    },
    Category {
        key: "area",
        name: "Area",
        icon: "📐",
        base_unit: "square_meter",
        units: &[
            ("square_meter", linear("Square Meter", "m²", 1.0)),
            ("square_kilometer", linear("Square Kilometer", "km²", 1_000_000.0)),
            ("square_centimeter", linear("Square Centimeter", "cm²", 0.0001)),
            ("square_foot", linear("Square Foot", "ft²", 0.092903)),
            ("square_inch", linear("Square Inch", "in²", 0.00064516)),
            ("square_yard", linear("Square Yard", "yd²", 0.836127)),
            ("acre", linear("Acre", "ac", 4046.86)),
            ("hectare", linear("Hectare", "ha", 10_000.0)),
            ("square_mile", linear("Square Mile", "mi²", 2_589_988.0)),
        ],
        quick: &[
            quick("square_meter", "square_foot", [1.0, 10.7639]),
            quick("acre", "square_meter", [1.0, 4046.86]),
            quick("hectare", "acre", [1.0, 2.47105]),
            quick("square_foot", "square_meter", [1.0, 0.092903]),
        ],
    },
    Category {
        key: "speed",
        name: "Speed",
        icon: "🚀",
        base_unit: "meter_per_second",
        units: &[
            ("meter_per_second", linear("Meter per Second", "m/s", 1.0)),
            ("kilometer_per_hour", linear("Kilometer per Hour", "km/h", 0.277778)),
            ("mile_per_hour", linear("Mile per Hour", "mph", 0.44704)),
            ("foot_per_second", linear("Foot per Second", "ft/s", 0.3048)),
            ("knot", linear("Knot", "kn", 0.514444)),
            ("mach", linear("Mach", "Ma", 343.0)),
        ],
        quick: &[
            quick("kilometer_per_hour", "mile_per_hour", [1.0, 0.621371]),
            quick("meter_per_second", "kilometer_per_hour", [1.0, 3.6]),
            quick("mile_per_hour", "kilometer_per_hour", [1.0, 1.60934]),
            quick("knot", "kilometer_per_hour", [1.0, 1.852]),
        ],
    },
    Category {
        key: "energy",
        name: "Energy",
        icon: "⚡",
        base_unit: "joule",
        units: &[
            ("joule", linear("Joule", "J", 1.0)),
            ("kilojoule", linear("Kilojoule", "kJ", 1000.0)),
            ("calorie", linear("Calorie", "cal", 4.184)),
            ("kilocalorie", linear("Kilocalorie", "kcal", 4184.0)),
            ("watt_hour", linear("Watt Hour", "Wh", 3600.0)),
            ("kilowatt_hour", linear("Kilowatt Hour", "kWh", 3_600_000.0)),
            ("btu", linear("British Thermal Unit", "BTU", 1055.06)),
            ("foot_pound", linear("Foot Pound", "ft⋅lb", 1.35582)),
        ],
        quick: &[
            quick("joule", "calorie", [1.0, 0.239006]),
            quick("kilocalorie", "kilojoule", [1.0, 4.184]),
            quick("kilowatt_hour", "joule", [1.0, 3_600_000.0]),
            quick("btu", "joule", [1.0, 1055.06]),
        ],
    },
    Category {
        key: "pressure",
        name: "Pressure",
        icon: "🎈",
        base_unit: "pascal",
        units: &[
            ("pascal", linear("Pascal", "Pa", 1.0)),
            ("kilopascal", linear("Kilopascal", "kPa", 1000.0)),
            ("megapascal", linear("Megapascal", "MPa", 1_000_000.0)),
            ("bar", linear("Bar", "bar", 100_000.0)),
            ("atmosphere", linear("Atmosphere", "atm", 101_325.0)),
            ("psi", linear("Pounds per Square Inch", "psi", 6894.76)),
            ("torr", linear("Torr", "Torr", 133.322)),
            ("mmhg", linear("mmHg", "mmHg", 133.322)),
        ],
        quick: &[
            quick("pascal", "bar", [1.0, 0.00001]),
            quick("psi", "pascal", [1.0, 6894.76]),
            quick("atmosphere", "pascal", [1.0, 101_325.0]),
            quick("bar", "psi", [1.0, 14.5038]),
        ],
    },
];

static CATEGORY_INDEX: Lazy<HashMap<&'static str, &'static Category>> = Lazy::new(|| {
    CATEGORIES
        .iter()
        .map(|category| (category.key, category))
        .collect()
});

/// Looks up a category by key.
pub fn category(key: &str) -> Option<&'static Category> {
    CATEGORY_INDEX.get(key).copied()
}
