//! Unit conversion for the quantities used in chemistry calculations.
//!
//! Every unit kind converts through the base unit of its dimension
//! (g, L, Pa, K, mol). The kinds share the `UnitConversion` trait and the
//! `Unit` enum dispatches to them, so a mass and a pressure can never be
//! converted into each other.
use crate::chem_errors::ChemError;
use enum_dispatch::enum_dispatch;
use log::debug;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const ATM_IN_PA: f64 = 101_325.0;
const ZERO_CELSIUS_IN_K: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Volume,
    Pressure,
    Temperature,
    Amount,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Mass => "mass",
            Dimension::Volume => "volume",
            Dimension::Pressure => "pressure",
            Dimension::Temperature => "temperature",
            Dimension::Amount => "amount of substance",
        };
        write!(f, "{}", name)
    }
}

#[enum_dispatch]
pub trait UnitConversion {
    fn dimension(&self) -> Dimension;
    fn symbol(&self) -> &'static str;
    /// value in this unit -> value in the base unit of the dimension
    fn to_base(&self, value: f64) -> f64;
    /// value in the base unit of the dimension -> value in this unit
    fn from_base(&self, value: f64) -> f64;
}

/// base: gram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    Milligram,
    Gram,
    Kilogram,
    Tonne,
    Pound,
    Ounce,
}

impl MassUnit {
    fn grams(&self) -> f64 {
        match self {
            MassUnit::Milligram => 1e-3,
            MassUnit::Gram => 1.0,
            MassUnit::Kilogram => 1e3,
            MassUnit::Tonne => 1e6,
            MassUnit::Pound => 453.592_37,
            MassUnit::Ounce => 28.349_523_125,
        }
    }
}

impl UnitConversion for MassUnit {
    fn dimension(&self) -> Dimension {
        Dimension::Mass
    }
    fn symbol(&self) -> &'static str {
        match self {
            MassUnit::Milligram => "mg",
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
            MassUnit::Tonne => "t",
            MassUnit::Pound => "lb",
            MassUnit::Ounce => "oz",
        }
    }
    fn to_base(&self, value: f64) -> f64 {
        value * self.grams()
    }
    fn from_base(&self, value: f64) -> f64 {
        value / self.grams()
    }
}

/// base: liter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeUnit {
    Milliliter,
    Liter,
    CubicMeter,
    CubicCentimeter,
    CubicDecimeter,
}

impl VolumeUnit {
    fn liters(&self) -> f64 {
        match self {
            VolumeUnit::Milliliter | VolumeUnit::CubicCentimeter => 1e-3,
            VolumeUnit::Liter | VolumeUnit::CubicDecimeter => 1.0,
            VolumeUnit::CubicMeter => 1e3,
        }
    }
}

impl UnitConversion for VolumeUnit {
    fn dimension(&self) -> Dimension {
        Dimension::Volume
    }
    fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Milliliter => "mL",
            VolumeUnit::Liter => "L",
            VolumeUnit::CubicMeter => "m3",
            VolumeUnit::CubicCentimeter => "cm3",
            VolumeUnit::CubicDecimeter => "dm3",
        }
    }
    fn to_base(&self, value: f64) -> f64 {
        value * self.liters()
    }
    fn from_base(&self, value: f64) -> f64 {
        value / self.liters()
    }
}

/// base: pascal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureUnit {
    Pascal,
    Kilopascal,
    Atmosphere,
    Bar,
    MillimeterHg,
    Torr,
    Psi,
}

impl PressureUnit {
    fn pascals(&self) -> f64 {
        match self {
            PressureUnit::Pascal => 1.0,
            PressureUnit::Kilopascal => 1e3,
            PressureUnit::Atmosphere => ATM_IN_PA,
            PressureUnit::Bar => 1e5,
            PressureUnit::MillimeterHg => 133.322_387_415,
            PressureUnit::Torr => ATM_IN_PA / 760.0,
            PressureUnit::Psi => 6_894.757_293_168,
        }
    }
}

impl UnitConversion for PressureUnit {
    fn dimension(&self) -> Dimension {
        Dimension::Pressure
    }
    fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::Kilopascal => "kPa",
            PressureUnit::Atmosphere => "atm",
            PressureUnit::Bar => "bar",
            PressureUnit::MillimeterHg => "mmHg",
            PressureUnit::Torr => "torr",
            PressureUnit::Psi => "psi",
        }
    }
    fn to_base(&self, value: f64) -> f64 {
        value * self.pascals()
    }
    fn from_base(&self, value: f64) -> f64 {
        value / self.pascals()
    }
}

/// base: kelvin. The only dimension with offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl UnitConversion for TemperatureUnit {
    fn dimension(&self) -> Dimension {
        Dimension::Temperature
    }
    fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
    fn to_base(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Kelvin => value,
            TemperatureUnit::Celsius => value + ZERO_CELSIUS_IN_K,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + ZERO_CELSIUS_IN_K,
        }
    }
    fn from_base(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Kelvin => value,
            TemperatureUnit::Celsius => value - ZERO_CELSIUS_IN_K,
            TemperatureUnit::Fahrenheit => (value - ZERO_CELSIUS_IN_K) * 9.0 / 5.0 + 32.0,
        }
    }
}

/// base: mole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountUnit {
    Millimole,
    Mole,
    Kilomole,
}

impl AmountUnit {
    fn moles(&self) -> f64 {
        match self {
            AmountUnit::Millimole => 1e-3,
            AmountUnit::Mole => 1.0,
            AmountUnit::Kilomole => 1e3,
        }
    }
}

impl UnitConversion for AmountUnit {
    fn dimension(&self) -> Dimension {
        Dimension::Amount
    }
    fn symbol(&self) -> &'static str {
        match self {
            AmountUnit::Millimole => "mmol",
            AmountUnit::Mole => "mol",
            AmountUnit::Kilomole => "kmol",
        }
    }
    fn to_base(&self, value: f64) -> f64 {
        value * self.moles()
    }
    fn from_base(&self, value: f64) -> f64 {
        value / self.moles()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[enum_dispatch(UnitConversion)]
pub enum Unit {
    Mass(MassUnit),
    Volume(VolumeUnit),
    Pressure(PressureUnit),
    Temperature(TemperatureUnit),
    Amount(AmountUnit),
}

impl FromStr for Unit {
    type Err = ChemError;

    /// Unit symbols are matched case-insensitively ("mL", "ml", "ML").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit: Unit = match s.trim().trim_start_matches('°').to_lowercase().as_str() {
            "mg" => MassUnit::Milligram.into(),
            "g" => MassUnit::Gram.into(),
            "kg" => MassUnit::Kilogram.into(),
            "t" => MassUnit::Tonne.into(),
            "lb" | "lbs" => MassUnit::Pound.into(),
            "oz" => MassUnit::Ounce.into(),
            "ml" => VolumeUnit::Milliliter.into(),
            "l" => VolumeUnit::Liter.into(),
            "m3" | "m^3" => VolumeUnit::CubicMeter.into(),
            "cm3" | "cm^3" | "cc" => VolumeUnit::CubicCentimeter.into(),
            "dm3" | "dm^3" => VolumeUnit::CubicDecimeter.into(),
            "pa" => PressureUnit::Pascal.into(),
            "kpa" => PressureUnit::Kilopascal.into(),
            "atm" => PressureUnit::Atmosphere.into(),
            "bar" => PressureUnit::Bar.into(),
            "mmhg" => PressureUnit::MillimeterHg.into(),
            "torr" => PressureUnit::Torr.into(),
            "psi" => PressureUnit::Psi.into(),
            "k" => TemperatureUnit::Kelvin.into(),
            "c" => TemperatureUnit::Celsius.into(),
            "f" => TemperatureUnit::Fahrenheit.into(),
            "mmol" => AmountUnit::Millimole.into(),
            "mol" => AmountUnit::Mole.into(),
            "kmol" => AmountUnit::Kilomole.into(),
            _ => return Err(ChemError::UnknownUnit(s.trim().to_string())),
        };
        Ok(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Converts `value` between two units of the same dimension.
pub fn convert_units(value: f64, from: Unit, to: Unit) -> Result<f64, ChemError> {
    if from.dimension() != to.dimension() {
        return Err(ChemError::IncompatibleUnits(
            format!("{} ({})", from, from.dimension()),
            format!("{} ({})", to, to.dimension()),
        ));
    }
    Ok(to.from_base(from.to_base(value)))
}

/// Converts `value` between two units given by their symbols, e.g.
/// `convert(1.0, "atm", "kPa") == 101.325`.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, ChemError> {
    let (from_unit, to_unit) = (from.parse::<Unit>()?, to.parse::<Unit>()?);
    let converted = convert_units(value, from_unit, to_unit)?;
    debug!("{} {} = {} {}", value, from_unit, converted, to_unit);
    Ok(converted)
}

/// A number together with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    pub fn to_unit(&self, unit: Unit) -> Result<Quantity, ChemError> {
        Ok(Quantity::new(convert_units(self.value, self.unit, unit)?, unit))
    }

    /// value in the base unit of the dimension (g, L, Pa, K, mol)
    pub fn base_value(&self) -> f64 {
        self.unit.to_base(self.value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

const QUANTITY_PATTERN: &str =
    r"^\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s*(°?[A-Za-z][A-Za-z0-9^]*)\s*$";

static QUANTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(QUANTITY_PATTERN).expect("quantity pattern is a valid regex"));

/// Reads a quantity written as "10 kg", "2.5mol", "-40 °F" or "1e5 Pa".
pub fn parse_quantity(text: &str) -> Result<Quantity, ChemError> {
    let captures = QUANTITY_RE
        .captures(text)
        .ok_or_else(|| ChemError::Parse(format!("expected <number> <unit>, got '{}'", text.trim())))?;
    let value = captures[1]
        .parse::<f64>()
        .map_err(|e| ChemError::Parse(format!("{}: {}", &captures[1], e)))?;
    let unit = captures[2].parse::<Unit>()?;
    Ok(Quantity::new(value, unit))
}
