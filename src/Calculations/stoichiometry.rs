//! Quantity calculations on top of the molar mass evaluator and the equation
//! balancer: mass <-> moles, the ideal gas law and stoichiometric ratios.
//! All results are rounded to 2 decimal places.
use crate::Calculations::units::{
    AmountUnit, Dimension, PressureUnit, Quantity, TemperatureUnit, Unit, VolumeUnit,
};
use crate::Database::lookup::ChemLookup;
use crate::Formula::equation_balancer::balance;
use crate::Formula::molmass::{DECIMAL_PLACES, molar_mass, round_to};
use crate::chem_errors::ChemError;
use log::{debug, info};

/// gas constant in L*atm/(mol*K)
pub const GAS_CONSTANT: f64 = 0.082057;

fn checked_molar_mass(formula: &str, lookup: &dyn ChemLookup) -> Result<f64, ChemError> {
    let mass = molar_mass(formula, lookup)?;
    if mass > 0.0 {
        Ok(mass)
    } else {
        Err(ChemError::InvalidFormula(format!("{} has zero molar mass", formula)))
    }
}

/// moles in `grams` of the substance
pub fn moles_from_mass(formula: &str, grams: f64, lookup: &dyn ChemLookup) -> Result<f64, ChemError> {
    let mass = checked_molar_mass(formula, lookup)?;
    Ok(round_to(grams / mass, DECIMAL_PLACES))
}

/// grams in `moles` of the substance
pub fn mass_from_moles(formula: &str, moles: f64, lookup: &dyn ChemLookup) -> Result<f64, ChemError> {
    let mass = checked_molar_mass(formula, lookup)?;
    Ok(round_to(moles * mass, DECIMAL_PLACES))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasVariable {
    Pressure,
    Volume,
    Moles,
    Temperature,
}

impl GasVariable {
    pub fn unit(&self) -> &'static str {
        match self {
            GasVariable::Pressure => "atm",
            GasVariable::Volume => "L",
            GasVariable::Moles => "mol",
            GasVariable::Temperature => "K",
        }
    }
}

/// State of an ideal gas with exactly one unknown variable.
/// Units: atm, L, mol, K.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GasQuery {
    pub pressure: Option<f64>,
    pub volume: Option<f64>,
    pub moles: Option<f64>,
    pub temperature: Option<f64>,
}

impl GasQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a quantity in the slot of its dimension, converted to atm, L,
    /// mol or K. Masses are not gas law variables.
    pub fn set_quantity(&mut self, quantity: &Quantity) -> Result<(), ChemError> {
        match quantity.dimension() {
            Dimension::Pressure => {
                self.pressure = Some(quantity.to_unit(Unit::Pressure(PressureUnit::Atmosphere))?.value)
            }
            Dimension::Volume => {
                self.volume = Some(quantity.to_unit(Unit::Volume(VolumeUnit::Liter))?.value)
            }
            Dimension::Amount => {
                self.moles = Some(quantity.to_unit(Unit::Amount(AmountUnit::Mole))?.value)
            }
            Dimension::Temperature => {
                self.temperature = Some(
                    quantity
                        .to_unit(Unit::Temperature(TemperatureUnit::Kelvin))?
                        .value,
                )
            }
            Dimension::Mass => {
                return Err(ChemError::IncompatibleUnits(
                    quantity.unit.to_string(),
                    "pressure, volume, amount or temperature".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Solved ideal gas variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasSolution {
    pub variable: GasVariable,
    pub value: f64,
}

/// Solves PV = nRT for the one variable left as `None`.
pub fn ideal_gas(query: &GasQuery) -> Result<GasSolution, ChemError> {
    let unknowns = [query.pressure, query.volume, query.moles, query.temperature]
        .iter()
        .filter(|v| v.is_none())
        .count();
    if unknowns != 1 {
        return Err(ChemError::MissingQuantity(
            "give three of pressure, volume, moles, temperature",
        ));
    }
    let known = [query.pressure, query.volume, query.moles, query.temperature];
    if known.iter().flatten().any(|&v| v <= 0.0 || !v.is_finite()) {
        return Err(ChemError::MissingQuantity("known values must be positive"));
    }
    let (variable, value) = match *query {
        GasQuery { pressure: None, volume: Some(v), moles: Some(n), temperature: Some(t) } => {
            (GasVariable::Pressure, n * GAS_CONSTANT * t / v)
        }
        GasQuery { pressure: Some(p), volume: None, moles: Some(n), temperature: Some(t) } => {
            (GasVariable::Volume, n * GAS_CONSTANT * t / p)
        }
        GasQuery { pressure: Some(p), volume: Some(v), moles: None, temperature: Some(t) } => {
            (GasVariable::Moles, p * v / (GAS_CONSTANT * t))
        }
        GasQuery { pressure: Some(p), volume: Some(v), moles: Some(n), temperature: None } => {
            (GasVariable::Temperature, p * v / (n * GAS_CONSTANT))
        }
        _ => {
            return Err(ChemError::MissingQuantity(
                "give three of pressure, volume, moles, temperature",
            ));
        }
    };
    debug!("ideal gas {:?}: {:?} = {}", query, variable, value);
    Ok(GasSolution {
        variable,
        value: round_to(value, DECIMAL_PLACES),
    })
}

/// Amount of the target substance of a reaction
#[derive(Debug, Clone, PartialEq)]
pub struct RatioResult {
    pub equation: String,
    pub target: String,
    pub moles: f64,
    pub grams: f64,
}

/// Balances `equation` and computes how much `target` corresponds to
/// `known_moles` of `known`: n(target) = n(known) * c(target) / c(known).
pub fn stoichiometric_ratio(
    equation: &str,
    known: &str,
    known_moles: f64,
    target: &str,
    lookup: &dyn ChemLookup,
) -> Result<RatioResult, ChemError> {
    let balanced = balance(equation)?;
    let known_coefficient = balanced
        .coefficient_of(known)
        .ok_or_else(|| ChemError::NotInEquation(known.trim().to_string()))?;
    let target_coefficient = balanced
        .coefficient_of(target)
        .ok_or_else(|| ChemError::NotInEquation(target.trim().to_string()))?;
    let moles = known_moles * target_coefficient as f64 / known_coefficient as f64;
    let grams = moles * checked_molar_mass(target, lookup)?;
    info!(
        "{}: {} mol {} -> {} mol {}",
        balanced, known_moles, known, moles, target
    );
    Ok(RatioResult {
        equation: balanced.to_string(),
        target: target.trim().to_string(),
        moles: round_to(moles, DECIMAL_PLACES),
        grams: round_to(grams, DECIMAL_PLACES),
    })
}
