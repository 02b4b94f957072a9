//! # In-memory element and ion tables
//!
//! `ChemDatabase` is the lookup-table collaborator of the calculations: it holds
//! the periodic table and the table of polyatomic ions, answers lookups by key
//! and supports the ion management flow (insert, delete, bulk reset).
//!
//! The canonical data set is bundled with the crate (`data/elements.json` and
//! `data/ions.json`); other data files can be used through the library manager
//! configuration. Ion molar masses are not stored in the source data, they are
//! computed from the element table whenever an ion is added.
//!
//! ```rust, ignore
//! let mut db = ChemDatabase::canonical()?;
//! db.insert_ion("Azide", "N3", -1)?;
//! db.delete_ion("*")?; // back to the canonical ion table
//! ```
use crate::Database::lookup::{ChemLookup, ElementRecord, IonRecord, LookupHit};
use crate::Formula::molmass::molar_mass;
use crate::chem_errors::ChemError;
use crate::library_manager::{LibraryManager, with_library_manager};
use log::{error, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const CANONICAL_ELEMENTS: &str = include_str!("../../data/elements.json");
const CANONICAL_IONS: &str = include_str!("../../data/ions.json");

/// Source form of an ion: molar mass is derived, not stored
#[derive(Debug, Clone, Deserialize)]
struct IonSeed {
    name: String,
    formula: String,
    charge: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ChemDatabase {
    elements: HashMap<String, ElementRecord>,
    ions: HashMap<String, IonRecord>,
}

/// Parses a JSON array of records, reporting the position of a syntax error.
fn parse_table<T: DeserializeOwned>(json: &str, source: &str) -> Result<Vec<T>, ChemError> {
    match serde_json::from_str::<Vec<T>>(json) {
        Ok(records) => {
            info!("Successfully parsed {} records from {}", records.len(), source);
            Ok(records)
        }
        Err(e) => {
            error!(
                "Error parsing {} at line {}, column {}: {}",
                source,
                e.line(),
                e.column(),
                e
            );
            if let Some(problem_line) = json.lines().nth(e.line().saturating_sub(1)) {
                error!("Problematic line: {}", problem_line);
            }
            Err(ChemError::Serde(e))
        }
    }
}

impl ChemDatabase {
    /// Builds the tables from ready records. Ions with a zero molar mass get it
    /// computed from the element table when possible.
    pub fn from_records(elements: Vec<ElementRecord>, ions: Vec<IonRecord>) -> Self {
        let mut db = ChemDatabase {
            elements: elements
                .into_iter()
                .map(|e| (e.symbol.clone(), e))
                .collect(),
            ions: HashMap::new(),
        };
        for mut ion in ions {
            if ion.molar_mass == 0.0 {
                if let Ok(mass) = molar_mass(&ion.formula, &db) {
                    ion.molar_mass = mass;
                }
            }
            db.ions.insert(ion.formula.clone(), ion);
        }
        db
    }

    pub fn from_json(elements_json: &str, ions_json: &str) -> Result<Self, ChemError> {
        let elements: Vec<ElementRecord> = parse_table(elements_json, "element table")?;
        let mut db = ChemDatabase::from_records(elements, Vec::new());
        db.load_ions(ions_json)?;
        Ok(db)
    }

    /// Canonical data bundled with the crate
    pub fn canonical() -> Result<Self, ChemError> {
        Self::from_json(CANONICAL_ELEMENTS, CANONICAL_IONS)
    }

    pub fn from_files(elements_path: &Path, ions_path: &Path) -> Result<Self, ChemError> {
        let elements_json = fs::read_to_string(elements_path)?;
        let ions_json = fs::read_to_string(ions_path)?;
        Self::from_json(&elements_json, &ions_json)
    }

    /// Loads the files named in the configuration; a file that does not exist
    /// is replaced by the canonical data.
    pub fn from_manager(manager: &LibraryManager) -> Result<Self, ChemError> {
        let read_or_canonical = |path: &str, canonical: &'static str| -> Result<String, ChemError> {
            if Path::new(path).exists() {
                Ok(fs::read_to_string(path)?)
            } else {
                warn!("data file {} not found, using bundled data", path);
                Ok(canonical.to_string())
            }
        };
        let elements_json = read_or_canonical(manager.elements_base_path(), CANONICAL_ELEMENTS)?;
        let ions_json = read_or_canonical(manager.ions_base_path(), CANONICAL_IONS)?;
        Self::from_json(&elements_json, &ions_json)
    }

    pub fn from_config() -> Result<Self, ChemError> {
        with_library_manager(Self::from_manager)
    }

    /// Replaces the ion table with the ions in `ions_json`. Accepts both the
    /// short source form (name, formula, charge) and saved records.
    fn load_ions(&mut self, ions_json: &str) -> Result<(), ChemError> {
        let seeds: Vec<IonSeed> = parse_table(ions_json, "ion table")?;
        self.ions.clear();
        for seed in seeds {
            let mass = match molar_mass(&seed.formula, &*self) {
                Ok(mass) => mass,
                Err(e) => {
                    warn!("ion {} skipped: {}", seed.formula, e);
                    continue;
                }
            };
            self.ions.insert(
                seed.formula.clone(),
                IonRecord {
                    name: seed.name,
                    formula: seed.formula,
                    charge: seed.charge,
                    molar_mass: mass,
                },
            );
        }
        Ok(())
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn ion_count(&self) -> usize {
        self.ions.len()
    }

    /// elements ordered by atomic number
    pub fn elements(&self) -> Vec<&ElementRecord> {
        let mut elements: Vec<&ElementRecord> = self.elements.values().collect();
        elements.sort_by_key(|e| e.atomic_number);
        elements
    }

    /// ions ordered by formula
    pub fn ions(&self) -> Vec<&IonRecord> {
        let mut ions: Vec<&IonRecord> = self.ions.values().collect();
        ions.sort_by(|a, b| a.formula.cmp(&b.formula));
        ions
    }

    /// `+database <query>`: element symbol first, then ion formula, then
    /// element or ion name (case insensitive).
    pub fn find(&self, query: &str) -> Option<LookupHit<'_>> {
        let query = query.trim();
        if let Some(element) = self.elements.get(query) {
            return Some(LookupHit::Element(element));
        }
        if let Some(ion) = self.ions.get(query) {
            return Some(LookupHit::Ion(ion));
        }
        let lowercase = query.to_lowercase();
        if let Some(element) = self
            .elements
            .values()
            .find(|e| e.name.to_lowercase() == lowercase)
        {
            return Some(LookupHit::Element(element));
        }
        self.ions
            .values()
            .find(|i| i.name.to_lowercase() == lowercase)
            .map(LookupHit::Ion)
    }

    /// Adds a new ion. The formula is the key: inserting an existing formula
    /// fails with `DuplicateKey` carrying the stored entry.
    pub fn insert_ion(&mut self, name: &str, formula: &str, charge: i64) -> Result<&IonRecord, ChemError> {
        let formula = formula.trim();
        if let Some(existing) = self.ions.get(formula) {
            return Err(ChemError::DuplicateKey(Box::new(existing.clone())));
        }
        let mass = molar_mass(formula, &*self)?;
        let record = IonRecord {
            name: name.trim().to_string(),
            formula: formula.to_string(),
            charge,
            molar_mass: mass,
        };
        info!("ion {} ({}) added", record.formula, record.name);
        Ok(self.ions.entry(formula.to_string()).or_insert(record))
    }

    /// Deletes an ion by formula and returns whether it was stored.
    /// `"*"` drops the whole ion table and reloads the canonical one.
    pub fn delete_ion(&mut self, formula: &str) -> Result<bool, ChemError> {
        let formula = formula.trim();
        if formula == "*" {
            info!("ion table reset to canonical data");
            self.load_ions(CANONICAL_IONS)?;
            return Ok(true);
        }
        Ok(self.ions.remove(formula).is_some())
    }

    /// Writes the ion table as a pretty printed JSON array
    pub fn save_ions(&self, path: &Path) -> Result<(), ChemError> {
        let content = serde_json::to_string_pretty(&self.ions())?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl ChemLookup for ChemDatabase {
    fn get_element(&self, symbol: &str) -> Option<&ElementRecord> {
        self.elements.get(symbol)
    }

    fn get_ion(&self, formula: &str) -> Option<&IonRecord> {
        self.ions.get(formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_canonical_tables() {
        let db = ChemDatabase::canonical().unwrap();
        assert_eq!(db.element_count(), 118);
        assert!(db.ion_count() > 20);
        let hydrogen = db.get_element("H").unwrap();
        assert_eq!(hydrogen.atomic_number, 1);
        assert_eq!(db.elements()[0].symbol, "H");
        let technetium = db.get_element("Tc").unwrap();
        assert_eq!(technetium.molar_mass_value(), Some(98.0));
        let sulfate = db.get_ion("SO4").unwrap();
        assert_eq!(sulfate.charge, -2);
        assert_relative_eq!(sulfate.molar_mass, 96.06, epsilon = 1e-2);
        // formula key is case sensitive
        assert!(db.get_ion("so4").is_none());
        assert!(db.get_element("h").is_none());
    }

    #[test]
    fn test_find() {
        let db = ChemDatabase::canonical().unwrap();
        assert!(matches!(db.find("Na"), Some(LookupHit::Element(e)) if e.name == "Sodium"));
        assert!(matches!(db.find("NH4"), Some(LookupHit::Ion(i)) if i.charge == 1));
        assert!(matches!(db.find("sulfate"), Some(LookupHit::Ion(i)) if i.formula == "SO4"));
        assert!(matches!(db.find("iron"), Some(LookupHit::Element(e)) if e.symbol == "Fe"));
        assert!(db.find("Qq").is_none());
    }

    #[test]
    fn test_insert_and_duplicate_ion() {
        let mut db = ChemDatabase::canonical().unwrap();
        let azide = db.insert_ion("Azide", "N3", -1).unwrap();
        assert_eq!(azide.formula, "N3");
        assert_relative_eq!(azide.molar_mass, 42.02, epsilon = 1e-2);
        match db.insert_ion("Something else", "N3", -3) {
            Err(ChemError::DuplicateKey(existing)) => {
                assert_eq!(existing.name, "Azide");
                assert_eq!(existing.charge, -1);
            }
            other => panic!("expected duplicate key, got {:?}", other),
        }
        assert!(matches!(db.insert_ion("Bad", "Qq2", -1), Err(ChemError::InvalidFormula(_))));
    }

    #[test]
    fn test_delete_and_reset_ions() {
        let mut db = ChemDatabase::canonical().unwrap();
        let canonical_count = db.ion_count();
        db.insert_ion("Azide", "N3", -1).unwrap();
        assert!(db.delete_ion("SO4").unwrap());
        assert!(!db.delete_ion("SO4").unwrap());
        assert!(db.get_ion("SO4").is_none());
        assert!(db.delete_ion("*").unwrap());
        assert_eq!(db.ion_count(), canonical_count);
        assert!(db.get_ion("SO4").is_some());
        assert!(db.get_ion("N3").is_none());
    }

    #[test]
    fn test_save_and_load_ions() {
        let mut db = ChemDatabase::canonical().unwrap();
        db.insert_ion("Azide", "N3", -1).unwrap();
        let ions_file = NamedTempFile::new().unwrap();
        db.save_ions(ions_file.path()).unwrap();

        let mut elements_file = NamedTempFile::new().unwrap();
        elements_file.write_all(CANONICAL_ELEMENTS.as_bytes()).unwrap();
        let loaded = ChemDatabase::from_files(elements_file.path(), ions_file.path()).unwrap();
        assert_eq!(loaded.ion_count(), db.ion_count());
        assert_eq!(loaded.get_ion("N3").unwrap().name, "Azide");
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let result = ChemDatabase::from_json("[{\"symbol\": \"H\",", "[]");
        assert!(matches!(result, Err(ChemError::Serde(_))));
    }

    #[test]
    fn test_from_manager_falls_back_to_bundled_data() {
        let config = NamedTempFile::new().unwrap();
        let manager = LibraryManager::with_config_file(config.path().to_str().unwrap());
        // default paths are relative, a missing file is replaced by the bundled one
        let db = ChemDatabase::from_manager(&manager).unwrap();
        assert_eq!(db.element_count(), 118);
    }
}
