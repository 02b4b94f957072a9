/// Records of the element and ion tables and the `ChemLookup` trait the
/// calculations depend on.
pub mod lookup;
/// In-memory element and ion tables seeded from the JSON data files, with
/// insertion and deletion of user ions.
pub mod chem_database;
