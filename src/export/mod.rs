//! Export and import for family-finance
//!
//! - CSV: movements, spreadsheet-compatible
//! - JSON: full database export, and import of full or partial documents
//! - YAML: full database export for human-readable backups

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_movements_csv;
pub use json::{export_full_json, import_json, FullExport, ImportSummary, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
