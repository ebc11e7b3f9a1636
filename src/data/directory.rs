//! Operator directory: built-in table or a JSON file.

use std::fs::File;
use std::path::Path;

use crate::domain::{OperatorDirectory, OperatorEntry};
use crate::error::AppError;

/// Operators registered with SUPEN (mid-2024 codes).
const DEFAULT_OPERATORS: [(&str, &str); 6] = [
    ("BN Vital", "BNV"),
    ("BCR Pensiones", "BCR"),
    ("Popular Pensiones", "POP"),
    ("BAC San José", "BAC"),
    ("Vida Plena", "VID"),
    ("ACOFINSA", "ACO"),
];

pub fn default_directory() -> Result<OperatorDirectory, AppError> {
    OperatorDirectory::from_pairs(DEFAULT_OPERATORS)
}

/// Read a JSON array of `{"name": ..., "code": ...}` objects, keeping file order.
pub fn load_directory(path: &Path) -> Result<OperatorDirectory, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::config(format!("Failed to open operator file '{}': {e}", path.display())))?;
    parse_directory(file)
        .map_err(|e| AppError::config(format!("Invalid operator file '{}': {e}", path.display())))
}

fn parse_directory(reader: impl std::io::Read) -> Result<OperatorDirectory, AppError> {
    let entries: Vec<OperatorEntry> =
        serde_json::from_reader(reader).map_err(|e| AppError::config(e.to_string()))?;
    OperatorDirectory::new(entries)
}
