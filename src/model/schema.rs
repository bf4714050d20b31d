//! Column metadata and type information

use serde::{Deserialize, Serialize};

/// Semantic type of a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Float,
    Integer,
}

impl ColumnType {
    /// Whether cells of this column are coerced to a number
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Float | ColumnType::Integer)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::String => write!(f, "string"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Integer => write!(f, "integer"),
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Semantic type, `String` until inference upgrades it
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new text column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::String,
        }
    }

    /// Create a column with a specified type
    pub fn with_type(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}
