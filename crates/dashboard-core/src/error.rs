use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A content violation found while validating the transaction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// At least one row has no `total_amount`.
    MissingAmounts,
    /// At least one row has no `order_id`.
    MissingOrderIds,
    /// At least one `total_amount` is zero or negative.
    NonPositiveAmounts,
    /// At least one `quantity` is below one.
    InvalidQuantities,
    /// Distinct category values outside the permitted set, in first-seen order.
    InvalidCategories(Vec<String>),
    /// Distinct region values outside the permitted set, in first-seen order.
    InvalidRegions(Vec<String>),
    /// Summing `total_amount` exceeds the representable decimal range.
    TotalOutOfRange,
    /// A present cell that could not be converted to its column type.
    MalformedValue {
        /// 1-based data line (the header is not counted).
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAmounts => f.write_str("Data contains missing transaction amounts"),
            Self::MissingOrderIds => f.write_str("Data contains missing order IDs"),
            Self::NonPositiveAmounts => {
                f.write_str("Data contains non-positive transaction amounts")
            }
            Self::InvalidQuantities => {
                f.write_str("Data contains invalid quantities (must be >= 1)")
            }
            Self::InvalidCategories(values) => {
                write!(f, "Data contains invalid categories: {}", values.join(", "))
            }
            Self::InvalidRegions(values) => {
                write!(f, "Data contains invalid regions: {}", values.join(", "))
            }
            Self::TotalOutOfRange => {
                f.write_str("Data contains transaction amounts whose total is out of range")
            }
            Self::MalformedValue {
                line,
                column,
                value,
            } => write!(
                f,
                "Data contains a malformed {column} value '{value}' on line {line}"
            ),
        }
    }
}

/// All errors produced while loading and validating sales data.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No file exists at the configured data path.
    #[error(
        "Data file not found at: {}. Please ensure {expected_file} exists in the {} directory.",
        .path.display(),
        .directory.display()
    )]
    NotFound {
        path: PathBuf,
        directory: PathBuf,
        expected_file: String,
    },

    /// The header row lacks one or more required columns.
    #[error("CSV is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The rows violate a content rule.
    #[error("{0}")]
    DataIntegrity(IntegrityViolation),

    /// The file is not well-formed CSV.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file exists but could not be opened or inspected.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<IntegrityViolation> for DashboardError {
    fn from(violation: IntegrityViolation) -> Self {
        Self::DataIntegrity(violation)
    }
}

/// Coarse classification shown to the user when a render halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Schema,
    DataIntegrity,
    Unexpected,
}

impl ErrorKind {
    /// Heading displayed above the error message.
    pub fn heading(self) -> &'static str {
        match self {
            Self::NotFound => "Data Loading Error",
            Self::Schema | Self::DataIntegrity => "Data Validation Error",
            Self::Unexpected => "Unexpected Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "NotFoundError",
            Self::Schema => "SchemaError",
            Self::DataIntegrity => "DataIntegrityError",
            Self::Unexpected => "UnexpectedError",
        };
        f.write_str(name)
    }
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::DataIntegrity(_) => ErrorKind::DataIntegrity,
            Self::Csv(_) | Self::FileRead { .. } | Self::Io(_) | Self::Other(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
