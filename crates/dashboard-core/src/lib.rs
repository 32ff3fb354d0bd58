//! Shared domain types for the sales dashboard.
//!
//! Holds the transaction model, the error taxonomy, currency and number
//! formatting, date parsing and the CLI settings layer.

pub mod error;
pub mod formatting;
pub mod models;
pub mod parsing;
pub mod settings;
