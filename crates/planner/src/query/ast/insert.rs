//! Defines the AST for a single-row INSERT statement.

use model::core::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    /// One value per column, in column order.
    pub values: Vec<Value>,
}
