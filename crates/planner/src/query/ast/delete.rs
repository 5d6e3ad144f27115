//! Defines the AST for a DELETE-by-key statement.

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub key_column: String,
    /// The key, already rendered as a SQL literal.
    pub key_literal: String,
}
