use crate::query::ast::insert::Insert;
use model::core::value::Value;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            ast: Insert {
                table: table.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn value(mut self, column: &str, value: Value) -> Self {
        self.ast.columns.push(column.to_string());
        self.ast.values.push(value);
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
