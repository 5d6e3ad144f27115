use crate::query::ast::select::{Condition, Projection, Select};

#[derive(Debug, Clone)]
pub struct SelectBuilder {
    ast: Select,
}

impl SelectBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            ast: Select {
                projection: Projection::Columns("*".to_string()),
                table: table.to_string(),
                conditions: Vec::new(),
                order_by: None,
                limit: None,
            },
        }
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.ast.projection = Projection::Columns(columns.to_string());
        self
    }

    pub fn count(mut self) -> Self {
        self.ast.projection = Projection::CountAll;
        self
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.ast.conditions.push(condition);
        self
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.ast.order_by = Some(column.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::select::{Condition, Projection},
        builder::select::SelectBuilder,
    };

    #[test]
    fn test_select_builder() {
        let ast = SelectBuilder::new("orders")
            .count()
            .filter(Condition::Raw("total > 5".to_string()))
            .build();

        assert_eq!(ast.projection, Projection::CountAll);
        assert_eq!(ast.conditions.len(), 1);
        assert_eq!(ast.order_by, None);
        assert_eq!(ast.limit, None);
    }
}
