use crate::query::{
    ast::select::{Condition, Projection, Select},
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        match &self.projection {
            Projection::Columns(cols) => r.sql.push_str(cols),
            Projection::CountAll => r.sql.push_str("COUNT(*)"),
        }
        r.sql.push_str(" FROM ");
        r.sql.push_str(&self.table);

        for (i, condition) in self.conditions.iter().enumerate() {
            r.sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            condition.render(r);
        }

        if let Some(column) = &self.order_by {
            r.sql.push_str(" ORDER BY ");
            r.sql.push_str(column);
        }

        if let Some(limit) = self.limit {
            r.sql.push_str(&format!(" LIMIT {limit}"));
        }
    }
}

impl Render for Condition {
    fn render(&self, r: &mut Renderer) {
        match self {
            Condition::Raw(fragment) => r.sql.push_str(fragment),
            Condition::GreaterThan { column, literal } => {
                r.sql.push_str(column);
                r.sql.push_str(" > ");
                r.sql.push_str(literal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::select::{Condition, Projection, Select},
        renderer::to_sql,
    };

    #[test]
    fn test_render_select_with_conditions() {
        let ast = Select {
            projection: Projection::Columns("id,name".to_string()),
            table: "users".to_string(),
            conditions: vec![
                Condition::Raw("active = 1".to_string()),
                Condition::GreaterThan {
                    column: "id".to_string(),
                    literal: "10".to_string(),
                },
            ],
            order_by: Some("id".to_string()),
            limit: Some(1),
        };

        assert_eq!(
            to_sql(&ast),
            "SELECT id,name FROM users WHERE active = 1 AND id > 10 ORDER BY id LIMIT 1"
        );
    }

    #[test]
    fn test_render_count() {
        let ast = Select {
            projection: Projection::CountAll,
            table: "users".to_string(),
            conditions: vec![],
            order_by: None,
            limit: None,
        };

        assert_eq!(to_sql(&ast), "SELECT COUNT(*) FROM users");
    }
}
