use crate::query::{
    ast::insert::Insert,
    renderer::{Render, Renderer},
};
use model::core::literal::to_literal;

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        // 1. INSERT INTO table (...)
        r.sql.push_str("INSERT INTO ");
        r.sql.push_str(&self.table);
        r.sql.push_str(" (");
        r.push_list(self.columns.iter().map(String::as_str));
        r.sql.push(')');

        // 2. VALUES (...)
        let literals = self
            .values
            .iter()
            .map(|v| to_literal(v, true))
            .collect::<Vec<_>>();
        r.sql.push_str(" VALUES (");
        r.push_list(literals.iter().map(String::as_str));
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{ast::insert::Insert, renderer::to_sql};
    use model::core::value::Value;

    #[test]
    fn test_render_insert_quotes_text_only() {
        let ast = Insert {
            table: "users".to_string(),
            columns: vec!["id".to_string(), "name".to_string(), "score".to_string()],
            values: vec![Value::Int(1), Value::from("Alice"), Value::Null],
        };

        assert_eq!(
            to_sql(&ast),
            "INSERT INTO users (id,name,score) VALUES (1,'Alice',NULL)"
        );
    }
}
