use crate::query::{
    ast::delete::Delete,
    renderer::{Render, Renderer},
};

impl Render for Delete {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DELETE FROM ");
        r.sql.push_str(&self.table);
        r.sql.push_str(" WHERE ");
        r.sql.push_str(&self.key_column);
        r.sql.push_str(" = ");
        r.sql.push_str(&self.key_literal);
    }
}
