//! Defines the core rendering trait and context for converting AST to SQL.

pub mod delete;
pub mod insert;
pub mod select;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL text while an AST is rendered.
///
/// Identifiers come straight from configuration and are emitted as-is, so a
/// configured `query_cols` or `where_expression` may use whatever quoting the
/// target dialect expects.
#[derive(Debug, Default)]
pub struct Renderer {
    pub sql: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the renderer and returns the final SQL string.
    pub fn finish(self) -> String {
        self.sql
    }

    pub fn push_list<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.sql.push(',');
            }
            self.sql.push_str(item);
        }
    }
}

/// Renders any AST node to a SQL string.
pub fn to_sql(node: &impl Render) -> String {
    let mut renderer = Renderer::new();
    node.render(&mut renderer);
    renderer.finish()
}
