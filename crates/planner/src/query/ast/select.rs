//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

/// What a SELECT returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// A raw column list as configured, e.g. `*` or `id, name`.
    Columns(String),

    /// `COUNT(*)`
    CountAll,
}

/// A single predicate; predicates are joined with `AND`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A caller-supplied fragment, rendered verbatim.
    Raw(String),

    /// `<column> > <literal>`, the literal already rendered.
    GreaterThan { column: String, literal: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Projection,

    /// e.g., `FROM events`
    pub table: String,

    /// The WHERE clause conditions, in rendering order.
    pub conditions: Vec<Condition>,

    /// The ORDER BY column, ascending.
    pub order_by: Option<String>,

    pub limit: Option<usize>,
}
