use crate::{
    error::QueryBuildError,
    query::{
        ast::{delete::Delete, select::Condition},
        builder::{insert::InsertBuilder, select::SelectBuilder},
        renderer::to_sql,
    },
};
use model::{
    core::literal::{is_numeric_literal, quote_string},
    execution::params::ParamSet,
    records::record::GenericRecord,
};
use tracing::debug;

/// Renders the statements one bridge instance issues, straight from its
/// configuration.
pub struct QueryGenerator<'a> {
    params: &'a ParamSet,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(params: &'a ParamSet) -> Self {
        Self { params }
    }

    /// The SELECT for the next unread row, or its `COUNT(*)` twin.
    ///
    /// The cursor predicate is only applied when rows are kept after reading;
    /// with delete-after-read the table holds nothing but unread rows. Row
    /// queries always end in `LIMIT 1`.
    pub fn select(&self, count_only: bool) -> String {
        let p = self.params;
        let mut select = SelectBuilder::new(&p.table_name);
        select = if count_only {
            select.count()
        } else {
            select.columns(&p.columns_csv)
        };

        if !p.where_expression.is_empty() {
            select = select.filter(Condition::Raw(p.where_expression.clone()));
        }

        if p.has_cursor() && !p.delete_after_read {
            select = select.filter(Condition::GreaterThan {
                column: p.sequencer_column.clone(),
                literal: cursor_literal(&p.latest_sequencer_value),
            });
        }

        if !count_only {
            if !p.sequencer_column.is_empty() {
                select = select.order_by(&p.sequencer_column);
            }
            select = select.limit(1);
        }

        let sql = to_sql(&select.build());
        debug!("{} Query constructed: {}", p.label(), sql);
        sql
    }

    /// `DELETE FROM <table> WHERE <pk> = <literal>`
    pub fn delete(&self, key_literal: &str) -> String {
        to_sql(&Delete {
            table: self.params.table_name.clone(),
            key_column: self.params.primary_key_column.clone(),
            key_literal: key_literal.to_string(),
        })
    }

    /// A single-row INSERT for `record`.
    ///
    /// With wildcard columns the record's own column order is used. Otherwise
    /// the configured columns fix the order and each value is looked up by
    /// name, so a record whose keys arrive in a different order still lines
    /// up.
    pub fn insert(&self, record: &GenericRecord) -> Result<String, QueryBuildError> {
        if record.is_empty() {
            return Err(QueryBuildError::EmptyRecord);
        }

        let columns: Vec<String> = if self.params.is_wildcard() {
            record.names().map(str::to_string).collect()
        } else {
            let configured = self
                .params
                .columns_csv
                .split(',')
                .map(|c| c.trim().to_string())
                .collect::<Vec<_>>();
            if configured.len() != record.len() {
                return Err(QueryBuildError::ColumnCountMismatch {
                    columns: configured.len(),
                    values: record.len(),
                });
            }
            configured
        };

        let mut builder = InsertBuilder::new(&self.params.table_name);
        for column in &columns {
            let value = record
                .get(column)
                .cloned()
                .ok_or_else(|| QueryBuildError::MissingColumn(column.clone()))?;
            builder = builder.value(column, value);
        }

        Ok(to_sql(&builder.build()))
    }
}

/// Renders a cursor for the sequencer predicate: numbers bare, anything else
/// (timestamps, text keys) as a string literal.
fn cursor_literal(cursor: &str) -> String {
    if is_numeric_literal(cursor) {
        cursor.trim().to_string()
    } else {
        quote_string(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;

    fn base() -> ParamSet {
        ParamSet {
            db_type: "postgres".into(),
            table_name: "t".into(),
            sequencer_column: "id".into(),
            columns_csv: "*".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_without_cursor() {
        let params = base();
        assert_eq!(
            QueryGenerator::new(&params).select(false),
            "SELECT * FROM t ORDER BY id LIMIT 1"
        );
    }

    #[test]
    fn test_select_with_cursor() {
        let mut params = base();
        params.latest_sequencer_value = "42".into();
        assert_eq!(
            QueryGenerator::new(&params).select(false),
            "SELECT * FROM t WHERE id > 42 ORDER BY id LIMIT 1"
        );
    }

    #[test]
    fn test_select_with_where_and_cursor() {
        let mut params = base();
        params.latest_sequencer_value = "42".into();
        params.where_expression = "status='new'".into();
        assert_eq!(
            QueryGenerator::new(&params).select(false),
            "SELECT * FROM t WHERE status='new' AND id > 42 ORDER BY id LIMIT 1"
        );
    }

    #[test]
    fn test_delete_after_read_never_uses_cursor() {
        for cursor in ["", "42", "2024-01-01"] {
            let mut params = base();
            params.delete_after_read = true;
            params.latest_sequencer_value = cursor.into();
            let generator = QueryGenerator::new(&params);
            assert!(!generator.select(false).contains("id >"));
            assert!(!generator.select(true).contains("id >"));
        }
    }

    #[test]
    fn test_cursor_predicate_present_whenever_cursor_set() {
        for cursor in ["1", "99999999999", "1.5E+00"] {
            let mut params = base();
            params.latest_sequencer_value = cursor.into();
            let generator = QueryGenerator::new(&params);
            assert!(generator.select(false).contains(&format!("id > {cursor}")));
            assert!(generator.select(true).contains(&format!("id > {cursor}")));
        }
    }

    #[test]
    fn test_non_numeric_cursor_is_quoted() {
        let mut params = base();
        params.sequencer_column = "created_at".into();
        params.latest_sequencer_value = "2024-01-01 10:00:00".into();
        assert_eq!(
            QueryGenerator::new(&params).select(false),
            "SELECT * FROM t WHERE created_at > '2024-01-01 10:00:00' ORDER BY created_at LIMIT 1"
        );
    }

    #[test]
    fn test_count_has_no_order_or_limit() {
        let mut params = base();
        params.where_expression = "a = 1".into();
        assert_eq!(
            QueryGenerator::new(&params).select(true),
            "SELECT COUNT(*) FROM t WHERE a = 1"
        );
    }

    #[test]
    fn test_select_always_ends_with_limit_and_skips_order_without_sequencer() {
        let mut params = base();
        params.sequencer_column = String::new();
        params.columns_csv = "a,b".into();
        let sql = QueryGenerator::new(&params).select(false);
        assert_eq!(sql, "SELECT a,b FROM t LIMIT 1");
        assert!(sql.ends_with("LIMIT 1"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn test_delete() {
        let mut params = base();
        params.primary_key_column = "pk".into();
        assert_eq!(
            QueryGenerator::new(&params).delete("'7'"),
            "DELETE FROM t WHERE pk = '7'"
        );
    }

    #[test]
    fn test_insert_wildcard_uses_record_order() {
        let params = base();
        let record: GenericRecord = [("a", Value::Int(1)), ("b", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(
            QueryGenerator::new(&params).insert(&record).unwrap(),
            "INSERT INTO t (a,b) VALUES (1,'x')"
        );
    }

    #[test]
    fn test_insert_configured_columns_match_by_name() {
        let mut params = base();
        params.columns_csv = "b, a".into();
        let record: GenericRecord = [("a", Value::Int(1)), ("b", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(
            QueryGenerator::new(&params).insert(&record).unwrap(),
            "INSERT INTO t (b,a) VALUES ('x',1)"
        );
    }

    #[test]
    fn test_insert_rejects_empty_record() {
        let params = base();
        let err = QueryGenerator::new(&params)
            .insert(&GenericRecord::new())
            .unwrap_err();
        assert!(matches!(err, QueryBuildError::EmptyRecord));
    }

    #[test]
    fn test_insert_rejects_count_mismatch() {
        let mut params = base();
        params.columns_csv = "a,b,c".into();
        let record: GenericRecord = [("a", 1), ("b", 2)].into_iter().collect();
        let err = QueryGenerator::new(&params).insert(&record).unwrap_err();
        assert!(matches!(
            err,
            QueryBuildError::ColumnCountMismatch {
                columns: 3,
                values: 2
            }
        ));
    }

    #[test]
    fn test_insert_rejects_missing_column() {
        let mut params = base();
        params.columns_csv = "a,z".into();
        let record: GenericRecord = [("a", 1), ("b", 2)].into_iter().collect();
        let err = QueryGenerator::new(&params).insert(&record).unwrap_err();
        assert!(matches!(err, QueryBuildError::MissingColumn(ref c) if c == "z"));
    }
}
