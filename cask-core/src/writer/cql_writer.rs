use crate::{
    Aggregate, Column, Delete, Expression, Insert, Predicate, Row, Select, Statement, TableDef,
    TableRef, Update, Value, separated_by,
    writer::{Context, Fragment},
};
use std::fmt::Write;
use time::{Date, OffsetDateTime, Time};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($out:ident, $value:expr) => {{
        if $value.is_infinite() {
            $out.push_str(if $value.is_sign_negative() {
                "-Infinity"
            } else {
                "Infinity"
            });
        } else if $value.is_nan() {
            $out.push_str("NaN");
        } else {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        }
    }};
}

/// Keywords that cannot appear as unquoted identifiers.
pub const CQL_RESERVED_KEYWORDS: &[&str] = &[
    "add", "allow", "alter", "and", "apply", "asc", "authorize", "batch", "begin", "by",
    "columnfamily", "create", "delete", "desc", "describe", "drop", "entries", "execute", "from",
    "full", "grant", "if", "in", "index", "infinity", "insert", "into", "is", "keyspace", "limit",
    "materialized", "modify", "nan", "norecursive", "not", "null", "of", "on", "or", "order",
    "primary", "rename", "replace", "revoke", "schema", "select", "set", "table", "to", "token",
    "truncate", "unlogged", "update", "use", "using", "view", "where", "with",
];

/// Dialect printer converting statements and values into CQL text.
///
/// Every method has a default implementation producing the CQL understood by Scylla and
/// Cassandra. A driver needing a different rendering overrides only the affected methods.
pub trait CqlWriter {
    fn as_dyn(&self) -> &dyn CqlWriter;

    /// Whether `value` can be written without quotes.
    fn is_plain_identifier(&self, value: &str) -> bool {
        let mut chars = value.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            && !CQL_RESERVED_KEYWORDS.contains(&value)
    }

    /// Write an identifier, quoting ("Name") and doubling inner quotes when needed.
    fn write_identifier(&self, _context: &mut Context, out: &mut String, value: &str) {
        if self.is_plain_identifier(value) {
            out.push_str(value);
            return;
        }
        out.push('"');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == '"' {
                out.push_str(&value[position..i]);
                out.push_str("\"\"");
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
        out.push('"');
    }

    /// Render `keyspace.table`, or just `table` when the keyspace is empty.
    fn write_table_ref(&self, context: &mut Context, out: &mut String, value: &TableRef) {
        if !value.keyspace.is_empty() {
            self.write_identifier(context, out, &value.keyspace);
            out.push('.');
        }
        self.write_identifier(context, out, &value.name);
    }

    /// Render a column, with its alias inside a SELECT list.
    fn write_column(&self, context: &mut Context, out: &mut String, value: &Column) {
        self.write_identifier(context, out, value.name);
        if context.fragment == Fragment::CqlSelect {
            if let Some(alias) = value.alias {
                out.push_str(" AS ");
                self.write_identifier(context, out, alias);
            }
        }
    }

    /// Render `OP(column)`, with its alias inside a SELECT list.
    fn write_aggregate(&self, context: &mut Context, out: &mut String, value: &Aggregate) {
        out.push_str(value.op.as_str());
        out.push('(');
        self.write_identifier(context, out, value.column.name);
        out.push(')');
        if context.fragment == Fragment::CqlSelect {
            if let Some(alias) = value.alias {
                out.push_str(" AS ");
                self.write_identifier(context, out, alias);
            }
        }
    }

    /// Write a positional placeholder and bind its value.
    fn write_placeholder(&self, context: &mut Context, out: &mut String, value: Value) {
        out.push('?');
        context.bind(value);
    }

    fn write_predicate(&self, context: &mut Context, out: &mut String, value: &Predicate) {
        self.write_identifier(context, out, value.column.name);
        out.push(' ');
        out.push_str(value.op.as_str());
        out.push(' ');
        self.write_placeholder(context, out, value.value.clone());
    }

    /// Render ` WHERE p1 AND p2 ...`, nothing when there are no predicates.
    fn write_where(&self, context: &mut Context, out: &mut String, predicates: &[Predicate]) {
        if predicates.is_empty() {
            return;
        }
        let mut context = context.switch_fragment(Fragment::CqlWhere);
        out.push_str(" WHERE ");
        separated_by(
            out,
            predicates,
            |out, v| v.write_query(self.as_dyn(), &mut context, out),
            " AND ",
        );
    }

    fn write_select(&self, context: &mut Context, out: &mut String, value: &Select) {
        let mut context = context.switch_fragment(Fragment::CqlSelect);
        out.push_str("SELECT ");
        if value.is_distinct() {
            out.push_str("DISTINCT");
        }
        out.push(' ');
        if value.projection().is_empty() {
            out.push('*');
        } else {
            separated_by(
                out,
                value.projection(),
                |out, v| v.write_query(self.as_dyn(), &mut context, out),
                ", ",
            );
        }
        out.push_str(" FROM ");
        self.write_table_ref(&mut context, out, value.table());
        self.write_where(&mut context, out, value.predicates());
        if !value.grouping().is_empty() {
            let mut context = context.switch_fragment(Fragment::CqlSelectGroupBy);
            out.push_str(" GROUP BY ");
            separated_by(
                out,
                value.grouping(),
                |out, v| self.write_column(&mut context, out, v),
                ", ",
            );
        }
        if let Some(limit) = value.row_limit() {
            out.push_str(" LIMIT ");
            write_integer!(out, limit);
        }
        if value.filtering_allowed() {
            out.push_str(" ALLOW FILTERING");
        }
    }

    fn write_update(&self, context: &mut Context, out: &mut String, value: &Update) {
        out.push_str("UPDATE ");
        self.write_table_ref(context, out, value.table());
        out.push_str(" SET ");
        {
            let mut context = context.switch_fragment(Fragment::CqlUpdateSet);
            separated_by(
                out,
                value.assignments(),
                |out, (column, value)| {
                    self.write_identifier(&mut context, out, column.name);
                    out.push_str(" = ");
                    self.write_placeholder(&mut context, out, value.clone());
                },
                ", ",
            );
        }
        self.write_where(context, out, value.predicates());
        if value.is_if_exists() {
            out.push_str(" IF EXISTS");
        }
    }

    fn write_delete(&self, context: &mut Context, out: &mut String, value: &Delete) {
        let mut context = context.switch_fragment(Fragment::CqlDeleteFrom);
        out.push_str("DELETE FROM ");
        self.write_table_ref(&mut context, out, value.table());
        self.write_where(&mut context, out, value.predicates());
        if value.is_if_exists() {
            out.push_str(" IF EXISTS");
        }
    }

    /// Render the rows of an insert, several rows are grouped in a single batch statement.
    fn write_insert(&self, context: &mut Context, out: &mut String, value: &Insert) {
        let rows = value.rows();
        if rows.len() <= 1 {
            for row in rows {
                self.write_insert_row(context, out, value.table(), row, value.is_if_not_exists());
            }
            return;
        }
        out.push_str("BEGIN BATCH\n");
        for row in rows {
            self.write_insert_row(context, out, value.table(), row, value.is_if_not_exists());
            out.push_str(";\n");
        }
        out.push_str("APPLY BATCH");
    }

    fn write_insert_row(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableRef,
        row: &Row,
        if_not_exists: bool,
    ) {
        let mut context = context.switch_fragment(Fragment::CqlInsertInto);
        out.push_str("INSERT INTO ");
        self.write_table_ref(&mut context, out, table);
        out.push_str(" (");
        separated_by(
            out,
            row,
            |out, (column, _)| self.write_identifier(&mut context, out, column.name),
            ", ",
        );
        out.push_str(") VALUES (");
        {
            let mut context = context.switch_fragment(Fragment::CqlInsertIntoValues);
            separated_by(
                out,
                row,
                |out, (_, value)| self.write_placeholder(&mut context, out, value.clone()),
                ", ",
            );
        }
        out.push(')');
        if if_not_exists {
            out.push_str(" IF NOT EXISTS");
        }
    }

    fn write_create_keyspace(
        &self,
        context: &mut Context,
        out: &mut String,
        keyspace: &str,
        replication_factor: u8,
    ) {
        let mut context = context.switch_fragment(Fragment::CqlCreateKeyspace);
        out.push_str("CREATE KEYSPACE IF NOT EXISTS ");
        self.write_identifier(&mut context, out, keyspace);
        out.push_str(" WITH replication = {'class': 'SimpleStrategy', 'replication_factor': ");
        write_integer!(out, replication_factor);
        out.push('}');
    }

    fn write_create_table(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        if_not_exists: bool,
    ) {
        let mut context = context.switch_fragment(Fragment::CqlCreateTable);
        out.push_str("CREATE TABLE ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.write_table_ref(&mut context, out, table.table_ref());
        out.push_str(" (\n");
        for column in table.columns() {
            self.write_identifier(&mut context, out, column.name);
            out.push(' ');
            out.push_str(column.column_type.cql_name());
            out.push_str(",\n");
        }
        let partition = table.partition_key().collect::<Vec<_>>();
        let clustering = table.clustering_key().collect::<Vec<_>>();
        self.write_primary_key(&mut context, out, &partition, &clustering);
        out.push_str("\n)");
    }

    /// Render `PRIMARY KEY (p, c1, ..)`, a composite partition key is parenthesized.
    fn write_primary_key(
        &self,
        context: &mut Context,
        out: &mut String,
        partition: &[&Column],
        clustering: &[&Column],
    ) {
        out.push_str("PRIMARY KEY (");
        let composite = partition.len() > 1;
        if composite {
            out.push('(');
        }
        separated_by(
            out,
            partition,
            |out, v| self.write_identifier(context, out, v.name),
            ", ",
        );
        if composite {
            out.push(')');
        }
        for column in clustering {
            out.push_str(", ");
            self.write_identifier(context, out, column.name);
        }
        out.push(')');
    }

    /// Render the materialized view `key` of `table`.
    ///
    /// The first view column is the partition key, the remaining view columns and the base
    /// primary key columns not already listed are clustering columns.
    fn write_create_view(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableDef,
        key: &str,
        columns: &[Column],
        if_not_exists: bool,
    ) {
        let mut context = context.switch_fragment(Fragment::CqlCreateView);
        let mut key_columns: Vec<&Column> = columns.iter().collect();
        for column in table.partition_key().chain(table.clustering_key()) {
            if !key_columns.iter().any(|c| c.name == column.name) {
                key_columns.push(column);
            }
        }
        out.push_str("CREATE MATERIALIZED VIEW ");
        if if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        let view = TableRef {
            name: format!("{}_{}", table.name(), key).into(),
            ..table.table_ref().clone()
        };
        self.write_table_ref(&mut context, out, &view);
        out.push_str(" AS\nSELECT * FROM ");
        self.write_table_ref(&mut context, out, table.table_ref());
        out.push_str("\nWHERE ");
        separated_by(
            out,
            &key_columns,
            |out, v| {
                self.write_identifier(&mut context, out, v.name);
                out.push_str(" IS NOT NULL");
            },
            " AND ",
        );
        out.push('\n');
        self.write_primary_key(&mut context, out, &key_columns[..1], &key_columns[1..]);
    }

    /// Render a literal value.
    fn write_value(&self, context: &mut Context, out: &mut String, value: &Value) {
        match value {
            v if v.is_null() => out.push_str("NULL"),
            Value::Boolean(Some(v)) => out.push_str(["false", "true"][*v as usize]),
            Value::TinyInt(Some(v)) => write_integer!(out, *v),
            Value::SmallInt(Some(v)) => write_integer!(out, *v),
            Value::Int(Some(v)) => write_integer!(out, *v),
            Value::BigInt(Some(v)) | Value::Counter(Some(v)) => write_integer!(out, *v),
            Value::Varint(Some(v)) => write_integer!(out, *v),
            Value::Float(Some(v)) => write_float!(out, *v),
            Value::Double(Some(v)) => write_float!(out, *v),
            Value::Decimal(Some(v)) => drop(write!(out, "{}", v)),
            Value::Ascii(Some(v)) | Value::Text(Some(v)) => {
                self.write_value_string(context, out, v)
            }
            Value::Blob(Some(v)) => {
                out.push_str("0x");
                out.push_str(&hex::encode(v));
            }
            Value::Date(Some(v)) => {
                out.push('\'');
                self.write_value_date(context, out, v);
                out.push('\'');
            }
            Value::Time(Some(v)) => {
                out.push('\'');
                self.write_value_time(context, out, v);
                out.push('\'');
            }
            Value::Timestamp(Some(v)) => self.write_value_timestamp(context, out, v),
            Value::Uuid(Some(v)) | Value::TimeUuid(Some(v)) => drop(write!(out, "{}", v)),
            Value::Inet(Some(v)) => drop(write!(out, "'{}'", v)),
            Value::Duration(Some(v)) => self.write_value_duration(context, out, v),
            Value::List(Some(v)) => {
                out.push('[');
                separated_by(out, v, |out, v| self.write_value(context, out, v), ", ");
                out.push(']');
            }
            _ => log::error!("Cannot write {:?}", value),
        }
    }

    /// Render and escape a string literal using single quotes.
    fn write_value_string(&self, _context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == '\'' {
                out.push_str(&value[position..i]);
                out.push_str("''");
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
        out.push('\'');
    }

    fn write_value_date(&self, _context: &mut Context, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    fn write_value_time(&self, _context: &mut Context, out: &mut String, value: &Time) {
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second()
        );
        let mut subsecond = value.nanosecond();
        if subsecond != 0 {
            let mut width = 9;
            while subsecond % 10 == 0 {
                subsecond /= 10;
                width -= 1;
            }
            let _ = write!(out, ".{:0width$}", subsecond);
        }
    }

    /// Render a timestamp literal in UTC.
    fn write_value_timestamp(&self, context: &mut Context, out: &mut String, value: &OffsetDateTime) {
        let value = value.to_offset(time::UtcOffset::UTC);
        out.push('\'');
        self.write_value_date(context, out, &value.date());
        out.push('T');
        self.write_value_time(context, out, &value.time());
        out.push_str("Z'");
    }

    /// Render a duration literal (`1d2h30m`).
    fn write_value_duration(&self, _context: &mut Context, out: &mut String, value: &time::Duration) {
        static UNITS: &[(&str, i128)] = &[
            ("d", 86_400_000_000_000),
            ("h", 3_600_000_000_000),
            ("m", 60_000_000_000),
            ("s", 1_000_000_000),
            ("ms", 1_000_000),
            ("us", 1_000),
            ("ns", 1),
        ];
        let mut nanos = value.whole_nanoseconds();
        if nanos == 0 {
            out.push_str("0s");
            return;
        }
        if nanos < 0 {
            out.push('-');
            nanos = -nanos;
        }
        for &(unit, factor) in UNITS {
            let amount = nanos / factor;
            if amount != 0 {
                write_integer!(out, amount);
                out.push_str(unit);
                nanos %= factor;
            }
        }
    }
}

/// Writer producing the CQL accepted by Scylla and Cassandra.
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultCqlWriter;

impl CqlWriter for DefaultCqlWriter {
    fn as_dyn(&self) -> &dyn CqlWriter {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnType, PrimaryKeyType};
    use indoc::indoc;

    fn events() -> TableDef {
        TableDef::new("ks", "events")
            .column("tenant", ColumnType::Uuid, PrimaryKeyType::PartitionKey)
            .unwrap()
            .column("at", ColumnType::Timestamp, PrimaryKeyType::ClusteringKey)
            .unwrap()
            .column("kind", ColumnType::Ascii, PrimaryKeyType::None)
            .unwrap()
            .view("by_kind", ["kind"])
            .unwrap()
    }

    #[test]
    fn create_table() {
        let mut out = String::new();
        DefaultCqlWriter.write_create_table(&mut Context::default(), &mut out, &events(), false);
        assert_eq!(
            out,
            indoc! {"
                CREATE TABLE ks.events (
                tenant uuid,
                at timestamp,
                kind ascii,
                PRIMARY KEY (tenant, at)
                )
            "}
            .trim()
        );
    }

    #[test]
    fn create_view() {
        let table = events();
        let mut out = String::new();
        DefaultCqlWriter.write_create_view(
            &mut Context::default(),
            &mut out,
            &table,
            "by_kind",
            &table.views()["by_kind"],
            false,
        );
        assert_eq!(
            out,
            indoc! {"
                CREATE MATERIALIZED VIEW ks.events_by_kind AS
                SELECT * FROM ks.events
                WHERE kind IS NOT NULL AND tenant IS NOT NULL AND at IS NOT NULL
                PRIMARY KEY (kind, tenant, at)
            "}
            .trim()
        );
    }

    #[test]
    fn aliases_only_in_select_list() {
        let column = events().find_column("kind").copied().unwrap().alias("k").unwrap();
        let mut out = String::new();
        let mut context = Context::new(Fragment::CqlSelect);
        DefaultCqlWriter.write_column(&mut context, &mut out, &column);
        out.push(' ');
        DefaultCqlWriter.write_column(&mut Context::new(Fragment::CqlWhere), &mut out, &column);
        assert_eq!(out, "kind AS k kind");
    }
}
