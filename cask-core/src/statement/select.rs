use crate::{
    CaskError, Column, CqlWriter, Predicate, Projection, Result, Statement, TableDef, TableRef,
    statement::{check_column, check_predicates, fmt_statement},
    writer::Context,
};
use std::fmt::{self, Display, Formatter};

/// `SELECT` statement.
///
/// ```rust
/// use cask_core::{ColumnType, PrimaryKeyType, Select, Statement, TableDef};
/// let users = TableDef::new("app", "users")
///     .column("id", ColumnType::BigInt, PrimaryKeyType::PartitionKey)
///     .unwrap();
/// let id = *users.find_column("id").unwrap();
/// let (query, parameters) = Select::all(&users)
///     .filter([id.eq(42_i64).unwrap()])
///     .unwrap()
///     .limit(1)
///     .unwrap()
///     .build_query()
///     .unwrap();
/// assert_eq!(query, "SELECT  * FROM app.users WHERE id = ? LIMIT 1");
/// assert_eq!(parameters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    table: TableRef,
    projection: Vec<Projection>,
    predicates: Vec<Predicate>,
    group_by: Vec<Column>,
    limit: Option<u32>,
    distinct: bool,
    allow_filtering: bool,
}

impl Select {
    fn new(table: TableRef, projection: Vec<Projection>) -> Self {
        Self {
            table,
            projection,
            predicates: Vec::new(),
            group_by: Vec::new(),
            limit: None,
            distinct: false,
            allow_filtering: false,
        }
    }

    /// `SELECT * FROM table`.
    pub fn all(table: &TableDef) -> Self {
        Self::new(table.table_ref().clone(), Vec::new())
    }

    /// Select `projections` from the table they are declared on.
    pub fn columns<P: Into<Projection>>(
        projections: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        let projection = projections.into_iter().map(Into::into).collect::<Vec<_>>();
        let Some(first) = projection.first() else {
            return Err(CaskError::validation("SELECT", "no column to select"));
        };
        let table = first.column().table_ref();
        Self::with_projection(table, projection)
    }

    /// Select `projections` from `table`, which can be a view of the table they are declared on.
    pub fn columns_from<P: Into<Projection>>(
        table: &TableDef,
        projections: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        let projection = projections.into_iter().map(Into::into).collect::<Vec<_>>();
        if projection.is_empty() {
            return Err(CaskError::validation(
                "SELECT",
                format!("no column to select from `{}`", table.table_ref()),
            ));
        }
        Self::with_projection(table.table_ref().clone(), projection)
    }

    fn with_projection(table: TableRef, projection: Vec<Projection>) -> Result<Self> {
        for item in &projection {
            check_column("SELECT", &table, item.column())?;
        }
        Ok(Self::new(table, projection))
    }

    /// Add `predicates` to the WHERE clause, joined with `AND`.
    pub fn filter(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Result<Self> {
        let predicates = check_predicates(&self.table, predicates)?;
        self.predicates.extend(predicates);
        Ok(self)
    }

    /// Set the GROUP BY columns, replacing the previous ones.
    pub fn group_by(mut self, columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        let columns = columns.into_iter().collect::<Vec<_>>();
        if columns.is_empty() {
            return Err(CaskError::validation(
                "GROUP BY",
                format!("no column given for `{}`", self.table),
            ));
        }
        for column in &columns {
            check_column("GROUP BY", &self.table, column)?;
        }
        self.group_by = columns;
        Ok(self)
    }

    pub fn limit(mut self, limit: i64) -> Result<Self> {
        let limit = u32::try_from(limit)
            .ok()
            .filter(|v| *v > 0 && *v <= i32::MAX as u32)
            .ok_or_else(|| {
                CaskError::validation("LIMIT", format!("expected a positive limit, got {limit}"))
            })?;
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Allow the server to scan partitions that do not match the key.
    pub fn allow_filtering(mut self) -> Self {
        log::warn!(
            "ALLOW FILTERING on `{}` can lead to unpredictable performance",
            self.table
        );
        self.allow_filtering = true;
        self
    }

    /// Selected items, empty means `*`.
    pub fn projection(&self) -> &[Projection] {
        &self.projection
    }
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
    pub fn grouping(&self) -> &[Column] {
        &self.group_by
    }
    pub fn row_limit(&self) -> Option<u32> {
        self.limit
    }
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }
    pub fn filtering_allowed(&self) -> bool {
        self.allow_filtering
    }
}

impl Statement for Select {
    fn table(&self) -> &TableRef {
        &self.table
    }
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_select(context, out, self);
    }
}

impl Display for Select {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_statement(self, f)
    }
}
