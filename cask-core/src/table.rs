use crate::{
    CacheFieldType, CaskError, Column, ColumnDef, ColumnType, Error, PrimaryKeyType, Result,
    Value,
};
use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

/// Identity of the table a statement targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Keyspace name (may be empty).
    pub keyspace: Cow<'static, str>,
    /// Name rendered in statements.
    pub name: Cow<'static, str>,
    /// Table the columns are declared on, equal to `name` unless this is a materialized view.
    pub base: Cow<'static, str>,
}

impl TableRef {
    pub fn new(keyspace: &'static str, name: &'static str) -> Self {
        Self {
            keyspace: keyspace.into(),
            name: name.into(),
            base: name.into(),
        }
    }
    pub fn full_name(&self) -> String {
        let mut result = String::new();
        if !self.keyspace.is_empty() {
            result.push_str(&self.keyspace);
            result.push('.');
        }
        result.push_str(&self.name);
        result
    }
    pub fn is_view(&self) -> bool {
        self.name != self.base
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Column/value pairs of one row, in declaration order.
pub type Row = Vec<(Column, Value)>;

/// Declaration of a table: keyspace, name, columns and materialized views.
///
/// A `TableDef` is built once per table, usually by `#[derive(Table)]`:
/// ```rust
/// use cask_core::{ColumnType, PrimaryKeyType, TableDef};
/// let users = TableDef::new("app", "users")
///     .column("id", ColumnType::BigInt, PrimaryKeyType::PartitionKey)?
///     .column("email", ColumnType::Text, PrimaryKeyType::None)?
///     .view("by_email", ["email"])?;
/// assert_eq!(users.get_view("by_email")?.name(), "users_by_email");
/// # Ok::<(), cask_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    keyspace: &'static str,
    base: &'static str,
    table_ref: TableRef,
    columns: Vec<ColumnDef>,
    views: BTreeMap<String, Vec<Column>>,
}

impl TableDef {
    pub fn new(keyspace: &'static str, name: &'static str) -> Self {
        Self {
            keyspace,
            base: name,
            table_ref: TableRef::new(keyspace, name),
            columns: Vec::new(),
            views: BTreeMap::new(),
        }
    }

    /// Declare a column, its back-reference points to this table.
    pub fn column(
        mut self,
        name: &'static str,
        column_type: ColumnType,
        primary_key: PrimaryKeyType,
    ) -> Result<Self> {
        if self.find_column(name).is_some() {
            return Err(CaskError::validation(
                "COLUMN",
                format!("column `{name}` is declared twice on `{}`", self.table_ref),
            ));
        }
        let column = Column::new(self.keyspace, self.base, name, column_type);
        self.columns.push(ColumnDef {
            column,
            primary_key,
        });
        Ok(self)
    }

    /// Declare a materialized view keyed by `columns`.
    pub fn view<'a>(
        mut self,
        key: impl Into<String>,
        columns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let key = key.into();
        let columns = columns
            .into_iter()
            .map(|name| {
                self.find_column(name).copied().ok_or_else(|| {
                    CaskError::validation(
                        "VIEW",
                        format!(
                            "column `{name}` of view `{key}` is not declared on `{}`",
                            self.table_ref
                        ),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(CaskError::validation(
                "VIEW",
                format!("view `{key}` of `{}` has no columns", self.table_ref),
            ));
        }
        self.views.insert(key, columns);
        Ok(self)
    }

    pub fn keyspace(&self) -> &str {
        &self.table_ref.keyspace
    }
    pub fn name(&self) -> &str {
        &self.table_ref.name
    }
    pub fn table_ref(&self) -> &TableRef {
        &self.table_ref
    }
    pub fn column_defs(&self) -> &[ColumnDef] {
        &self.columns
    }
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> {
        self.columns.iter().map(|v| &v.column)
    }
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns().find(|c| c.name == name)
    }
    pub fn partition_key(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|v| v.primary_key == PrimaryKeyType::PartitionKey)
            .map(|v| &v.column)
    }
    pub fn clustering_key(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|v| v.primary_key == PrimaryKeyType::ClusteringKey)
            .map(|v| &v.column)
    }
    pub fn views(&self) -> &BTreeMap<String, Vec<Column>> {
        &self.views
    }

    /// Descriptor of the materialized view `key`, named `<table>_<key>`.
    ///
    /// The result is an independent copy, the base table columns remain valid operands of
    /// statements targeting it.
    pub fn get_view(&self, key: impl AsRef<str>) -> Result<TableDef> {
        let key = key.as_ref();
        if !self.views.contains_key(key) {
            return Err(Error::new(CaskError::NotFound {
                table: self.table_ref.full_name(),
                key: key.into(),
            }));
        }
        let mut view = self.clone();
        view.table_ref.name = format!("{}_{}", self.table_ref.name, key).into();
        Ok(view)
    }

    /// Columns grouped by the cache schema field type they map to.
    pub fn cache_schema(&self) -> BTreeMap<CacheFieldType, Vec<String>> {
        let mut result = BTreeMap::<_, Vec<_>>::new();
        for column in self.columns() {
            result
                .entry(column.column_type.cache_field_type())
                .or_default()
                .push(column.name.to_string());
        }
        result
    }
}

/// A Rust type mapped to a table, implemented by `#[derive(Table)]`.
pub trait Table {
    /// Declaration of the table, built once.
    fn table_def() -> &'static TableDef;
    /// Values of this instance, one per declared column.
    fn row(&self) -> Row;
    /// Shorthand for `Self::table_def().get_view(key)`.
    fn get_view(key: impl AsRef<str>) -> Result<TableDef>
    where
        Self: Sized,
    {
        Self::table_def().get_view(key)
    }
}
