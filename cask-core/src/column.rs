use crate::{
    Aggregate, AggregateOp, CaskError, ColumnType, Error, Expression, Operator, Predicate, Result,
    TableRef, Value,
    writer::{Context, CqlWriter},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};

/// Typed reference to a table column.
///
/// Columns are plain `Copy` values produced alongside the [`TableDef`](crate::TableDef) that
/// declares them. They carry the identity of that table so that every clause they are used in
/// can be checked against the statement target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    /// Column name.
    pub name: &'static str,
    /// Table name.
    pub table: &'static str,
    /// Keyspace name (may be empty).
    pub keyspace: &'static str,
    /// Declared type.
    pub column_type: ColumnType,
    /// Projection alias (`name AS alias`).
    pub alias: Option<&'static str>,
}

impl Column {
    pub const fn new(
        keyspace: &'static str,
        table: &'static str,
        name: &'static str,
        column_type: ColumnType,
    ) -> Self {
        Self {
            name,
            table,
            keyspace,
            column_type,
            alias: None,
        }
    }

    /// Copy of the column projected under a different name.
    pub fn alias(self, alias: &'static str) -> Result<Self> {
        check_alias(alias)?;
        Ok(Self {
            alias: Some(alias),
            ..self
        })
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::new(self.keyspace, self.table)
    }

    /// Whether the column was declared on `table` (or on the base table of the view `table`).
    pub fn belongs_to(&self, table: &TableRef) -> bool {
        self.table == table.base && self.keyspace == table.keyspace
    }

    /// Column name qualified with keyspace and table, for messages.
    pub fn full_name(&self) -> String {
        if self.keyspace.is_empty() {
            format!("{}.{}", self.table, self.name)
        } else {
            format!("{}.{}.{}", self.keyspace, self.table, self.name)
        }
    }

    /// Check and convert a value about to be bound to this column.
    pub fn bind(&self, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        let found = value.type_name();
        self.column_type
            .coerce(value)
            .ok_or_else(|| self.type_mismatch(found))
    }

    fn type_mismatch(&self, found: String) -> Error {
        Error::new(CaskError::TypeMismatch {
            column: self.full_name(),
            expected: self.column_type,
            found,
        })
    }

    fn predicate(&self, op: Operator, value: impl Into<Value>) -> Result<Predicate> {
        Ok(Predicate {
            column: *self,
            op,
            value: self.bind(value)?,
        })
    }

    pub fn eq(&self, value: impl Into<Value>) -> Result<Predicate> {
        self.predicate(Operator::Equal, value)
    }
    pub fn ne(&self, value: impl Into<Value>) -> Result<Predicate> {
        self.predicate(Operator::NotEqual, value)
    }
    pub fn lt(&self, value: impl Into<Value>) -> Result<Predicate> {
        self.predicate(Operator::Less, value)
    }
    pub fn lte(&self, value: impl Into<Value>) -> Result<Predicate> {
        self.predicate(Operator::LessEqual, value)
    }
    pub fn gt(&self, value: impl Into<Value>) -> Result<Predicate> {
        self.predicate(Operator::Greater, value)
    }
    pub fn gte(&self, value: impl Into<Value>) -> Result<Predicate> {
        self.predicate(Operator::GreaterEqual, value)
    }

    /// `column IN ?`, every element must be compatible with the column type.
    pub fn is_in<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Result<Predicate> {
        let values = values
            .into_iter()
            .map(|v| self.bind(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Predicate {
            column: *self,
            op: Operator::In,
            value: Value::List(Some(values)),
        })
    }

    pub fn count(&self) -> Aggregate {
        Aggregate::new(*self, AggregateOp::Count)
    }
    pub fn sum(&self) -> Aggregate {
        Aggregate::new(*self, AggregateOp::Sum)
    }
    pub fn avg(&self) -> Aggregate {
        Aggregate::new(*self, AggregateOp::Avg)
    }
    pub fn min(&self) -> Aggregate {
        Aggregate::new(*self, AggregateOp::Min)
    }
    pub fn max(&self) -> Aggregate {
        Aggregate::new(*self, AggregateOp::Max)
    }
}

/// Aliases must be plain identifiers.
pub(crate) fn check_alias(alias: &str) -> Result<()> {
    let mut chars = alias.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(CaskError::validation(
            "AS",
            format!("`{alias}` is not a valid alias, expected an identifier"),
        ));
    }
    Ok(())
}

impl Expression for Column {
    fn write_query(&self, writer: &dyn CqlWriter, context: &mut Context, out: &mut String) {
        writer.write_column(context, out, self);
    }
}

/// Role of a column in the primary key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKeyType {
    /// Part of the partition key.
    PartitionKey,
    /// Clustering column.
    ClusteringKey,
    /// Regular column.
    #[default]
    None,
}

impl ToTokens for PrimaryKeyType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        use PrimaryKeyType::*;
        tokens.append_all(match self {
            PartitionKey => quote!(::cask::PrimaryKeyType::PartitionKey),
            ClusteringKey => quote!(::cask::PrimaryKeyType::ClusteringKey),
            None => quote!(::cask::PrimaryKeyType::None),
        });
    }
}

/// Declared column: the column reference plus its role in the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub column: Column,
    pub primary_key: PrimaryKeyType,
}

impl ColumnDef {
    pub fn name(&self) -> &'static str {
        self.column.name
    }
    pub fn column_type(&self) -> ColumnType {
        self.column.column_type
    }
    pub fn is_primary_key(&self) -> bool {
        self.primary_key != PrimaryKeyType::None
    }
}

impl<'a> From<&'a ColumnDef> for &'a Column {
    fn from(value: &'a ColumnDef) -> Self {
        &value.column
    }
}
