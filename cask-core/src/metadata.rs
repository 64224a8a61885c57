use crate::{
    CaskError, Config, CqlWriter, DefaultCqlWriter, Executor, Result, Table, TableDef,
    writer::Context,
};
use std::collections::BTreeSet;

/// Registry of the tables of an application, able to create their schema.
#[derive(Debug, Default, Clone)]
pub struct MetaData {
    config: Config,
    tables: Vec<TableDef>,
}

impl MetaData {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tables: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn register<T: Table>(&mut self) -> &mut Self {
        self.register_def(T::table_def())
    }

    /// Register a table, registering the same table twice has no effect.
    pub fn register_def(&mut self, table: &TableDef) -> &mut Self {
        if !self
            .tables
            .iter()
            .any(|v| v.table_ref() == table.table_ref())
        {
            self.tables.push(table.clone());
        }
        self
    }

    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    /// Schema statements in execution order: keyspaces, then tables, then views.
    pub fn statements(&self) -> Result<Vec<String>> {
        self.statements_with(DefaultCqlWriter.as_dyn())
    }

    pub fn statements_with(&self, writer: &dyn CqlWriter) -> Result<Vec<String>> {
        for table in &self.tables {
            if table.table_ref().is_view() {
                return Err(CaskError::validation(
                    "CREATE TABLE",
                    format!(
                        "`{}` is a view, register its base table instead",
                        table.table_ref()
                    ),
                ));
            }
            if table.partition_key().next().is_none() {
                return Err(CaskError::validation(
                    "CREATE TABLE",
                    format!("`{}` does not declare a partition key", table.table_ref()),
                ));
            }
        }
        let mut context = Context::default();
        let mut result = Vec::new();
        let keyspaces = self
            .tables
            .iter()
            .map(|v| v.keyspace())
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>();
        for keyspace in keyspaces {
            let mut out = String::new();
            writer.write_create_keyspace(
                &mut context,
                &mut out,
                keyspace,
                self.config.replication_factor(),
            );
            result.push(out);
        }
        for table in &self.tables {
            let mut out = String::new();
            writer.write_create_table(&mut context, &mut out, table, true);
            result.push(out);
        }
        for table in &self.tables {
            for (key, columns) in table.views() {
                let mut out = String::new();
                writer.write_create_view(&mut context, &mut out, table, key, columns, true);
                result.push(out);
            }
        }
        Ok(result)
    }

    /// Create every keyspace, table and materialized view that does not exist yet.
    pub async fn create_all<E: Executor>(&self, executor: &mut E) -> Result<()> {
        for statement in self.statements()? {
            log::info!("Creating schema: {}", statement.lines().next().unwrap_or_default());
            executor.execute(statement, Vec::new()).await?;
        }
        Ok(())
    }
}
