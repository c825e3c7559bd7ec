//! Table schemas, alias bindings, and the schema registry.
//!
//! Schemas are registered explicitly through [`TableSchema::builder`]: an
//! ordered list of column descriptors per table, shared as
//! `Arc<TableSchema>` and read-only thereafter. The [`SchemaRegistry`] is the
//! lookup the join builder resolves table handles through.

use std::sync::Arc;

use crate::error::{LiteError, LiteResult};
use crate::statement::Statement;
use crate::table::Table;
use crate::value::{SqlType, quote_ident, qualify};

/// Immutable description of one table column.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub name: String,
    pub sql_type: SqlType,
    pub size: Option<u32>,
    pub primary_key: bool,
}

impl ColumnDescriptor {
    /// Render the column declaration for CREATE TABLE.
    ///
    /// BOOLEAN columns carry an inline 0/1 CHECK constraint; MONEY and
    /// DATETIME are declared INTEGER (cents / epoch seconds).
    pub(crate) fn create_decl(&self) -> String {
        let size = self
            .size
            .map(|s| format!("({s})"))
            .unwrap_or_default();
        let ty = match self.sql_type {
            SqlType::Boolean => format!("BOOLEAN NOT NULL CHECK ({} IN (0,1))", self.name),
            SqlType::DateTime | SqlType::Money => "INTEGER".to_string(),
            SqlType::Integer => format!("INTEGER{size}"),
            SqlType::Text => format!("TEXT{size}"),
            SqlType::Decimal => format!("DECIMAL{size}"),
        };
        let primary = if self.primary_key { " PRIMARY KEY" } else { "" };
        format!("{} {}{}", quote_ident(&self.name), ty, primary)
    }

    /// Render the SELECT list expression for this column.
    ///
    /// DATETIME columns are formatted back to readable text and aliased to
    /// their own name so decoding stays uniform.
    pub(crate) fn select_expr(&self) -> String {
        let ident = quote_ident(&self.name);
        match self.sql_type {
            SqlType::DateTime => format!("datetime({ident},'unixepoch') AS {ident}"),
            _ => ident,
        }
    }

    /// Render the SELECT list expression for this column under a join alias,
    /// flattened to `alias___column`.
    pub(crate) fn select_expr_aliased(&self, alias: &str) -> String {
        let ident = qualify(Some(alias), &self.name);
        let flat = quote_ident(&crate::mapper::flatten_field(alias, &self.name));
        match self.sql_type {
            SqlType::DateTime => format!("datetime({ident},'unixepoch') AS {flat}"),
            _ => format!("{ident} AS {flat}"),
        }
    }
}

/// Ordered column metadata for one table.
#[derive(Debug, Clone)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Start building a schema for the named table.
    pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in registration order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Look up a column, failing with [`LiteError::SchemaMismatch`].
    pub fn require_column(&self, name: &str) -> LiteResult<&ColumnDescriptor> {
        self.column(name)
            .ok_or_else(|| LiteError::schema_mismatch(&self.name, name))
    }

    /// Resolve a bare column reference in single-table scope.
    ///
    /// Alias-qualified references are rejected here; they only make sense
    /// against an [`AliasMap`].
    pub(crate) fn resolve_field(&self, field: &str) -> LiteResult<(String, SqlType)> {
        if field.contains('.') {
            return Err(LiteError::MissingAliasContext(format!(
                "column '{field}' is alias-qualified but no aliases are bound"
            )));
        }
        let col = self.require_column(field)?;
        Ok((quote_ident(field), col.sql_type))
    }
}

/// Fluent builder producing a [`TableSchema`].
#[derive(Debug)]
pub struct TableSchemaBuilder {
    name: String,
    columns: Vec<ColumnDescriptor>,
}

impl TableSchemaBuilder {
    /// Add the primary key column.
    pub fn primary_key(self, name: impl Into<String>, sql_type: SqlType) -> Self {
        self.push(name.into(), sql_type, None, true)
    }

    /// Add a column.
    pub fn column(self, name: impl Into<String>, sql_type: SqlType) -> Self {
        self.push(name.into(), sql_type, None, false)
    }

    /// Add a column with a declared size, e.g. `TEXT(40)`.
    pub fn sized_column(self, name: impl Into<String>, sql_type: SqlType, size: u32) -> Self {
        self.push(name.into(), sql_type, Some(size), false)
    }

    fn push(mut self, name: String, sql_type: SqlType, size: Option<u32>, primary_key: bool) -> Self {
        self.columns.push(ColumnDescriptor {
            name,
            sql_type,
            size,
            primary_key,
        });
        self
    }

    pub fn build(self) -> LiteResult<TableSchema> {
        if self.name.is_empty() {
            return Err(LiteError::validation("table name cannot be empty"));
        }
        if self.columns.is_empty() {
            return Err(LiteError::validation(format!(
                "table '{}' has no columns",
                self.name
            )));
        }
        for (idx, col) in self.columns.iter().enumerate() {
            if col.name.is_empty() {
                return Err(LiteError::validation("column name cannot be empty"));
            }
            if self.columns[..idx].iter().any(|c| c.name == col.name) {
                return Err(LiteError::validation(format!(
                    "duplicate column '{}' on table '{}'",
                    col.name, self.name
                )));
            }
        }
        Ok(TableSchema {
            name: self.name,
            columns: self.columns,
        })
    }
}

/// Ordered alias -> schema lookup used wherever multiple tables are in scope.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    entries: Vec<(String, Arc<TableSchema>)>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an alias to a table schema. Duplicate aliases are rejected.
    pub fn bind(&mut self, alias: impl Into<String>, schema: Arc<TableSchema>) -> LiteResult<()> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(LiteError::validation("alias cannot be empty"));
        }
        if self.get(&alias).is_some() {
            return Err(LiteError::validation(format!(
                "alias '{alias}' is already bound"
            )));
        }
        self.entries.push((alias, schema));
        Ok(())
    }

    pub fn get(&self, alias: &str) -> Option<&Arc<TableSchema>> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, s)| s)
    }

    /// Look up an alias, failing with [`LiteError::MissingAliasContext`].
    pub fn require(&self, alias: &str) -> LiteResult<&Arc<TableSchema>> {
        self.get(alias).ok_or_else(|| {
            LiteError::MissingAliasContext(format!("alias '{alias}' is not bound"))
        })
    }

    /// Bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<TableSchema>)> {
        self.entries.iter().map(|(a, s)| (a.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an `alias.column` reference in join scope.
    pub(crate) fn resolve_field(&self, field: &str) -> LiteResult<(String, SqlType)> {
        let Some((alias, column)) = field.split_once('.') else {
            return Err(LiteError::MissingAliasContext(format!(
                "column '{field}' must be alias-qualified in a join context"
            )));
        };
        let schema = self.require(alias)?;
        let col = schema.require_column(column)?;
        Ok((qualify(Some(alias), column), col.sql_type))
    }
}

/// Registry of all bound table schemas.
///
/// Registration order is preserved; it drives `create_all`/`drop_all` and
/// backup output.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<Arc<TableSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table schema, replacing any previous schema with the same
    /// name. Returns the shared handle.
    pub fn register(&mut self, schema: TableSchema) -> Arc<TableSchema> {
        let schema = Arc::new(schema);
        if let Some(slot) = self.tables.iter_mut().find(|t| t.name() == schema.name()) {
            *slot = schema.clone();
        } else {
            self.tables.push(schema.clone());
        }
        schema
    }

    /// Get a table schema by name.
    pub fn get(&self, name: &str) -> LiteResult<Arc<TableSchema>> {
        self.tables
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| LiteError::UnknownTable(name.to_string()))
    }

    /// Get a statement-building handle for a registered table.
    pub fn table(&self, name: &str) -> LiteResult<Table> {
        Ok(Table::new(self.get(name)?))
    }

    /// All registered schemas, in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &Arc<TableSchema>> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// CREATE TABLE statements for every registered table.
    pub fn create_all(&self) -> Vec<Statement> {
        self.tables
            .iter()
            .map(|t| Table::new(t.clone()).create())
            .collect()
    }

    /// DROP TABLE statements for every registered table.
    pub fn drop_all(&self) -> Vec<Statement> {
        self.tables
            .iter()
            .map(|t| Table::new(t.clone()).drop())
            .collect()
    }
}
