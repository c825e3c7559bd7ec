//! Statement accumulation and execution routing.
//!
//! Builders assemble SQL text clause by clause and finish into an immutable
//! [`Statement`] tagged with its [`StatementKind`]. Executing a statement
//! routes through the driver and shapes the result accordingly: a decoded
//! row list, an optional single row, a scalar count, a boolean, a write
//! summary, or a projected join result. Builders are single-use — chaining
//! consumes them, and a fresh builder is constructed per logical statement.

use std::sync::Arc;

use crate::condition::Condition;
use crate::driver::{Driver, ExecResult, Row};
use crate::error::{LiteError, LiteResult};
use crate::mapper::{self, Mapped, Projection};
use crate::schema::{AliasMap, TableSchema};

/// How a statement's execution result is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Row list.
    Read,
    /// One row or absence.
    Single,
    /// Scalar count.
    Count,
    /// Boolean existence probe.
    Exists,
    /// Affected-row summary.
    Write,
    /// Projected join result list.
    Join,
}

/// A finished statement: rendered SQL text plus everything needed to shape
/// its result. Immutable once built; not reused across executions of
/// different logical queries.
#[derive(Debug, Clone)]
pub struct Statement {
    sql: String,
    kind: StatementKind,
    schema: Option<Arc<TableSchema>>,
    aliases: Option<AliasMap>,
    projection: Option<Projection>,
}

impl Statement {
    pub(crate) fn write(sql: String) -> Self {
        Self {
            sql,
            kind: StatementKind::Write,
            schema: None,
            aliases: None,
            projection: None,
        }
    }

    pub(crate) fn read(sql: String, kind: StatementKind, schema: Arc<TableSchema>) -> Self {
        Self {
            sql,
            kind,
            schema: Some(schema),
            aliases: None,
            projection: None,
        }
    }

    pub(crate) fn join(sql: String, aliases: AliasMap, projection: Projection) -> Self {
        Self {
            sql,
            kind: StatementKind::Join,
            schema: None,
            aliases: Some(aliases),
            projection: Some(projection),
        }
    }

    /// The rendered SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Execute through the driver, shaping the result by kind.
    pub async fn execute(&self, driver: &impl Driver) -> LiteResult<Outcome> {
        execute(self, driver).await
    }
}

/// Tagged execution result, selected by the statement's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(Vec<Row>),
    Row(Option<Row>),
    Count(i64),
    Bool(bool),
    Write(ExecResult),
    Mapped(Vec<Mapped>),
}

impl Outcome {
    /// Extract the decoded row list of a read statement.
    pub fn rows(self) -> LiteResult<Vec<Row>> {
        match self {
            Outcome::Rows(rows) => Ok(rows),
            other => Err(Self::mismatch("rows", &other)),
        }
    }

    /// Extract the optional row of a single-row statement.
    pub fn row(self) -> LiteResult<Option<Row>> {
        match self {
            Outcome::Row(row) => Ok(row),
            other => Err(Self::mismatch("row", &other)),
        }
    }

    /// Extract the scalar of a count statement.
    pub fn count(self) -> LiteResult<i64> {
        match self {
            Outcome::Count(n) => Ok(n),
            other => Err(Self::mismatch("count", &other)),
        }
    }

    /// Extract the boolean of an existence statement.
    pub fn boolean(self) -> LiteResult<bool> {
        match self {
            Outcome::Bool(b) => Ok(b),
            other => Err(Self::mismatch("bool", &other)),
        }
    }

    /// Extract the summary of a write statement.
    pub fn write(self) -> LiteResult<ExecResult> {
        match self {
            Outcome::Write(result) => Ok(result),
            other => Err(Self::mismatch("write", &other)),
        }
    }

    /// Extract the projected result list of a join statement.
    pub fn mapped(self) -> LiteResult<Vec<Mapped>> {
        match self {
            Outcome::Mapped(mapped) => Ok(mapped),
            other => Err(Self::mismatch("mapped", &other)),
        }
    }

    fn mismatch(wanted: &str, got: &Outcome) -> LiteError {
        LiteError::validation(format!("expected {wanted} outcome, got {got:?}"))
    }
}

/// Execute a finished statement, routing the rows through the result mapper.
pub async fn execute(statement: &Statement, driver: &impl Driver) -> LiteResult<Outcome> {
    tracing::debug!(kind = ?statement.kind, sql = %statement.sql, "executing statement");
    match statement.kind {
        StatementKind::Write => Ok(Outcome::Write(driver.execute(&statement.sql).await?)),
        StatementKind::Read => {
            let schema = statement
                .schema
                .as_ref()
                .ok_or_else(|| LiteError::validation("read statement without a table schema"))?;
            let rows = driver.query_rows(&statement.sql).await?;
            let decoded = rows
                .into_iter()
                .map(|row| mapper::decode_row(row, schema))
                .collect::<LiteResult<Vec<_>>>()?;
            Ok(Outcome::Rows(decoded))
        }
        StatementKind::Single => {
            let schema = statement
                .schema
                .as_ref()
                .ok_or_else(|| LiteError::validation("single statement without a table schema"))?;
            let row = driver.query_single(&statement.sql).await?;
            let decoded = row
                .map(|row| mapper::decode_row(row, schema))
                .transpose()?;
            Ok(Outcome::Row(decoded))
        }
        StatementKind::Count => Ok(Outcome::Count(fetch_count(&statement.sql, driver).await?)),
        StatementKind::Exists => Ok(Outcome::Bool(
            fetch_count(&statement.sql, driver).await? > 0,
        )),
        StatementKind::Join => {
            let aliases = statement.aliases.as_ref().ok_or_else(|| {
                LiteError::MissingAliasContext(
                    "join statement executed without alias bindings".to_string(),
                )
            })?;
            let projection = statement.projection.as_ref().ok_or_else(|| {
                LiteError::MissingAliasContext(
                    "join statement executed without a projection template".to_string(),
                )
            })?;
            let rows = driver.query_rows(&statement.sql).await?;
            let mapped = rows
                .into_iter()
                .map(|row| {
                    mapper::decode_row_aliased(row, aliases)
                        .map(|decoded| mapper::project(projection, &decoded))
                })
                .collect::<LiteResult<Vec<_>>>()?;
            Ok(Outcome::Mapped(mapped))
        }
    }
}

async fn fetch_count(sql: &str, driver: &impl Driver) -> LiteResult<i64> {
    let row = driver.query_single(sql).await?;
    match row.as_ref().and_then(|r| r.get("count")) {
        Some(crate::value::Value::Integer(n)) => Ok(*n),
        Some(other) => Err(LiteError::decode(
            "count",
            format!("expected integer count, got {other:?}"),
        )),
        None => Ok(0),
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// Shared clause state for the read-style builders.
#[derive(Debug, Clone, Default)]
pub(crate) struct Clauses {
    pub(crate) where_sql: Option<String>,
    pub(crate) order_sql: Option<String>,
    pub(crate) limit: Option<(i64, Option<i64>)>,
}

impl Clauses {
    pub(crate) fn set_where(&mut self, condition: &Condition) -> LiteResult<()> {
        if self.where_sql.is_some() {
            return Err(LiteError::validation("WHERE clause already set"));
        }
        if condition.is_empty() {
            return Ok(());
        }
        self.where_sql = Some(condition.render()?);
        Ok(())
    }

    pub(crate) fn set_order(&mut self, rendered: Vec<String>) -> LiteResult<()> {
        if self.order_sql.is_some() {
            return Err(LiteError::validation("ORDER BY clause already set"));
        }
        if rendered.is_empty() {
            return Ok(());
        }
        self.order_sql = Some(rendered.join(", "));
        Ok(())
    }

    /// Append WHERE / ORDER BY / LIMIT in their fixed clause order.
    pub(crate) fn append_to(&self, sql: &mut String) {
        if let Some(where_sql) = &self.where_sql {
            sql.push_str(" WHERE ");
            sql.push_str(where_sql);
        }
        if let Some(order_sql) = &self.order_sql {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_sql);
        }
        if let Some((limit, offset)) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
            if let Some(offset) = offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }
    }
}

/// Builder for SELECT statements (row list or single row).
#[derive(Debug, Clone)]
pub struct ReadBuilder {
    base_sql: String,
    kind: StatementKind,
    schema: Arc<TableSchema>,
    clauses: Clauses,
}

impl ReadBuilder {
    pub(crate) fn new(base_sql: String, kind: StatementKind, schema: Arc<TableSchema>) -> Self {
        Self {
            base_sql,
            kind,
            schema,
            clauses: Clauses::default(),
        }
    }

    /// Attach the WHERE predicate. May only be called once.
    pub fn filter<F>(mut self, f: F) -> LiteResult<Self>
    where
        F: FnOnce(Condition) -> LiteResult<Condition>,
    {
        let condition = f(Condition::for_table(self.schema.clone()))?;
        self.clauses.set_where(&condition)?;
        Ok(self)
    }

    /// Attach ORDER BY keys in declaration order. May only be called once.
    pub fn order_by(mut self, keys: &[(&str, Order)]) -> LiteResult<Self> {
        let rendered = keys
            .iter()
            .map(|(field, order)| {
                let (ident, _) = self.schema.resolve_field(field)?;
                Ok(format!("{ident} {}", order.as_sql()))
            })
            .collect::<LiteResult<Vec<_>>>()?;
        self.clauses.set_order(rendered)?;
        Ok(self)
    }

    /// Attach a LIMIT clause.
    pub fn limit(mut self, limit: i64) -> Self {
        self.clauses.limit = Some((limit, None));
        self
    }

    /// Attach LIMIT and OFFSET clauses.
    pub fn limit_offset(mut self, limit: i64, offset: i64) -> Self {
        self.clauses.limit = Some((limit, Some(offset)));
        self
    }

    /// The SQL text as currently accumulated.
    pub fn sql(&self) -> String {
        self.render()
    }

    fn render(&self) -> String {
        let mut sql = self.base_sql.clone();
        self.clauses.append_to(&mut sql);
        // single-row statements always carry a limit
        if self.kind == StatementKind::Single && self.clauses.limit.is_none() {
            sql.push_str(" LIMIT 1");
        }
        sql
    }

    /// Finish into an immutable statement.
    pub fn build(self) -> Statement {
        let sql = self.render();
        Statement::read(sql, self.kind, self.schema)
    }

    /// Execute and decode every row.
    pub async fn fetch_all(self, driver: &impl Driver) -> LiteResult<Vec<Row>> {
        let schema = self.schema.clone();
        let sql = self.render();
        tracing::debug!(sql = %sql, "fetching rows");
        let rows = driver.query_rows(&sql).await?;
        rows.into_iter()
            .map(|row| mapper::decode_row(row, &schema))
            .collect()
    }

    /// Execute and decode the first row, if any.
    ///
    /// An empty result is an explicit absence, not an error.
    pub async fn fetch_one(self, driver: &impl Driver) -> LiteResult<Option<Row>> {
        let schema = self.schema.clone();
        let mut sql = self.base_sql.clone();
        self.clauses.append_to(&mut sql);
        if self.clauses.limit.is_none() {
            sql.push_str(" LIMIT 1");
        }
        tracing::debug!(sql = %sql, "fetching single row");
        let row = driver.query_single(&sql).await?;
        row.map(|row| mapper::decode_row(row, &schema)).transpose()
    }
}

/// Builder for COUNT / EXISTS statements.
///
/// Both compile to the same `SELECT COUNT(*)` text; they differ only in how
/// the result is interpreted.
#[derive(Debug, Clone)]
pub struct CountBuilder {
    base_sql: String,
    kind: StatementKind,
    schema: Arc<TableSchema>,
    clauses: Clauses,
}

impl CountBuilder {
    pub(crate) fn new(base_sql: String, kind: StatementKind, schema: Arc<TableSchema>) -> Self {
        Self {
            base_sql,
            kind,
            schema,
            clauses: Clauses::default(),
        }
    }

    /// Attach the WHERE predicate. May only be called once.
    pub fn filter<F>(mut self, f: F) -> LiteResult<Self>
    where
        F: FnOnce(Condition) -> LiteResult<Condition>,
    {
        let condition = f(Condition::for_table(self.schema.clone()))?;
        self.clauses.set_where(&condition)?;
        Ok(self)
    }

    /// The SQL text as currently accumulated.
    pub fn sql(&self) -> String {
        let mut sql = self.base_sql.clone();
        self.clauses.append_to(&mut sql);
        sql
    }

    /// Finish into an immutable statement.
    pub fn build(self) -> Statement {
        let sql = self.sql();
        Statement::read(sql, self.kind, self.schema)
    }

    /// Execute and return the scalar count.
    pub async fn fetch_count(self, driver: &impl Driver) -> LiteResult<i64> {
        let sql = self.sql();
        tracing::debug!(sql = %sql, "fetching count");
        fetch_count(&sql, driver).await
    }

    /// Execute and return whether any row matched.
    pub async fn fetch_exists(self, driver: &impl Driver) -> LiteResult<bool> {
        Ok(self.fetch_count(driver).await? > 0)
    }
}

/// Builder for UPDATE / DELETE statements with an optional WHERE clause.
#[derive(Debug, Clone)]
pub struct WriteBuilder {
    base_sql: String,
    schema: Arc<TableSchema>,
    where_sql: Option<String>,
}

impl WriteBuilder {
    pub(crate) fn new(base_sql: String, schema: Arc<TableSchema>) -> Self {
        Self {
            base_sql,
            schema,
            where_sql: None,
        }
    }

    /// Attach the WHERE predicate. May only be called once.
    pub fn filter<F>(mut self, f: F) -> LiteResult<Self>
    where
        F: FnOnce(Condition) -> LiteResult<Condition>,
    {
        if self.where_sql.is_some() {
            return Err(LiteError::validation("WHERE clause already set"));
        }
        let condition = f(Condition::for_table(self.schema.clone()))?;
        if !condition.is_empty() {
            self.where_sql = Some(condition.render()?);
        }
        Ok(self)
    }

    /// The SQL text as currently accumulated.
    pub fn sql(&self) -> String {
        match &self.where_sql {
            Some(where_sql) => format!("{} WHERE {}", self.base_sql, where_sql),
            None => self.base_sql.clone(),
        }
    }

    /// Finish into an immutable statement.
    pub fn build(self) -> Statement {
        Statement::write(self.sql())
    }

    /// Execute and return the affected-row summary.
    pub async fn execute(self, driver: &impl Driver) -> LiteResult<ExecResult> {
        let sql = self.sql();
        tracing::debug!(sql = %sql, "executing write");
        driver.execute(&sql).await
    }
}
