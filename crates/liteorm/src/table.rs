//! Table handles: the statement entry points for one schema.
//!
//! A [`Table`] is a thin handle over a shared [`TableSchema`]. It owns no
//! connection; finished builders take the driver per call.

use std::sync::Arc;

use crate::driver::{Driver, Record};
use crate::error::{LiteError, LiteResult};
use crate::join::JoinBuilder;
use crate::schema::{SchemaRegistry, TableSchema};
use crate::statement::{CountBuilder, ReadBuilder, Statement, StatementKind, WriteBuilder};
use crate::value::{self, Value, quote_ident};

/// Statement-building handle for one table.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Arc<TableSchema>,
}

impl Table {
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// `CREATE TABLE IF NOT EXISTS` with every declared column.
    pub fn create(&self) -> Statement {
        let cols: Vec<String> = self
            .schema
            .columns()
            .iter()
            .map(|c| c.create_decl())
            .collect();
        Statement::write(format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(self.name()),
            cols.join(", ")
        ))
    }

    /// `DROP TABLE IF EXISTS`.
    #[allow(clippy::should_implement_trait)]
    pub fn drop(&self) -> Statement {
        Statement::write(format!(
            "DROP TABLE IF EXISTS {}",
            quote_ident(self.name())
        ))
    }

    /// SELECT a subset of columns.
    pub fn select(&self, columns: &[&str]) -> LiteResult<ReadBuilder> {
        self.read_builder(columns, StatementKind::Read)
    }

    /// SELECT every declared column.
    pub fn select_all(&self) -> ReadBuilder {
        self.read_all(StatementKind::Read)
    }

    /// Single-row SELECT of a subset of columns; `LIMIT 1` is appended at
    /// build time when no explicit limit is set.
    pub fn single(&self, columns: &[&str]) -> LiteResult<ReadBuilder> {
        self.read_builder(columns, StatementKind::Single)
    }

    /// Single-row SELECT of every declared column.
    pub fn single_all(&self) -> ReadBuilder {
        self.read_all(StatementKind::Single)
    }

    fn read_builder(&self, columns: &[&str], kind: StatementKind) -> LiteResult<ReadBuilder> {
        let exprs = columns
            .iter()
            .map(|c| Ok(self.schema.require_column(c)?.select_expr()))
            .collect::<LiteResult<Vec<_>>>()?;
        Ok(ReadBuilder::new(
            format!(
                "SELECT {} FROM {}",
                exprs.join(","),
                quote_ident(self.name())
            ),
            kind,
            self.schema.clone(),
        ))
    }

    fn read_all(&self, kind: StatementKind) -> ReadBuilder {
        let exprs: Vec<String> = self
            .schema
            .columns()
            .iter()
            .map(|c| c.select_expr())
            .collect();
        ReadBuilder::new(
            format!(
                "SELECT {} FROM {}",
                exprs.join(","),
                quote_ident(self.name())
            ),
            kind,
            self.schema.clone(),
        )
    }

    /// Row count; resolves to a scalar.
    pub fn count(&self) -> CountBuilder {
        CountBuilder::new(self.count_sql(), StatementKind::Count, self.schema.clone())
    }

    /// Existence probe; same generated SQL as [`count`](Table::count), the
    /// result is interpreted as `count > 0`.
    pub fn any(&self) -> CountBuilder {
        CountBuilder::new(self.count_sql(), StatementKind::Exists, self.schema.clone())
    }

    fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) as count FROM {}",
            quote_ident(self.name())
        )
    }

    /// Single-row INSERT.
    pub fn insert(&self, record: &Record) -> LiteResult<Statement> {
        self.insert_inner(record, false)
    }

    /// Single-row INSERT OR REPLACE.
    pub fn upsert(&self, record: &Record) -> LiteResult<Statement> {
        self.insert_inner(record, true)
    }

    fn insert_inner(&self, record: &Record, upsert: bool) -> LiteResult<Statement> {
        if record.is_empty() {
            return Err(LiteError::validation("insert requires at least one field"));
        }
        let mut cols = Vec::with_capacity(record.len());
        let mut vals = Vec::with_capacity(record.len());
        for (field, v) in record.fields() {
            let col = self.schema.require_column(field)?;
            cols.push(quote_ident(field));
            vals.push(value::encode(col.sql_type, field, v)?);
        }
        let or_replace = if upsert { " OR REPLACE" } else { "" };
        Ok(Statement::write(format!(
            "INSERT{} INTO {} ({}) VALUES ({})",
            or_replace,
            quote_ident(self.name()),
            cols.join(","),
            vals.join(",")
        )))
    }

    /// Batched INSERT via `SELECT ... UNION ALL SELECT ...`.
    ///
    /// The first record defines the column set and carries explicit column
    /// aliases; subsequent records are positional against it, with missing
    /// fields inserted as null.
    pub fn insert_many(&self, records: &[Record]) -> LiteResult<Statement> {
        let first = records.first().ok_or(LiteError::EmptyBatch)?;
        if first.is_empty() {
            return Err(LiteError::validation("insert requires at least one field"));
        }

        let mut fields = Vec::with_capacity(first.len());
        let mut head = Vec::with_capacity(first.len());
        for (field, v) in first.fields() {
            let col = self.schema.require_column(field)?;
            head.push(format!(
                "{} AS {}",
                value::encode(col.sql_type, field, v)?,
                quote_ident(field)
            ));
            fields.push((field, col.sql_type));
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) SELECT {}",
            quote_ident(self.name()),
            fields
                .iter()
                .map(|(f, _)| quote_ident(f))
                .collect::<Vec<_>>()
                .join(","),
            head.join(",")
        );
        for record in &records[1..] {
            let vals = fields
                .iter()
                .map(|(field, ty)| {
                    let v = record.get(field).unwrap_or(&Value::Null);
                    value::encode(*ty, field, v)
                })
                .collect::<LiteResult<Vec<_>>>()?;
            sql.push_str(" UNION ALL SELECT ");
            sql.push_str(&vals.join(","));
        }
        Ok(Statement::write(sql))
    }

    /// UPDATE with the record's fields as the SET list.
    pub fn update(&self, set: &Record) -> LiteResult<WriteBuilder> {
        if set.is_empty() {
            return Err(LiteError::validation("update requires at least one field"));
        }
        let assignments = set
            .fields()
            .map(|(field, v)| {
                let col = self.schema.require_column(field)?;
                Ok(format!(
                    "{} = {}",
                    quote_ident(field),
                    value::encode(col.sql_type, field, v)?
                ))
            })
            .collect::<LiteResult<Vec<_>>>()?;
        Ok(WriteBuilder::new(
            format!(
                "UPDATE {} SET {}",
                quote_ident(self.name()),
                assignments.join(", ")
            ),
            self.schema.clone(),
        ))
    }

    /// DELETE, optionally filtered.
    pub fn delete(&self) -> WriteBuilder {
        WriteBuilder::new(
            format!("DELETE FROM {}", quote_ident(self.name())),
            self.schema.clone(),
        )
    }

    /// Start a join from this table; further tables resolve through the
    /// registry.
    pub fn join<'a>(&self, registry: &'a SchemaRegistry) -> JoinBuilder<'a> {
        JoinBuilder::new(self.schema.clone(), registry)
    }

    /// Dump the table's data as one INSERT statement, or an empty string for
    /// an empty table. Cells render through the raw encoder: numeric
    /// affinity bare, text quoted.
    pub async fn dump_sql(&self, driver: &impl Driver) -> LiteResult<String> {
        let cols: Vec<String> = self
            .schema
            .columns()
            .iter()
            .map(|c| quote_ident(&c.name))
            .collect();
        let sql = format!(
            "SELECT {} FROM {}",
            cols.join(","),
            quote_ident(self.name())
        );
        tracing::debug!(sql = %sql, "dumping table");
        let rows = driver.query_rows(&sql).await?;
        if rows.is_empty() {
            return Ok(String::new());
        }

        let values: Vec<String> = rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = self
                    .schema
                    .columns()
                    .iter()
                    .map(|col| {
                        let cell = row.get(&col.name).unwrap_or(&Value::Null);
                        value::encode_raw(col.sql_type, cell)
                    })
                    .collect();
                format!("({})", cells.join(","))
            })
            .collect();

        Ok(format!(
            "INSERT INTO {} ({}) VALUES {};",
            quote_ident(self.name()),
            cols.join(","),
            values.join(",")
        ))
    }
}

/// Dump every registered table, in registration order, one INSERT per
/// non-empty table.
pub async fn backup_sql(registry: &SchemaRegistry, driver: &impl Driver) -> LiteResult<String> {
    let mut parts = Vec::new();
    for schema in registry.tables() {
        let dump = Table::new(schema.clone()).dump_sql(driver).await?;
        if !dump.is_empty() {
            parts.push(dump);
        }
    }
    Ok(parts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ExecResult, Row};
    use crate::mapper::{Mapped, Projection};
    use crate::statement::{Order, Outcome, execute};
    use crate::value::SqlType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.register(
            TableSchema::builder("Person")
                .primary_key("id", SqlType::Integer)
                .column("name", SqlType::Text)
                .column("dob", SqlType::DateTime)
                .column("age", SqlType::Integer)
                .column("married", SqlType::Boolean)
                .column("salary", SqlType::Money)
                .build()
                .unwrap(),
        );
        registry.register(
            TableSchema::builder("Address")
                .primary_key("id", SqlType::Integer)
                .column("person", SqlType::Integer)
                .column("address", SqlType::Text)
                .build()
                .unwrap(),
        );
        registry.register(
            TableSchema::builder("Role")
                .primary_key("id", SqlType::Integer)
                .column("user", SqlType::Integer)
                .column("role", SqlType::Text)
                .build()
                .unwrap(),
        );
        registry
    }

    fn person(registry: &SchemaRegistry) -> Table {
        registry.table("Person").unwrap()
    }

    /// Recording driver: captures every SQL text and replays canned rows.
    #[derive(Default)]
    struct MockDriver {
        sql: Mutex<Vec<String>>,
        rows: Mutex<Vec<Row>>,
    }

    impl MockDriver {
        fn with_rows(rows: Vec<Row>) -> Self {
            Self {
                sql: Mutex::new(Vec::new()),
                rows: Mutex::new(rows),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.sql.lock().unwrap().clone()
        }
    }

    impl Driver for MockDriver {
        async fn execute(&self, sql: &str) -> LiteResult<ExecResult> {
            self.sql.lock().unwrap().push(sql.to_string());
            Ok(ExecResult {
                insert_id: 1,
                rows_affected: 1,
            })
        }

        async fn query_rows(&self, sql: &str) -> LiteResult<Vec<Row>> {
            self.sql.lock().unwrap().push(sql.to_string());
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn query_single(&self, sql: &str) -> LiteResult<Option<Row>> {
            self.sql.lock().unwrap().push(sql.to_string());
            Ok(self.rows.lock().unwrap().first().cloned())
        }
    }

    // ==================== SQL text ====================

    #[test]
    fn create_sql() {
        let registry = registry();
        assert_eq!(
            person(&registry).create().sql(),
            "CREATE TABLE IF NOT EXISTS \"Person\" (\"id\" INTEGER PRIMARY KEY, \
             \"name\" TEXT, \"dob\" INTEGER, \"age\" INTEGER, \
             \"married\" BOOLEAN NOT NULL CHECK (married IN (0,1)), \"salary\" INTEGER)"
        );
    }

    #[test]
    fn create_sql_sized_column() {
        let mut registry = SchemaRegistry::new();
        registry.register(
            TableSchema::builder("Note")
                .primary_key("id", SqlType::Integer)
                .sized_column("body", SqlType::Text, 40)
                .build()
                .unwrap(),
        );
        assert_eq!(
            registry.table("Note").unwrap().create().sql(),
            "CREATE TABLE IF NOT EXISTS \"Note\" (\"id\" INTEGER PRIMARY KEY, \"body\" TEXT(40))"
        );
    }

    #[test]
    fn drop_sql() {
        let registry = registry();
        assert_eq!(
            person(&registry).drop().sql(),
            "DROP TABLE IF EXISTS \"Person\""
        );
    }

    #[test]
    fn select_where_order_limit_sql() {
        let registry = registry();
        let builder = person(&registry)
            .select(&["name", "salary"])
            .unwrap()
            .filter(|c| c.equals("id", 1))
            .unwrap()
            .order_by(&[("dob", Order::Asc), ("id", Order::Asc)])
            .unwrap()
            .limit(1);
        assert_eq!(
            builder.sql(),
            "SELECT \"name\",\"salary\" FROM \"Person\" WHERE \"id\" = 1 \
             ORDER BY \"dob\" ASC, \"id\" ASC LIMIT 1"
        );
    }

    #[test]
    fn select_wraps_datetime_columns() {
        let registry = registry();
        let builder = person(&registry).select(&["name", "dob"]).unwrap();
        assert_eq!(
            builder.sql(),
            "SELECT \"name\",datetime(\"dob\",'unixepoch') AS \"dob\" FROM \"Person\""
        );
    }

    #[test]
    fn select_unknown_column_fails() {
        let registry = registry();
        assert!(person(&registry).select(&["ghost"]).is_err());
    }

    #[test]
    fn single_appends_limit_one() {
        let registry = registry();
        let builder = person(&registry)
            .single(&["name"])
            .unwrap()
            .filter(|c| c.equals("id", 1))
            .unwrap();
        assert_eq!(
            builder.sql(),
            "SELECT \"name\" FROM \"Person\" WHERE \"id\" = 1 LIMIT 1"
        );
    }

    #[test]
    fn single_keeps_explicit_limit() {
        let registry = registry();
        let builder = person(&registry).single(&["name"]).unwrap().limit(5);
        assert_eq!(builder.sql(), "SELECT \"name\" FROM \"Person\" LIMIT 5");
    }

    #[test]
    fn count_and_any_compile_to_same_sql() {
        let registry = registry();
        let table = person(&registry);
        let count = table.count().filter(|c| c.equals("id", 1)).unwrap();
        let any = table.any().filter(|c| c.equals("id", 1)).unwrap();
        let expected = "SELECT COUNT(*) as count FROM \"Person\" WHERE \"id\" = 1";
        assert_eq!(count.sql(), expected);
        assert_eq!(any.sql(), expected);
    }

    #[test]
    fn insert_sql() {
        let registry = registry();
        let stmt = person(&registry)
            .insert(&Record::new().set("id", 1).set("name", "Foo"))
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO \"Person\" (\"id\",\"name\") VALUES (1,'Foo')"
        );
    }

    #[test]
    fn upsert_sql() {
        let registry = registry();
        let stmt = person(&registry)
            .upsert(&Record::new().set("id", 1).set("name", "Foo"))
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT OR REPLACE INTO \"Person\" (\"id\",\"name\") VALUES (1,'Foo')"
        );
    }

    #[test]
    fn insert_encodes_typed_values() {
        let registry = registry();
        let dob = NaiveDate::from_ymd_opt(1990, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let stmt = person(&registry)
            .insert(
                &Record::new()
                    .set("id", 1)
                    .set("dob", dob)
                    .set("married", true)
                    .set("salary", Decimal::new(15050, 2)),
            )
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO \"Person\" (\"id\",\"dob\",\"married\",\"salary\") \
             VALUES (1,strftime('%s', '1990-05-01 12:30:00'),1,15050)"
        );
    }

    #[test]
    fn insert_many_sql() {
        let registry = registry();
        let stmt = person(&registry)
            .insert_many(&[
                Record::new().set("id", 1).set("name", "Foo"),
                Record::new().set("id", 2).set("name", "Bar"),
                Record::new().set("id", 3).set("name", "Meh"),
            ])
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO \"Person\" (\"id\",\"name\") \
             SELECT 1 AS \"id\",'Foo' AS \"name\" \
             UNION ALL SELECT 2,'Bar' UNION ALL SELECT 3,'Meh'"
        );
    }

    #[test]
    fn insert_many_missing_field_becomes_null() {
        let registry = registry();
        let stmt = person(&registry)
            .insert_many(&[
                Record::new().set("id", 1).set("name", "Foo"),
                Record::new().set("id", 2),
            ])
            .unwrap();
        assert!(stmt.sql().ends_with("UNION ALL SELECT 2,null"));
    }

    #[test]
    fn insert_many_empty_batch_fails() {
        let registry = registry();
        let err = person(&registry).insert_many(&[]).unwrap_err();
        assert!(err.is_empty_batch());
    }

    #[test]
    fn update_sql() {
        let registry = registry();
        let builder = person(&registry)
            .update(&Record::new().set("id", 1).set("name", "Foo"))
            .unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE \"Person\" SET \"id\" = 1, \"name\" = 'Foo'"
        );
        let filtered = builder.filter(|c| c.equals("age", 28)).unwrap();
        assert_eq!(
            filtered.sql(),
            "UPDATE \"Person\" SET \"id\" = 1, \"name\" = 'Foo' WHERE \"age\" = 28"
        );
    }

    #[test]
    fn delete_sql() {
        let registry = registry();
        assert_eq!(person(&registry).delete().sql(), "DELETE FROM \"Person\"");
        let filtered = person(&registry)
            .delete()
            .filter(|c| c.equals("age", 28))
            .unwrap();
        assert_eq!(filtered.sql(), "DELETE FROM \"Person\" WHERE \"age\" = 28");
    }

    #[test]
    fn filter_twice_fails() {
        let registry = registry();
        let err = person(&registry)
            .select_all()
            .filter(|c| c.equals("id", 1))
            .unwrap()
            .filter(|c| c.equals("id", 2))
            .unwrap_err();
        assert!(matches!(err, LiteError::Validation(_)));
    }

    // ==================== Execution round trips ====================

    #[tokio::test]
    async fn fetch_all_decodes_typed_columns() {
        let registry = registry();
        let driver = MockDriver::with_rows(vec![
            Row::new()
                .with("id", 1)
                .with("dob", "1990-05-01 12:30:00")
                .with("married", 1)
                .with("salary", 15050),
        ]);
        let rows = person(&registry)
            .select_all()
            .fetch_all(&driver)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("married"), Some(&Value::Bool(true)));
        assert_eq!(
            rows[0].get("salary"),
            Some(&Value::Money(Decimal::new(15050, 2)))
        );
        let expected_dob = NaiveDate::from_ymd_opt(1990, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(rows[0].get("dob"), Some(&Value::DateTime(expected_dob)));
    }

    #[tokio::test]
    async fn empty_result_contracts() {
        let registry = registry();
        let driver = MockDriver::default();
        let table = person(&registry);

        let rows = table.select_all().fetch_all(&driver).await.unwrap();
        assert!(rows.is_empty());

        let row = table.single_all().fetch_one(&driver).await.unwrap();
        assert!(row.is_none());

        let count = table.count().fetch_count(&driver).await.unwrap();
        assert_eq!(count, 0);

        let exists = table.any().fetch_exists(&driver).await.unwrap();
        assert!(!exists);
    }

    #[tokio::test]
    async fn count_reads_scalar() {
        let registry = registry();
        let driver = MockDriver::with_rows(vec![Row::new().with("count", 3)]);
        let table = person(&registry);
        assert_eq!(table.count().fetch_count(&driver).await.unwrap(), 3);
        assert!(table.any().fetch_exists(&driver).await.unwrap());
    }

    #[tokio::test]
    async fn execute_routes_by_kind() {
        let registry = registry();
        let table = person(&registry);

        let driver = MockDriver::default();
        let outcome = execute(&table.create(), &driver).await.unwrap();
        assert_eq!(
            outcome.write().unwrap(),
            ExecResult {
                insert_id: 1,
                rows_affected: 1
            }
        );

        let driver = MockDriver::with_rows(vec![Row::new().with("count", 2)]);
        let outcome = execute(&table.count().build(), &driver).await.unwrap();
        assert_eq!(outcome.count().unwrap(), 2);

        let driver = MockDriver::with_rows(vec![Row::new().with("count", 0)]);
        let outcome = execute(&table.any().build(), &driver).await.unwrap();
        assert!(!outcome.boolean().unwrap());

        let driver = MockDriver::default();
        let outcome = execute(&table.select_all().build(), &driver).await.unwrap();
        assert_eq!(outcome, Outcome::Rows(Vec::new()));
    }

    #[tokio::test]
    async fn join_fetch_projects_rows() {
        let registry = registry();
        let driver = MockDriver::with_rows(vec![
            Row::new()
                .with("self___id", 1)
                .with("addr___address", "X")
                .with("role___role", "Admin"),
        ]);

        let mapped = person(&registry)
            .join(&registry)
            .with("addr", "Address")
            .unwrap()
            .with("role", "Role")
            .unwrap()
            .on(("self", "id"), ("role", "id"))
            .unwrap()
            .on(("self", "id"), ("addr", "id"))
            .unwrap()
            .map(
                Projection::new().field("id", "self.id").nest(
                    "attr",
                    Projection::new()
                        .field("address", "addr.address")
                        .field("role", "role.role"),
                ),
            )
            .unwrap()
            .fetch_all(&driver)
            .await
            .unwrap();

        assert_eq!(mapped.len(), 1);
        assert_eq!(
            mapped[0].get("id").and_then(Mapped::value),
            Some(&Value::Integer(1))
        );
        let attr = mapped[0].get("attr").unwrap();
        assert_eq!(
            attr.get("address").and_then(Mapped::value),
            Some(&Value::Text("X".into()))
        );
        assert_eq!(
            attr.get("role").and_then(Mapped::value),
            Some(&Value::Text("Admin".into()))
        );
    }

    #[tokio::test]
    async fn dump_sql_renders_raw_values() {
        let registry = registry();
        let driver = MockDriver::with_rows(vec![
            Row::new()
                .with("id", 1)
                .with("name", "O'Brien")
                .with("dob", 641565000)
                .with("age", 35)
                .with("married", 1)
                .with("salary", 15050),
        ]);
        let dump = person(&registry).dump_sql(&driver).await.unwrap();
        assert_eq!(
            dump,
            "INSERT INTO \"Person\" (\"id\",\"name\",\"dob\",\"age\",\"married\",\"salary\") \
             VALUES (1,'O''Brien',641565000,35,1,15050);"
        );
    }

    #[tokio::test]
    async fn dump_sql_empty_table_dumps_nothing() {
        let registry = registry();
        let driver = MockDriver::default();
        assert_eq!(person(&registry).dump_sql(&driver).await.unwrap(), "");
    }

    #[tokio::test]
    async fn backup_concatenates_non_empty_tables() {
        let registry = registry();
        let driver = MockDriver::with_rows(vec![Row::new().with("id", 1)]);
        let backup = backup_sql(&registry, &driver).await.unwrap();
        // every table replays the same canned row here; three INSERTs total
        assert_eq!(backup.matches("INSERT INTO").count(), 3);
        assert!(backup.contains("INSERT INTO \"Person\""));
        assert!(backup.contains("INSERT INTO \"Role\""));
    }

    #[tokio::test]
    async fn recorded_sql_matches_builder_text() {
        let registry = registry();
        let driver = MockDriver::default();
        let table = person(&registry);

        table
            .select(&["name", "salary"])
            .unwrap()
            .filter(|c| c.equals("id", 1))
            .unwrap()
            .fetch_all(&driver)
            .await
            .unwrap();
        table.delete().execute(&driver).await.unwrap();

        assert_eq!(
            driver.seen(),
            vec![
                "SELECT \"name\",\"salary\" FROM \"Person\" WHERE \"id\" = 1".to_string(),
                "DELETE FROM \"Person\"".to_string(),
            ]
        );
    }
}
