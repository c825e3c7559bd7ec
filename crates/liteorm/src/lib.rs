//! # liteorm
//!
//! A SQLite query-construction and result-mapping engine.
//!
//! liteorm sits between application code and a storage driver: typed,
//! structural descriptions of filters, projections, and joins go in; exact
//! SQL text comes out; flat result rows come back as decoded, typed values —
//! nested to the caller's shape for joins.
//!
//! ## Features
//!
//! - **Explicit schemas**: tables register an ordered column list through a
//!   builder; no derive magic
//! - **Predicate builder**: comparisons, pattern matching, ranges, and
//!   boolean grouping with implicit AND / explicit OR
//! - **Exact SQL text**: identifiers always double-quoted, literals encoded
//!   per column type, clauses in fixed order
//! - **Join mapping**: declared equality edges become deterministic
//!   FROM/JOIN/ON sequences; a nested projection template shapes the result
//! - **Driver-agnostic**: statements hand finished SQL to an async
//!   [`Driver`] and shape whatever rows come back
//!
//! ## Example
//!
//! ```ignore
//! use liteorm::{Record, SchemaRegistry, SqlType, TableSchema};
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register(
//!     TableSchema::builder("Person")
//!         .primary_key("id", SqlType::Integer)
//!         .column("name", SqlType::Text)
//!         .column("age", SqlType::Integer)
//!         .build()?,
//! );
//!
//! let people = registry.table("Person")?;
//! people.create().execute(&driver).await?;
//! people
//!     .insert(&Record::new().set("id", 1).set("name", "Foo"))?
//!     .execute(&driver)
//!     .await?;
//!
//! let adults = people
//!     .select_all()
//!     .filter(|c| c.greater_or_equal("age", 18))?
//!     .order_by(&[("name", liteorm::Order::Asc)])?
//!     .fetch_all(&driver)
//!     .await?;
//! ```

pub mod condition;
pub mod driver;
pub mod error;
pub mod join;
pub mod mapper;
pub mod schema;
pub mod statement;
pub mod table;
pub mod value;

pub use condition::{Condition, PredicateToken};
pub use driver::{Driver, ExecResult, Record, Row};
pub use error::{LiteError, LiteResult};
pub use join::{FieldRef, JoinBuilder, JoinEdge, JoinSelect, SELF_ALIAS};
pub use mapper::{
    Mapped, Projection, ProjectionNode, decode_row, decode_row_aliased, flatten_field, project,
};
pub use schema::{AliasMap, ColumnDescriptor, SchemaRegistry, TableSchema, TableSchemaBuilder};
pub use statement::{
    CountBuilder, Order, Outcome, ReadBuilder, Statement, StatementKind, WriteBuilder, execute,
};
pub use table::{Table, backup_sql};
pub use value::{SqlType, Value, decode, encode, encode_raw, quote_ident};
