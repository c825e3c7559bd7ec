//! Join construction: aliased tables, equality edges, and FROM/JOIN/ON
//! emission.
//!
//! A join starts from a root table (bound to the implicit `self` alias),
//! binds further tables by alias through the schema registry, and collects
//! pairwise equality edges. Edges are processed strictly in declaration
//! order: the first edge opens the FROM clause and the first JOIN; each
//! later edge introduces a JOIN for any side not yet registered, and
//! otherwise appends an `AND` condition to the most recently opened join
//! block. An edge referencing only unregistered aliases has no JOIN to
//! attach to and is rejected before any SQL is produced.

use std::sync::Arc;

use crate::condition::Condition;
use crate::driver::Driver;
use crate::error::{LiteError, LiteResult};
use crate::mapper::{Mapped, Projection};
use crate::schema::{AliasMap, SchemaRegistry, TableSchema};
use crate::statement::{Clauses, Order, Statement};
use crate::value::{qualify, quote_ident};

/// The implicit alias of the join's root table.
pub const SELF_ALIAS: &str = "self";

/// One side of a join edge: a column on an aliased table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub alias: String,
    pub column: String,
}

impl FieldRef {
    fn render(&self) -> String {
        qualify(Some(&self.alias), &self.column)
    }
}

/// A pairwise equality between two aliased columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinEdge {
    pub left: FieldRef,
    pub right: FieldRef,
}

/// Builder accumulating aliased tables and equality edges for one join
/// statement.
#[derive(Debug)]
pub struct JoinBuilder<'a> {
    registry: &'a SchemaRegistry,
    aliases: AliasMap,
    edges: Vec<JoinEdge>,
}

impl<'a> JoinBuilder<'a> {
    pub(crate) fn new(root: Arc<TableSchema>, registry: &'a SchemaRegistry) -> Self {
        let mut aliases = AliasMap::new();
        // the root binding cannot collide in a fresh map
        let _ = aliases.bind(SELF_ALIAS, root);
        Self {
            registry,
            aliases,
            edges: Vec::new(),
        }
    }

    /// Bind a registered table under an alias.
    pub fn with(mut self, alias: &str, table: &str) -> LiteResult<Self> {
        if alias == SELF_ALIAS {
            return Err(LiteError::validation(format!(
                "alias '{SELF_ALIAS}' is reserved for the root table"
            )));
        }
        let schema = self.registry.get(table)?;
        self.aliases.bind(alias, schema)?;
        Ok(self)
    }

    /// Declare an equality edge between two aliased columns.
    ///
    /// Both sides must reference bound aliases and existing columns.
    pub fn on(mut self, left: (&str, &str), right: (&str, &str)) -> LiteResult<Self> {
        let edge = JoinEdge {
            left: self.field_ref(left)?,
            right: self.field_ref(right)?,
        };
        self.edges.push(edge);
        Ok(self)
    }

    fn field_ref(&self, (alias, column): (&str, &str)) -> LiteResult<FieldRef> {
        let schema = self.aliases.require(alias)?;
        schema.require_column(column)?;
        Ok(FieldRef {
            alias: alias.to_string(),
            column: column.to_string(),
        })
    }

    /// Attach the projection template and produce the joined read builder.
    ///
    /// The template's leaves drive the SELECT list; its shape is the shape
    /// of every mapped result row.
    pub fn map(self, projection: Projection) -> LiteResult<JoinSelect> {
        if self.edges.is_empty() {
            return Err(LiteError::MalformedJoin(
                "no join edges declared".to_string(),
            ));
        }
        let select_list = self.build_select_list(&projection)?;
        let join_clause = self.render_joins()?;
        let base_sql = format!("SELECT {select_list} {join_clause}");
        Ok(JoinSelect {
            base_sql,
            aliases: self.aliases,
            projection,
            clauses: Clauses::default(),
        })
    }

    /// Collect the deduplicated SELECT list from the template leaves.
    fn build_select_list(&self, projection: &Projection) -> LiteResult<String> {
        let mut selected: Vec<String> = Vec::new();
        for leaf in projection.leaves() {
            let Some((alias, column)) = leaf.split_once('.') else {
                return Err(LiteError::MissingAliasContext(format!(
                    "projection leaf '{leaf}' must be written 'alias.column'"
                )));
            };
            let schema = self.aliases.require(alias)?;
            let col = schema.require_column(column)?;
            let expr = col.select_expr_aliased(alias);
            if !selected.contains(&expr) {
                selected.push(expr);
            }
        }
        if selected.is_empty() {
            return Err(LiteError::validation(
                "projection template selects no columns",
            ));
        }
        Ok(selected.join(","))
    }

    /// Emit the ordered FROM/JOIN/ON clause from the declared edges.
    fn render_joins(&self) -> LiteResult<String> {
        let mut sql = String::new();
        let mut registered: Vec<&str> = Vec::new();

        for edge in &self.edges {
            let mut opened_join = false;
            if registered.is_empty() {
                sql.push_str(&format!(
                    "FROM {} AS {}",
                    quote_ident(self.table_name(&edge.left.alias)?),
                    quote_ident(&edge.left.alias)
                ));
                registered.push(&edge.left.alias);
                self.push_join(&mut sql, &mut registered, &edge.right.alias)?;
                opened_join = true;
            } else {
                let left_known = registered.contains(&edge.left.alias.as_str());
                let right_known = registered.contains(&edge.right.alias.as_str());
                if !left_known && !right_known {
                    return Err(LiteError::MalformedJoin(format!(
                        "edge {} = {} references no previously joined alias",
                        edge.left.render(),
                        edge.right.render()
                    )));
                }
                if !left_known {
                    self.push_join(&mut sql, &mut registered, &edge.left.alias)?;
                    opened_join = true;
                }
                if !right_known {
                    self.push_join(&mut sql, &mut registered, &edge.right.alias)?;
                    opened_join = true;
                }
            }

            let connector = if opened_join { "ON" } else { "AND" };
            sql.push_str(&format!(
                " {connector} {} = {}",
                edge.left.render(),
                edge.right.render()
            ));
        }

        Ok(sql)
    }

    fn push_join<'s>(
        &'s self,
        sql: &mut String,
        registered: &mut Vec<&'s str>,
        alias: &'s str,
    ) -> LiteResult<()> {
        sql.push_str(&format!(
            " JOIN {} AS {}",
            quote_ident(self.table_name(alias)?),
            quote_ident(alias)
        ));
        registered.push(alias);
        Ok(())
    }

    fn table_name(&self, alias: &str) -> LiteResult<&str> {
        Ok(self.aliases.require(alias)?.name())
    }
}

/// Read builder for a joined statement: WHERE/ORDER BY/LIMIT over aliased
/// columns, finishing into a projected result list.
#[derive(Debug, Clone)]
pub struct JoinSelect {
    base_sql: String,
    aliases: AliasMap,
    projection: Projection,
    clauses: Clauses,
}

impl JoinSelect {
    /// Attach the WHERE predicate; columns are written `alias.column`.
    /// May only be called once.
    pub fn filter<F>(mut self, f: F) -> LiteResult<Self>
    where
        F: FnOnce(Condition) -> LiteResult<Condition>,
    {
        let condition = f(Condition::for_aliases(self.aliases.clone()))?;
        self.clauses.set_where(&condition)?;
        Ok(self)
    }

    /// Attach ORDER BY keys, written `alias.column`, in declaration order.
    /// May only be called once.
    pub fn order_by(mut self, keys: &[(&str, Order)]) -> LiteResult<Self> {
        let rendered = keys
            .iter()
            .map(|(field, order)| {
                let (ident, _) = self.aliases.resolve_field(field)?;
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
        let mut sql = self.base_sql.clone();
        self.clauses.append_to(&mut sql);
        sql
    }

    /// Finish into an immutable statement.
    pub fn build(self) -> Statement {
        let sql = self.sql();
        Statement::join(sql, self.aliases, self.projection)
    }

    /// Execute, decode each alias-prefixed row, and project it through the
    /// template.
    pub async fn fetch_all(self, driver: &impl Driver) -> LiteResult<Vec<Mapped>> {
        let sql = self.sql();
        tracing::debug!(sql = %sql, "fetching joined rows");
        let rows = driver.query_rows(&sql).await?;
        rows.into_iter()
            .map(|row| {
                crate::mapper::decode_row_aliased(row, &self.aliases)
                    .map(|decoded| crate::mapper::project(&self.projection, &decoded))
            })
            .collect()
    }
}
