//! Result mapping: row decoding, alias flattening, and projection.
//!
//! Joined queries select every `alias.column` the caller's projection
//! template references, renamed to the wire-safe key `alias___column` so a
//! single flat row can carry data from multiple tables. On the way out each
//! cell is decoded through the value codec, then the template is walked once
//! per row, substituting every leaf with its decoded value. The template's
//! shape is exactly the shape of the emitted result — mapping is a
//! structural copy with leaf substitution.

use crate::driver::Row;
use crate::error::LiteResult;
use crate::schema::{AliasMap, TableSchema};
use crate::value::{self, Value};

/// Separator between alias and column in flattened result keys.
pub(crate) const FLATTEN_SEPARATOR: &str = "___";

/// Rename `alias.column` to its wire-safe flattened key.
pub fn flatten_field(alias: &str, column: &str) -> String {
    format!("{alias}{FLATTEN_SEPARATOR}{column}")
}

/// One entry value in a projection template.
#[derive(Debug, Clone)]
pub enum ProjectionNode {
    /// A leaf `alias.column` reference.
    Field(String),
    /// A nested object.
    Nested(Projection),
}

/// Caller-supplied template describing the output shape of a mapped join
/// result. Leaves are `alias.column` references; nesting is arbitrary.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    entries: Vec<(String, ProjectionNode)>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf: output key backed by an `alias.column` reference.
    pub fn field(mut self, key: impl Into<String>, column_ref: impl Into<String>) -> Self {
        self.entries
            .push((key.into(), ProjectionNode::Field(column_ref.into())));
        self
    }

    /// Add a nested object under the given key.
    pub fn nest(mut self, key: impl Into<String>, child: Projection) -> Self {
        self.entries.push((key.into(), ProjectionNode::Nested(child)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ProjectionNode)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// All leaf references in template walk order.
    pub(crate) fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        for (_, node) in &self.entries {
            match node {
                ProjectionNode::Field(column_ref) => out.push(column_ref.as_str()),
                ProjectionNode::Nested(child) => child.collect_leaves(out),
            }
        }
    }
}

/// A reconstructed join result: the projection template with every leaf
/// replaced by its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Value(Value),
    Object(Vec<(String, Mapped)>),
}

impl Mapped {
    /// Get an entry of an object node by key.
    pub fn get(&self, key: &str) -> Option<&Mapped> {
        match self {
            Mapped::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Mapped::Value(_) => None,
        }
    }

    /// The leaf value, if this node is a leaf.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Mapped::Value(v) => Some(v),
            Mapped::Object(_) => None,
        }
    }

    /// Convert into a loosely-typed JSON tree.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Mapped::Value(v) => serde_json::Value::from(&v),
            Mapped::Object(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.into_json()))
                    .collect(),
            ),
        }
    }
}

/// Decode a flat single-table row: every cell whose column is present in the
/// schema goes through the value codec; unknown keys pass through untouched.
pub fn decode_row(row: Row, schema: &TableSchema) -> LiteResult<Row> {
    let cells = row
        .into_cells()
        .into_iter()
        .map(|(column, raw)| match schema.column(&column) {
            Some(col) => value::decode(col.sql_type, &column, raw).map(|v| (column, v)),
            None => Ok((column, raw)),
        })
        .collect::<LiteResult<Vec<_>>>()?;
    Ok(Row::from_cells(cells))
}

/// Decode an alias-prefixed join row: keys are matched as
/// `alias___column` against the alias map; anything that does not resolve
/// passes through untouched.
pub fn decode_row_aliased(row: Row, aliases: &AliasMap) -> LiteResult<Row> {
    let cells = row
        .into_cells()
        .into_iter()
        .map(|(key, raw)| {
            let descriptor = key.split_once(FLATTEN_SEPARATOR).and_then(|(alias, column)| {
                aliases.get(alias).and_then(|schema| schema.column(column))
            });
            match descriptor {
                Some(col) => value::decode(col.sql_type, &key, raw).map(|v| (key, v)),
                None => Ok((key, raw)),
            }
        })
        .collect::<LiteResult<Vec<_>>>()?;
    Ok(Row::from_cells(cells))
}

/// Substitute every template leaf with the corresponding decoded cell.
///
/// The output topology is exactly the template's; cells absent from the row
/// substitute as `Null`.
pub fn project(projection: &Projection, decoded: &Row) -> Mapped {
    Mapped::Object(
        projection
            .entries
            .iter()
            .map(|(key, node)| {
                let mapped = match node {
                    ProjectionNode::Field(column_ref) => {
                        let flat = match column_ref.split_once('.') {
                            Some((alias, column)) => flatten_field(alias, column),
                            None => column_ref.clone(),
                        };
                        Mapped::Value(decoded.get(&flat).cloned().unwrap_or(Value::Null))
                    }
                    ProjectionNode::Nested(child) => project(child, decoded),
                };
                (key.clone(), mapped)
            })
            .collect(),
    )
}
