//! Predicate building for WHERE clauses.
//!
//! A [`Condition`] accumulates an ordered sequence of predicate tokens:
//! rendered clauses, `OR` markers, and group parentheses. At render time two
//! adjacent clauses are joined with an implicit `AND`; `OR` and group
//! boundaries suppress it. Precedence is therefore purely left-to-right from
//! token adjacency — nested boolean logic is expressed through [`group`],
//! not operator precedence.
//!
//! ```ignore
//! table.select_all().filter(|c| {
//!     c.equals("age", 28)?
//!         .group(|c| c.equals("name", "Foo")?.or().starts_with("name", "B"))
//! })
//! ```
//!
//! [`group`]: Condition::group

use std::sync::Arc;

use crate::error::{LiteError, LiteResult};
use crate::schema::{AliasMap, TableSchema};
use crate::value::{self, SqlType, Value};

/// One entry in a predicate sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateToken {
    /// A rendered comparison, e.g. `"age" = 28`.
    Clause(String),
    Or,
    GroupOpen,
    GroupClose,
}

/// The column scope a condition builder resolves field names against.
#[derive(Debug, Clone)]
enum ConditionScope {
    /// Bare column names against one table.
    Table(Arc<TableSchema>),
    /// `alias.column` references against the tables of a join.
    Aliased(AliasMap),
}

impl ConditionScope {
    fn resolve(&self, field: &str) -> LiteResult<(String, SqlType)> {
        match self {
            ConditionScope::Table(schema) => schema.resolve_field(field),
            ConditionScope::Aliased(aliases) => aliases.resolve_field(field),
        }
    }
}

/// Builder for a WHERE predicate over one table or a set of join aliases.
///
/// Every operator call appends one clause token; unknown columns fail fast.
#[derive(Debug, Clone)]
pub struct Condition {
    scope: ConditionScope,
    tokens: Vec<PredicateToken>,
}

impl Condition {
    /// Create a builder resolving bare column names against one table.
    pub fn for_table(schema: Arc<TableSchema>) -> Self {
        Self {
            scope: ConditionScope::Table(schema),
            tokens: Vec::new(),
        }
    }

    /// Create a builder resolving `alias.column` references against a join.
    pub fn for_aliases(aliases: AliasMap) -> Self {
        Self {
            scope: ConditionScope::Aliased(aliases),
            tokens: Vec::new(),
        }
    }

    fn compare(mut self, field: &str, op: &str, value: Value) -> LiteResult<Self> {
        let (ident, ty) = self.scope.resolve(field)?;
        let literal = value::encode(ty, field, &value)?;
        self.tokens
            .push(PredicateToken::Clause(format!("{ident} {op} {literal}")));
        Ok(self)
    }

    /// `column = value`
    pub fn equals(self, field: &str, value: impl Into<Value>) -> LiteResult<Self> {
        self.compare(field, "=", value.into())
    }

    /// `column <> value`
    pub fn not_equals(self, field: &str, value: impl Into<Value>) -> LiteResult<Self> {
        self.compare(field, "<>", value.into())
    }

    /// `column > value`
    pub fn greater_than(self, field: &str, value: impl Into<Value>) -> LiteResult<Self> {
        self.compare(field, ">", value.into())
    }

    /// `column >= value`
    pub fn greater_or_equal(self, field: &str, value: impl Into<Value>) -> LiteResult<Self> {
        self.compare(field, ">=", value.into())
    }

    /// `column < value`
    pub fn less_than(self, field: &str, value: impl Into<Value>) -> LiteResult<Self> {
        self.compare(field, "<", value.into())
    }

    /// `column <= value`
    pub fn less_or_equal(self, field: &str, value: impl Into<Value>) -> LiteResult<Self> {
        self.compare(field, "<=", value.into())
    }

    /// `column IN (v1, v2, ...)`
    pub fn in_list<I, V>(mut self, field: &str, values: I) -> LiteResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let (ident, ty) = self.scope.resolve(field)?;
        let literals = values
            .into_iter()
            .map(|v| value::encode(ty, field, &v.into()))
            .collect::<LiteResult<Vec<_>>>()?;
        self.tokens.push(PredicateToken::Clause(format!(
            "{ident} IN ({})",
            literals.join(", ")
        )));
        Ok(self)
    }

    /// `column BETWEEN from AND to`
    pub fn between(
        mut self,
        field: &str,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> LiteResult<Self> {
        let (ident, ty) = self.scope.resolve(field)?;
        let from = value::encode(ty, field, &from.into())?;
        let to = value::encode(ty, field, &to.into())?;
        self.tokens.push(PredicateToken::Clause(format!(
            "{ident} BETWEEN {from} AND {to}"
        )));
        Ok(self)
    }

    /// `column LIKE 'pattern'`
    pub fn contains(self, field: &str, pattern: &str) -> LiteResult<Self> {
        self.like(field, pattern, "", "")
    }

    /// `column LIKE 'pattern%'`
    pub fn starts_with(self, field: &str, pattern: &str) -> LiteResult<Self> {
        self.like(field, pattern, "", "%")
    }

    /// `column LIKE '%pattern'`
    pub fn ends_with(self, field: &str, pattern: &str) -> LiteResult<Self> {
        self.like(field, pattern, "%", "")
    }

    fn like(mut self, field: &str, pattern: &str, prefix: &str, suffix: &str) -> LiteResult<Self> {
        let (ident, _) = self.scope.resolve(field)?;
        // patterns go through the same quote escaping as any other literal
        let escaped = value::escape_text(pattern);
        self.tokens.push(PredicateToken::Clause(format!(
            "{ident} LIKE '{prefix}{escaped}{suffix}'"
        )));
        Ok(self)
    }

    /// Join the previous and next clause with OR instead of the implicit AND.
    pub fn or(mut self) -> Self {
        self.tokens.push(PredicateToken::Or);
        self
    }

    /// Wrap the clauses appended by `f` in parentheses.
    pub fn group<F>(mut self, f: F) -> LiteResult<Self>
    where
        F: FnOnce(Condition) -> LiteResult<Condition>,
    {
        self.tokens.push(PredicateToken::GroupOpen);
        let mut built = f(self)?;
        built.tokens.push(PredicateToken::GroupClose);
        Ok(built)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The accumulated token sequence.
    pub fn tokens(&self) -> &[PredicateToken] {
        &self.tokens
    }

    /// Render the predicate, inserting the implicit ANDs.
    ///
    /// Fails on token sequences that cannot form well-formed SQL: unbalanced
    /// groups, empty groups, and dangling OR markers.
    pub fn render(&self) -> LiteResult<String> {
        self.validate()?;

        let mut parts: Vec<&str> = Vec::with_capacity(self.tokens.len() * 2);
        for (idx, token) in self.tokens.iter().enumerate() {
            parts.push(match token {
                PredicateToken::Clause(s) => s,
                PredicateToken::Or => "OR",
                PredicateToken::GroupOpen => "(",
                PredicateToken::GroupClose => ")",
            });
            if let Some(next) = self.tokens.get(idx + 1) {
                let left_open = matches!(token, PredicateToken::Or | PredicateToken::GroupOpen);
                let right_open = matches!(next, PredicateToken::Or | PredicateToken::GroupClose);
                if !left_open && !right_open {
                    parts.push("AND");
                }
            }
        }
        Ok(parts.join(" "))
    }

    fn validate(&self) -> LiteResult<()> {
        let mut depth = 0i32;
        for (idx, token) in self.tokens.iter().enumerate() {
            match token {
                PredicateToken::GroupOpen => {
                    depth += 1;
                    if matches!(
                        self.tokens.get(idx + 1),
                        Some(PredicateToken::GroupClose)
                    ) {
                        return Err(LiteError::UnbalancedGroup(
                            "empty group renders no clause".to_string(),
                        ));
                    }
                }
                PredicateToken::GroupClose => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(LiteError::UnbalancedGroup(
                            "group closed without matching open".to_string(),
                        ));
                    }
                }
                PredicateToken::Or => {
                    let right_ok = matches!(
                        self.tokens.get(idx + 1),
                        Some(PredicateToken::Clause(_)) | Some(PredicateToken::GroupOpen)
                    );
                    let left_ok = idx > 0
                        && matches!(
                            self.tokens.get(idx - 1),
                            Some(PredicateToken::Clause(_)) | Some(PredicateToken::GroupClose)
                        );
                    if !left_ok || !right_ok {
                        return Err(LiteError::UnbalancedGroup(
                            "OR marker without clauses on both sides".to_string(),
                        ));
                    }
                }
                PredicateToken::Clause(_) => {}
            }
        }
        if depth != 0 {
            return Err(LiteError::UnbalancedGroup(format!(
                "{depth} group(s) left open"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlType;

    fn person() -> Arc<TableSchema> {
        Arc::new(
            TableSchema::builder("Person")
                .primary_key("id", SqlType::Integer)
                .column("name", SqlType::Text)
                .column("age", SqlType::Integer)
                .column("married", SqlType::Boolean)
                .build()
                .unwrap(),
        )
    }

    fn cond() -> Condition {
        Condition::for_table(person())
    }

    #[test]
    fn adjacent_clauses_join_with_and() {
        let c = cond().equals("id", 1).unwrap().equals("age", 2).unwrap();
        assert_eq!(c.render().unwrap(), "\"id\" = 1 AND \"age\" = 2");
    }

    #[test]
    fn or_marker_replaces_and() {
        let c = cond()
            .equals("id", 1)
            .unwrap()
            .or()
            .equals("age", 2)
            .unwrap();
        assert_eq!(c.render().unwrap(), "\"id\" = 1 OR \"age\" = 2");
    }

    #[test]
    fn group_renders_parenthesized() {
        let c = cond()
            .group(|c| c.equals("id", 1)?.or().equals("age", 2))
            .unwrap();
        assert_eq!(c.render().unwrap(), "( \"id\" = 1 OR \"age\" = 2 )");
    }

    #[test]
    fn group_composes_with_top_level_and() {
        let c = cond()
            .equals("married", true)
            .unwrap()
            .group(|c| c.equals("id", 1)?.or().equals("age", 2))
            .unwrap();
        assert_eq!(
            c.render().unwrap(),
            "\"married\" = 1 AND ( \"id\" = 1 OR \"age\" = 2 )"
        );
    }

    #[test]
    fn nested_groups() {
        let c = cond()
            .group(|c| {
                c.equals("id", 1)?
                    .or()
                    .group(|c| c.equals("age", 2)?.equals("married", false))
            })
            .unwrap();
        assert_eq!(
            c.render().unwrap(),
            "( \"id\" = 1 OR ( \"age\" = 2 AND \"married\" = 0 ) )"
        );
    }

    #[test]
    fn comparison_operators() {
        let c = cond()
            .not_equals("id", 1)
            .unwrap()
            .greater_than("age", 10)
            .unwrap()
            .greater_or_equal("age", 11)
            .unwrap()
            .less_than("age", 90)
            .unwrap()
            .less_or_equal("age", 89)
            .unwrap();
        assert_eq!(
            c.render().unwrap(),
            "\"id\" <> 1 AND \"age\" > 10 AND \"age\" >= 11 AND \"age\" < 90 AND \"age\" <= 89"
        );
    }

    #[test]
    fn in_list_renders_values() {
        let c = cond().in_list("id", [1, 2, 3]).unwrap();
        assert_eq!(c.render().unwrap(), "\"id\" IN (1, 2, 3)");
    }

    #[test]
    fn between_renders_bounds() {
        let c = cond().between("age", 18, 65).unwrap();
        assert_eq!(c.render().unwrap(), "\"age\" BETWEEN 18 AND 65");
    }

    #[test]
    fn pattern_operators() {
        let c = cond().contains("name", "oo").unwrap();
        assert_eq!(c.render().unwrap(), "\"name\" LIKE 'oo'");
        let c = cond().starts_with("name", "Fo").unwrap();
        assert_eq!(c.render().unwrap(), "\"name\" LIKE 'Fo%'");
        let c = cond().ends_with("name", "oo").unwrap();
        assert_eq!(c.render().unwrap(), "\"name\" LIKE '%oo'");
    }

    #[test]
    fn pattern_escapes_quotes() {
        let c = cond().contains("name", "O'Brien").unwrap();
        assert_eq!(c.render().unwrap(), "\"name\" LIKE 'O''Brien'");
    }

    #[test]
    fn field_reference_comparison() {
        let c = cond().equals("id", Value::field("age")).unwrap();
        assert_eq!(c.render().unwrap(), "\"id\" = \"age\"");
    }

    #[test]
    fn unknown_column_fails_fast() {
        let err = cond().equals("salary", 1).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[test]
    fn aliased_scope_qualifies_columns() {
        let mut aliases = AliasMap::new();
        aliases.bind("self", person()).unwrap();
        let c = Condition::for_aliases(aliases)
            .starts_with("self.name", "foo")
            .unwrap();
        assert_eq!(c.render().unwrap(), "\"self\".\"name\" LIKE 'foo%'");
    }

    #[test]
    fn dangling_or_is_rejected() {
        let c = cond().equals("id", 1).unwrap().or();
        assert!(matches!(
            c.render().unwrap_err(),
            LiteError::UnbalancedGroup(_)
        ));
    }

    #[test]
    fn leading_or_is_rejected() {
        let c = cond().or().equals("id", 1).unwrap();
        assert!(c.render().is_err());
    }

    #[test]
    fn unbalanced_group_is_rejected() {
        let mut c = cond().equals("id", 1).unwrap();
        c.tokens.insert(0, PredicateToken::GroupOpen);
        assert!(matches!(
            c.render().unwrap_err(),
            LiteError::UnbalancedGroup(_)
        ));
    }

    #[test]
    fn stray_close_is_rejected() {
        let mut c = cond().equals("id", 1).unwrap();
        c.tokens.push(PredicateToken::GroupClose);
        assert!(c.render().is_err());
    }

    #[test]
    fn empty_group_is_rejected() {
        let c = cond().group(Ok).unwrap();
        assert!(matches!(
            c.render().unwrap_err(),
            LiteError::UnbalancedGroup(_)
        ));
    }

    #[test]
    fn empty_condition_renders_empty() {
        assert!(cond().is_empty());
        assert_eq!(cond().render().unwrap(), "");
    }
}
