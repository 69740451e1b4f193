use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable query tree. Building or cloning a node never touches storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Expression {
    #[serde(rename = "data")]
    Data(Data),
    #[serde(rename = "path")]
    Path(Path),
    #[serde(rename = "comparison")]
    Comparison(Comparison),
    #[serde(rename = "condition")]
    Condition(Condition),
    #[serde(rename = "order")]
    Order(Order),
    #[serde(rename = "select")]
    Select(Box<Select>),
    #[serde(rename = "union")]
    Union(Union),
    #[serde(rename = "union_all")]
    UnionAll(Union),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Data {
    pub value: Value,
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Path {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub column: String,
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    Eq,
    Not,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Between,
    Like,
    Exists,
    Null,
}

impl ComparisonOp {
    pub fn name(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "eq",
            ComparisonOp::Not => "not",
            ComparisonOp::Gt => "gt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Lte => "lte",
            ComparisonOp::In => "in",
            ComparisonOp::Between => "between",
            ComparisonOp::Like => "like",
            ComparisonOp::Exists => "exists",
            ComparisonOp::Null => "null",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    pub op: ComparisonOp,
    pub operands: Vec<Expression>,
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOp {
    And,
    Or,
}

impl ConditionOp {
    pub fn keyword(self) -> &'static str {
        match self {
            ConditionOp::And => "and",
            ConditionOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub op: ConditionOp,
    pub operands: Vec<Expression>,
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub expr: Box<Expression>,
    #[serde(default)]
    pub descending: bool,
}

/// A relation in a `from` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Source {
    pub table: String,
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Source {
    /// Name other clauses use to reference this relation.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Select {
    #[serde(default)]
    pub returns: Vec<Expression>,
    #[serde(default)]
    pub from: Vec<Source>,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Union {
    pub selects: Vec<Select>,
}

impl Expression {
    /// Returns a copy of this node carrying `alias`. The receiver is left untouched.
    ///
    /// Nodes that cannot produce a value (orders, unions) are returned unchanged.
    pub fn aliased(&self, alias: impl Into<String>) -> Expression {
        let alias = Some(alias.into());
        let mut node = self.clone();
        match &mut node {
            Expression::Data(data) => data.alias = alias,
            Expression::Path(path) => path.alias = alias,
            Expression::Comparison(comparison) => comparison.alias = alias,
            Expression::Condition(condition) => condition.alias = alias,
            Expression::Select(select) => select.alias = alias,
            Expression::Order(_) | Expression::Union(_) | Expression::UnionAll(_) => {
                trace!("alias {alias:?} ignored on {} node", self.kind());
            }
        }
        node
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Expression::Data(data) => data.alias.as_deref(),
            Expression::Path(path) => path.alias.as_deref(),
            Expression::Comparison(comparison) => comparison.alias.as_deref(),
            Expression::Condition(condition) => condition.alias.as_deref(),
            Expression::Select(select) => select.alias.as_deref(),
            Expression::Order(_) | Expression::Union(_) | Expression::UnionAll(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Data(_) => "data",
            Expression::Path(_) => "path",
            Expression::Comparison(_) => "comparison",
            Expression::Condition(_) => "condition",
            Expression::Order(_) => "order",
            Expression::Select(_) => "select",
            Expression::Union(_) => "union",
            Expression::UnionAll(_) => "union_all",
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Select> for Expression {
    fn from(select: Select) -> Self {
        Expression::Select(Box::new(select))
    }
}

impl From<Path> for Expression {
    fn from(path: Path) -> Self {
        Expression::Path(path)
    }
}

impl From<Data> for Expression {
    fn from(data: Data) -> Self {
        Expression::Data(data)
    }
}

/// SQL text plus the values bound to its `$n` placeholders, in placeholder order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Fetch and membership SQL for one live query, both free of placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationQueries {
    #[serde(rename = "fetchQuery")]
    pub fetch_query: String,
    #[serde(rename = "liveQuery")]
    pub live_query: String,
}
