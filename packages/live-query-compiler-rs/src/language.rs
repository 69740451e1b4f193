//! Constructors for [`Expression`] trees.
//!
//! ```
//! use live_query_compiler_rs::language::*;
//!
//! let query = select(vec![table_path("users", "id"), table_path("users", "name")])
//!     .from_source(source("users"))
//!     .filter(and(vec![
//!         gt(table_path("users", "age"), data(18)),
//!         like(table_path("users", "name"), data("a%")),
//!     ]))
//!     .order_by(order_desc(table_path("users", "age")))
//!     .limit(10);
//! # let _ = query;
//! ```

use serde_json::Value;

use crate::model::{
    Comparison, ComparisonOp, Condition, ConditionOp, Data, Expression, Order, Path, Select,
    Source, Union,
};

pub fn data(value: impl Into<Value>) -> Expression {
    Expression::Data(Data {
        value: value.into(),
        alias: None,
    })
}

pub fn path(column: impl Into<String>) -> Expression {
    Expression::Path(Path {
        table: None,
        column: column.into(),
        alias: None,
    })
}

pub fn table_path(table: impl Into<String>, column: impl Into<String>) -> Expression {
    Expression::Path(Path {
        table: Some(table.into()),
        column: column.into(),
        alias: None,
    })
}

pub fn source(table: impl Into<String>) -> Source {
    Source {
        table: table.into(),
        alias: None,
    }
}

pub fn aliased_source(table: impl Into<String>, alias: impl Into<String>) -> Source {
    Source {
        table: table.into(),
        alias: Some(alias.into()),
    }
}

pub fn comparison(op: ComparisonOp, operands: Vec<Expression>) -> Expression {
    Expression::Comparison(Comparison {
        op,
        operands,
        alias: None,
    })
}

pub fn eq(left: Expression, right: Expression) -> Expression {
    comparison(ComparisonOp::Eq, vec![left, right])
}

pub fn not(left: Expression, right: Expression) -> Expression {
    comparison(ComparisonOp::Not, vec![left, right])
}

pub fn gt(left: Expression, right: Expression) -> Expression {
    comparison(ComparisonOp::Gt, vec![left, right])
}

pub fn gte(left: Expression, right: Expression) -> Expression {
    comparison(ComparisonOp::Gte, vec![left, right])
}

pub fn lt(left: Expression, right: Expression) -> Expression {
    comparison(ComparisonOp::Lt, vec![left, right])
}

pub fn lte(left: Expression, right: Expression) -> Expression {
    comparison(ComparisonOp::Lte, vec![left, right])
}

pub fn like(value: Expression, pattern: Expression) -> Expression {
    comparison(ComparisonOp::Like, vec![value, pattern])
}

pub fn in_list(target: Expression, values: Vec<Expression>) -> Expression {
    let mut operands = Vec::with_capacity(values.len() + 1);
    operands.push(target);
    operands.extend(values);
    comparison(ComparisonOp::In, operands)
}

pub fn between(value: Expression, low: Expression, high: Expression) -> Expression {
    comparison(ComparisonOp::Between, vec![value, low, high])
}

pub fn exists(query: Select) -> Expression {
    comparison(ComparisonOp::Exists, vec![query.into()])
}

pub fn is_null(value: Expression) -> Expression {
    comparison(ComparisonOp::Null, vec![value])
}

pub fn and(operands: Vec<Expression>) -> Expression {
    Expression::Condition(Condition {
        op: ConditionOp::And,
        operands,
        alias: None,
    })
}

pub fn or(operands: Vec<Expression>) -> Expression {
    Expression::Condition(Condition {
        op: ConditionOp::Or,
        operands,
        alias: None,
    })
}

pub fn order(expr: Expression) -> Order {
    Order {
        expr: Box::new(expr),
        descending: false,
    }
}

pub fn order_desc(expr: Expression) -> Order {
    Order {
        expr: Box::new(expr),
        descending: true,
    }
}

pub fn select(returns: Vec<Expression>) -> Select {
    Select {
        returns,
        ..Select::default()
    }
}

pub fn union(selects: Vec<Select>) -> Expression {
    Expression::Union(Union { selects })
}

pub fn union_all(selects: Vec<Select>) -> Expression {
    Expression::UnionAll(Union { selects })
}

impl Select {
    pub fn from_source(mut self, source: Source) -> Self {
        self.from.push(source);
        self
    }

    /// Sets the `where` clause, replacing any previous one.
    pub fn filter(mut self, condition: Expression) -> Self {
        self.filter = Some(condition);
        self
    }

    pub fn group_by(mut self, expr: Expression) -> Self {
        self.group.push(expr);
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_expression(self) -> Expression {
        self.into()
    }
}
