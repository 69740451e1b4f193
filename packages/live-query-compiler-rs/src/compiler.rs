use crate::model::{
    Comparison, ComparisonOp, CompiledQuery, Condition, Data, Expression, Order, Path,
    RegistrationQueries, Select, Source, Union,
};
use crate::{CompilerError, CompilerResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How non-inline literals (strings, null, arrays, objects) are rendered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LiteralMode {
    /// Append to the parameter list and render a `$n` placeholder.
    #[default]
    Bind,
    /// Render as an escaped SQL literal. For SQL that is stored and later
    /// executed by server-side code, where nothing can be bound.
    Inline,
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub literals: LiteralMode,
}

/// Renders [`Expression`] trees to SQL.
///
/// The parameter list belongs to the instance: compiling several trees with
/// one compiler keeps numbering placeholders where the previous call stopped,
/// and every [`CompiledQuery`] it returns carries the full list so positions
/// stay valid. Use a fresh instance (or [`compile`]) for independent numbering.
#[derive(Debug, Default)]
pub struct QueryCompiler {
    options: CompileOptions,
    params: Vec<Value>,
}

impl QueryCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            params: Vec::new(),
        }
    }

    pub fn inline() -> Self {
        Self::new(CompileOptions {
            literals: LiteralMode::Inline,
        })
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Compiles one tree. On error the parameter list is restored to its
    /// state before the call and no SQL is produced.
    pub fn compile(&mut self, expr: &Expression) -> CompilerResult<CompiledQuery> {
        let checkpoint = self.params.len();
        match self.render(expr) {
            Ok(sql) => {
                trace!("compiled {} node: {sql}", expr.kind());
                Ok(CompiledQuery {
                    sql,
                    params: self.params.clone(),
                })
            }
            Err(err) => {
                self.params.truncate(checkpoint);
                Err(err)
            }
        }
    }

    fn render(&mut self, expr: &Expression) -> CompilerResult<String> {
        match expr {
            Expression::Select(select) => self.render_select(select),
            Expression::Union(union) => self.render_union(union, "union"),
            Expression::UnionAll(union) => self.render_union(union, "union all"),
            Expression::Order(order) => self.render_order(order),
            _ => self.render_value(expr),
        }
    }
}

/// Compiles with a fresh [`QueryCompiler`], so placeholders start at `$1`.
pub fn compile(expr: &Expression) -> CompilerResult<CompiledQuery> {
    QueryCompiler::default().compile(expr)
}

include!("compiler/values.rs");
include!("compiler/predicates.rs");
include!("compiler/statements.rs");
include!("compiler/references.rs");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::*;

    include!("compiler/tests_internal.rs");
}
