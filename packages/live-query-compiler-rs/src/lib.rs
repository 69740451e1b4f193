mod compiler;
pub mod language;
pub mod model;
#[cfg(feature = "node")]
mod node_bindings;

pub use compiler::{
    compile, quote_ident, quote_literal, registration_queries, returns_references,
    CompileOptions, LiteralMode, QueryCompiler, ReferenceOptions, REFERENCE_ID_LABEL,
    REFERENCE_TABLE_LABEL,
};
pub use model::{CompiledQuery, Expression, RegistrationQueries};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("select requires at least one source relation")]
    MissingSource,
    #[error("{op} comparison expects {expected} operands, got {actual}")]
    OperandCount {
        op: &'static str,
        expected: &'static str,
        actual: usize,
    },
    #[error("{0} condition requires at least one operand")]
    EmptyCondition(&'static str),
    #[error("union requires at least one select")]
    EmptyUnion,
    #[error("unsupported node: {0}")]
    Unsupported(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CompilerResult<T> = Result<T, CompilerError>;
