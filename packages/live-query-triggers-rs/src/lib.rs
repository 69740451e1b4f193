pub mod codegen;
mod identifier;
#[cfg(feature = "node")]
mod node_bindings;
pub mod notification;
mod options;
pub mod registration;
mod statement;
mod template;
pub mod wrapper;

pub use codegen::{PgTriggerCodegen, TriggerCodegen};
pub use identifier::{Identifier, MAX_IDENTIFIER_LEN};
pub use notification::{ChangeEvent, Notification};
pub use options::TriggerOptions;
pub use registration::{insert_registration, remove_registration, NewRegistration, Registration};
pub use statement::StatementBatch;
pub use template::{render, Template};
pub use wrapper::TableWrapper;

use live_query_compiler_rs::CompilerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: String },
    #[error("template error: {0}")]
    Template(String),
    #[error(transparent)]
    Compiler(#[from] CompilerError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CodegenResult<T> = Result<T, CodegenError>;
