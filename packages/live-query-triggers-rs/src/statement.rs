use std::fmt;

use serde::Serialize;

/// Ordered SQL statements, each a single complete statement. Building a
/// batch never executes anything.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StatementBatch {
    statements: Vec<String>,
}

impl StatementBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    pub fn append(&mut self, mut other: StatementBatch) {
        self.statements.append(&mut other.statements);
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl From<String> for StatementBatch {
    fn from(statement: String) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

impl FromIterator<String> for StatementBatch {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

/// Statements separated by newlines, ready for a simple-query round trip.
impl fmt::Display for StatementBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statements.join("\n"))
    }
}
