use std::fmt;

use crate::{CodegenError, CodegenResult};

/// PostgreSQL truncates identifiers longer than this many bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// A name that is safe to splice unquoted into generated server-side code:
/// lowercase ASCII letters, digits and underscores, not starting with a digit.
///
/// Uppercase is rejected rather than folded so that the name a caller passes
/// is exactly what `TG_TABLE_NAME` reports inside the triggers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(name: &str) -> CodegenResult<Self> {
        let invalid = |reason: &str| CodegenError::InvalidIdentifier {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let first = name.chars().next().ok_or_else(|| invalid("empty"))?;
        if name.len() > MAX_IDENTIFIER_LEN {
            return Err(invalid("longer than 63 bytes"));
        }
        if !(first.is_ascii_lowercase() || first == '_') {
            return Err(invalid("must start with a lowercase letter or underscore"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(invalid(&format!("unsupported character {bad:?}")));
        }

        Ok(Self(name.to_string()))
    }

    /// `<self>_<suffix>`, validated again since the result may be too long.
    pub fn suffixed(&self, suffix: &str) -> CodegenResult<Self> {
        Self::parse(&format!("{}_{suffix}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
