use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;
use crate::CodegenResult;

/// Names shared by every generated object. Change them to run several
/// independent registries in one database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TriggerOptions {
    pub registry_table: String,
    pub insert_update_function: String,
    pub delete_function: String,
    pub truncate_function: String,
    /// Row identity column every wrapped table must have.
    pub id_column: String,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            registry_table: "live_query_trackings".to_string(),
            insert_update_function: "live_query_insert_update".to_string(),
            delete_function: "live_query_delete".to_string(),
            truncate_function: "live_query_truncate".to_string(),
            id_column: "id".to_string(),
        }
    }
}

impl TriggerOptions {
    /// Reads options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> CodegenResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> CodegenResult<()> {
        ObjectNames::from_options(self).map(|_| ())
    }
}

/// Validated names of every shared database object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ObjectNames {
    pub registry: Identifier,
    pub registry_function: Identifier,
    pub signature_function: Identifier,
    pub fetched_function: Identifier,
    pub insert_update_function: Identifier,
    pub delete_function: Identifier,
    pub truncate_function: Identifier,
    pub id_column: Identifier,
}

impl ObjectNames {
    pub(crate) fn from_options(options: &TriggerOptions) -> CodegenResult<Self> {
        let registry = Identifier::parse(&options.registry_table)?;
        let registry_function = registry.suffixed("func")?;

        // The registry trigger is named like every other trigger: <table>_<function>.
        registry.suffixed(registry_function.as_str())?;

        Ok(Self {
            signature_function: registry.suffixed("signature")?,
            fetched_function: registry.suffixed("fetched")?,
            registry_function,
            insert_update_function: Identifier::parse(&options.insert_update_function)?,
            delete_function: Identifier::parse(&options.delete_function)?,
            truncate_function: Identifier::parse(&options.truncate_function)?,
            id_column: Identifier::parse(&options.id_column)?,
            registry,
        })
    }
}
