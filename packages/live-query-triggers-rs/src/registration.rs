use live_query_compiler_rs::{
    registration_queries, CompiledQuery, Expression, ReferenceOptions, RegistrationQueries,
};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifier::Identifier;
use crate::options::TriggerOptions;
use crate::CodegenResult;

/// A live query ready to be inserted into the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub fetch_query: String,
    pub live_query: String,
    pub channel: String,
}

impl NewRegistration {
    pub fn new(queries: RegistrationQueries, channel: impl Into<String>) -> Self {
        Self {
            fetch_query: queries.fetch_query,
            live_query: queries.live_query,
            channel: channel.into(),
        }
    }

    /// Compiles `expr` into its fetch and membership queries, using the
    /// configured id column for row identity.
    pub fn from_expression(
        expr: &Expression,
        channel: impl Into<String>,
        options: &TriggerOptions,
    ) -> CodegenResult<Self> {
        let reference_options = ReferenceOptions {
            id_column: Identifier::parse(&options.id_column)?.to_string(),
        };
        let queries = registration_queries(expr, &reference_options)?;
        Ok(Self::new(queries, channel))
    }
}

/// A registry row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub fetch_query: String,
    pub live_query: String,
    /// Cached membership signature; empty or absent until recomputed.
    pub tracked: Option<String>,
    pub channel: String,
}

impl Registration {
    /// `"<id>/<table>"` entries of the cached signature.
    pub fn tracked_identities(&self) -> CodegenResult<Vec<String>> {
        match self.tracked.as_deref() {
            None | Some("") => Ok(Vec::new()),
            Some(tracked) => Ok(serde_json::from_str(tracked)?),
        }
    }
}

/// Inserts a registration and returns its id. The registry trigger fills
/// `tracked` on insert.
pub fn insert_registration(registry: &Identifier, registration: &NewRegistration) -> CompiledQuery {
    debug!(
        "register live query on channel {} into {registry}",
        registration.channel
    );

    CompiledQuery {
        sql: format!(
            "insert into {registry} (fetchQuery, liveQuery, channel) values ($1, $2, $3) returning id"
        ),
        params: vec![
            Value::from(registration.fetch_query.as_str()),
            Value::from(registration.live_query.as_str()),
            Value::from(registration.channel.as_str()),
        ],
    }
}

pub fn remove_registration(registry: &Identifier, id: i64) -> CompiledQuery {
    debug!("unregister live query {id} from {registry}");

    CompiledQuery {
        sql: format!("delete from {registry} where id = $1"),
        params: vec![Value::from(id)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use live_query_compiler_rs::language::*;

    fn registry() -> Identifier {
        Identifier::parse("live_query_trackings").unwrap()
    }

    #[test]
    fn from_expression_compiles_both_queries_inline() {
        let expr = select(vec![])
            .from_source(source("items"))
            .filter(gt(path("num"), data(2)))
            .into_expression();

        let registration =
            NewRegistration::from_expression(&expr, "live_1", &TriggerOptions::default()).unwrap();

        assert_eq!(
            registration.fetch_query,
            r#"select * from "items" where "num" > 2"#
        );
        assert_eq!(
            registration.live_query,
            r#"select "items"."id" as "id",'items' as "table" from "items" where "num" > 2"#
        );
        assert_eq!(registration.channel, "live_1");
    }

    #[test]
    fn from_expression_rejects_bad_id_column() {
        let expr = select(vec![]).from_source(source("items")).into_expression();
        let options = TriggerOptions {
            id_column: "Id".to_string(),
            ..Default::default()
        };
        assert!(NewRegistration::from_expression(&expr, "c", &options).is_err());
    }

    #[test]
    fn insert_binds_every_value() {
        let registration = NewRegistration {
            fetch_query: "select 1".to_string(),
            live_query: "select 2".to_string(),
            channel: "it's".to_string(),
        };

        let query = insert_registration(&registry(), &registration);
        assert_eq!(
            query.sql,
            "insert into live_query_trackings (fetchQuery, liveQuery, channel) values ($1, $2, $3) returning id"
        );
        assert_eq!(
            query.params,
            vec![
                Value::from("select 1"),
                Value::from("select 2"),
                Value::from("it's")
            ]
        );
    }

    #[test]
    fn remove_binds_id() {
        let query = remove_registration(&registry(), 7);
        assert_eq!(query.sql, "delete from live_query_trackings where id = $1");
        assert_eq!(query.params, vec![Value::from(7)]);
    }

    #[test]
    fn tracked_identities_reads_signature() {
        let mut registration = Registration {
            id: 1,
            fetch_query: String::new(),
            live_query: String::new(),
            tracked: Some(r#"["3/items", "4/items"]"#.to_string()),
            channel: "c".to_string(),
        };
        assert_eq!(
            registration.tracked_identities().unwrap(),
            vec!["3/items".to_string(), "4/items".to_string()]
        );

        registration.tracked = Some(String::new());
        assert!(registration.tracked_identities().unwrap().is_empty());
        registration.tracked = None;
        assert!(registration.tracked_identities().unwrap().is_empty());
    }
}
