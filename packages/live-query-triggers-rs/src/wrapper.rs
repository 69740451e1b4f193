use live_query_compiler_rs::{quote_ident, CompiledQuery};
use log::debug;

use crate::codegen::TriggerCodegen;
use crate::identifier::Identifier;
use crate::registration::{insert_registration, remove_registration, NewRegistration};
use crate::statement::StatementBatch;
use crate::CodegenResult;

/// Lifecycle statements for the registry and the tables it watches.
#[derive(Debug, Clone)]
pub struct TableWrapper<C: TriggerCodegen> {
    codegen: C,
}

impl<C: TriggerCodegen> TableWrapper<C> {
    pub fn new(codegen: C) -> Self {
        Self { codegen }
    }

    pub fn codegen(&self) -> &C {
        &self.codegen
    }

    /// Registry table first, then every function and the registry trigger.
    pub fn init(&self) -> CodegenResult<StatementBatch> {
        let mut batch = StatementBatch::from(self.codegen.create_registry_table()?);
        batch.append(self.codegen.create_functions()?);
        debug!("init {}: {} statements", self.codegen.registry(), batch.len());
        Ok(batch)
    }

    /// Removes the registry and every function. Triggers still attached to
    /// wrapped tables go with their functions.
    pub fn deinit(&self) -> CodegenResult<StatementBatch> {
        let mut batch = StatementBatch::from(self.codegen.drop_registry_table()?);
        batch.append(self.codegen.drop_functions()?);
        debug!("deinit {}: {} statements", self.codegen.registry(), batch.len());
        Ok(batch)
    }

    pub fn wrap(&self, table: &str) -> CodegenResult<StatementBatch> {
        let table = Identifier::parse(table)?;
        debug!("wrap {table}");
        self.codegen.create_triggers(&table)
    }

    pub fn unwrap(&self, table: &str) -> CodegenResult<StatementBatch> {
        let table = Identifier::parse(table)?;
        debug!("unwrap {table}");
        self.codegen.drop_triggers(&table)
    }

    /// Channels are arbitrary names, so they are quoted rather than validated.
    pub fn listen(&self, channel: &str) -> StatementBatch {
        StatementBatch::from(format!("listen {};", quote_ident(channel)))
    }

    pub fn unlisten(&self, channel: &str) -> StatementBatch {
        StatementBatch::from(format!("unlisten {};", quote_ident(channel)))
    }

    pub fn register(&self, registration: &NewRegistration) -> CompiledQuery {
        insert_registration(self.codegen.registry(), registration)
    }

    pub fn unregister(&self, id: i64) -> CompiledQuery {
        remove_registration(self.codegen.registry(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::codegen::PgTriggerCodegen;
    use crate::options::TriggerOptions;

    fn wrapper() -> TableWrapper<PgTriggerCodegen> {
        TableWrapper::new(PgTriggerCodegen::new(TriggerOptions::default()).unwrap())
    }

    #[test]
    fn init_creates_registry_before_functions() {
        let batch = wrapper().init().unwrap();
        let statements = batch.statements();
        assert_eq!(statements.len(), 9);
        assert!(statements[0].starts_with("create table if not exists live_query_trackings"));
        assert!(statements[8].starts_with("create or replace function live_query_truncate()"));
    }

    #[test]
    fn deinit_drops_table_then_functions() {
        let batch = wrapper().deinit().unwrap();
        assert_eq!(
            batch.statements()[0],
            "drop table if exists live_query_trackings;"
        );
        assert_eq!(batch.len(), 7);
        assert!(batch.statements()[1..]
            .iter()
            .all(|s| s.starts_with("drop function if exists") && s.ends_with("cascade;")));
    }

    #[test]
    fn wrap_and_unwrap_cover_three_triggers() {
        let wrapper = wrapper();
        assert_eq!(wrapper.wrap("items").unwrap().len(), 6);
        assert_eq!(
            wrapper.unwrap("items").unwrap().into_statements(),
            vec![
                "drop trigger if exists items_live_query_insert_update on items;",
                "drop trigger if exists items_live_query_delete on items;",
                "drop trigger if exists items_live_query_truncate on items;",
            ]
        );
    }

    #[test]
    fn wrap_rejects_unsafe_table_names() {
        let wrapper = wrapper();
        assert!(wrapper.wrap("items; drop table users").is_err());
        assert!(wrapper.wrap("Items").is_err());
        assert!(wrapper.unwrap("").is_err());
    }

    #[test]
    fn listen_quotes_channel() {
        let wrapper = wrapper();
        assert_eq!(wrapper.listen("live_1").to_string(), "listen \"live_1\";");
        assert_eq!(
            wrapper.unlisten("we\"ird").to_string(),
            "unlisten \"we\"\"ird\";"
        );
    }

    #[test]
    fn register_targets_configured_registry() {
        let wrapper = TableWrapper::new(
            PgTriggerCodegen::new(TriggerOptions {
                registry_table: "watchers".to_string(),
                ..Default::default()
            })
            .unwrap(),
        );
        let registration = NewRegistration {
            fetch_query: "select 1".to_string(),
            live_query: "select 2".to_string(),
            channel: "c".to_string(),
        };
        assert!(wrapper.register(&registration).sql.starts_with("insert into watchers "));
        assert_eq!(
            wrapper.unregister(3).sql,
            "delete from watchers where id = $1"
        );
    }
}
