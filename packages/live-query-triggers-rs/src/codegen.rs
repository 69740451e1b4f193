use log::trace;

use crate::identifier::Identifier;
use crate::options::{ObjectNames, TriggerOptions};
use crate::statement::StatementBatch;
use crate::template::{render, Template};
use crate::CodegenResult;

include!("codegen/templates.rs");

/// Produces the server-side objects behind live queries. Every method only
/// builds SQL text; running it is up to the caller.
pub trait TriggerCodegen {
    /// Name of the registry table every registration lives in.
    fn registry(&self) -> &Identifier;

    fn create_registry_table(&self) -> CodegenResult<String>;
    fn drop_registry_table(&self) -> CodegenResult<String>;

    /// Helpers the registry and data-table functions call.
    fn create_helper_functions(&self) -> CodegenResult<StatementBatch>;
    fn create_registry_function(&self) -> CodegenResult<String>;
    /// Recreates the trigger that keeps `tracked` current.
    fn create_registry_trigger(&self) -> CodegenResult<StatementBatch>;

    fn create_insert_update_function(&self) -> CodegenResult<String>;
    fn create_delete_function(&self) -> CodegenResult<String>;
    fn create_truncate_function(&self) -> CodegenResult<String>;

    fn create_insert_update_trigger(&self, table: &Identifier) -> CodegenResult<StatementBatch>;
    fn create_delete_trigger(&self, table: &Identifier) -> CodegenResult<StatementBatch>;
    fn create_truncate_trigger(&self, table: &Identifier) -> CodegenResult<StatementBatch>;

    fn drop_function(&self, name: &Identifier) -> CodegenResult<String>;
    fn drop_trigger(&self, table: &Identifier, function: &Identifier) -> CodegenResult<String>;
    fn drop_table(&self, name: &Identifier) -> CodegenResult<String>;

    /// Drops the three data-table triggers of `table`.
    fn drop_triggers(&self, table: &Identifier) -> CodegenResult<StatementBatch>;
    /// Drops every generated function, and with them any trigger still using one.
    fn drop_functions(&self) -> CodegenResult<StatementBatch>;

    /// Every function, in dependency order.
    fn create_functions(&self) -> CodegenResult<StatementBatch> {
        let mut batch = self.create_helper_functions()?;
        batch.push(self.create_registry_function()?);
        batch.append(self.create_registry_trigger()?);
        batch.push(self.create_insert_update_function()?);
        batch.push(self.create_delete_function()?);
        batch.push(self.create_truncate_function()?);
        Ok(batch)
    }

    /// The three data-table triggers of `table`.
    fn create_triggers(&self, table: &Identifier) -> CodegenResult<StatementBatch> {
        let mut batch = self.create_insert_update_trigger(table)?;
        batch.append(self.create_delete_trigger(table)?);
        batch.append(self.create_truncate_trigger(table)?);
        Ok(batch)
    }
}

/// PL/pgSQL implementation of [TriggerCodegen].
#[derive(Debug, Clone)]
pub struct PgTriggerCodegen {
    options: TriggerOptions,
    names: ObjectNames,
}

impl PgTriggerCodegen {
    pub fn new(options: TriggerOptions) -> CodegenResult<Self> {
        let names = ObjectNames::from_options(&options)?;
        Ok(Self { options, names })
    }

    pub fn options(&self) -> &TriggerOptions {
        &self.options
    }

    pub fn id_column(&self) -> &Identifier {
        &self.names.id_column
    }

    fn row_event_function(&self, function: &Identifier, row: &str) -> CodegenResult<String> {
        let row = Identifier::parse(row)?;
        render(
            &ROW_EVENT_FUNCTION,
            &[
                ("function", function),
                ("row", &row),
                ("registry", &self.names.registry),
                ("fetched", &self.names.fetched_function),
                ("id_column", &self.names.id_column),
            ],
        )
    }

    /// `drop trigger if exists` followed by `create trigger`, so installing
    /// twice leaves exactly one trigger.
    fn replace_trigger(
        &self,
        template: &Template,
        table: &Identifier,
        function: &Identifier,
    ) -> CodegenResult<StatementBatch> {
        let trigger = table.suffixed(function.as_str())?;
        trace!("trigger {trigger} on {table} runs {function}");

        let mut batch = StatementBatch::new();
        batch.push(self.drop_trigger(table, function)?);
        batch.push(render(
            template,
            &[("trigger", &trigger), ("table", table), ("function", function)],
        )?);
        Ok(batch)
    }
}

impl TriggerCodegen for PgTriggerCodegen {
    fn registry(&self) -> &Identifier {
        &self.names.registry
    }

    fn create_registry_table(&self) -> CodegenResult<String> {
        render(&REGISTRY_TABLE, &[("registry", &self.names.registry)])
    }

    fn drop_registry_table(&self) -> CodegenResult<String> {
        self.drop_table(&self.names.registry)
    }

    fn create_helper_functions(&self) -> CodegenResult<StatementBatch> {
        let signature = render(
            &SIGNATURE_FUNCTION,
            &[("signature", &self.names.signature_function)],
        )?;
        let fetched = render(&FETCHED_FUNCTION, &[("fetched", &self.names.fetched_function)])?;
        Ok(StatementBatch::from_iter([signature, fetched]))
    }

    fn create_registry_function(&self) -> CodegenResult<String> {
        render(
            &REGISTRY_FUNCTION,
            &[
                ("function", &self.names.registry_function),
                ("signature", &self.names.signature_function),
            ],
        )
    }

    fn create_registry_trigger(&self) -> CodegenResult<StatementBatch> {
        let registry = &self.names.registry;
        let function = &self.names.registry_function;
        let trigger = registry.suffixed(function.as_str())?;

        let mut batch = StatementBatch::new();
        batch.push(self.drop_trigger(registry, function)?);
        batch.push(render(
            &REGISTRY_TRIGGER,
            &[
                ("trigger", &trigger),
                ("registry", registry),
                ("function", function),
            ],
        )?);
        Ok(batch)
    }

    fn create_insert_update_function(&self) -> CodegenResult<String> {
        self.row_event_function(&self.names.insert_update_function, "new")
    }

    fn create_delete_function(&self) -> CodegenResult<String> {
        self.row_event_function(&self.names.delete_function, "old")
    }

    fn create_truncate_function(&self) -> CodegenResult<String> {
        render(
            &TRUNCATE_FUNCTION,
            &[
                ("function", &self.names.truncate_function),
                ("registry", &self.names.registry),
                ("signature", &self.names.signature_function),
                ("fetched", &self.names.fetched_function),
            ],
        )
    }

    fn create_insert_update_trigger(&self, table: &Identifier) -> CodegenResult<StatementBatch> {
        self.replace_trigger(
            &INSERT_UPDATE_TRIGGER,
            table,
            &self.names.insert_update_function,
        )
    }

    fn create_delete_trigger(&self, table: &Identifier) -> CodegenResult<StatementBatch> {
        self.replace_trigger(&DELETE_TRIGGER, table, &self.names.delete_function)
    }

    fn create_truncate_trigger(&self, table: &Identifier) -> CodegenResult<StatementBatch> {
        self.replace_trigger(&TRUNCATE_TRIGGER, table, &self.names.truncate_function)
    }

    fn drop_function(&self, name: &Identifier) -> CodegenResult<String> {
        render(&DROP_FUNCTION, &[("function", name)])
    }

    fn drop_trigger(&self, table: &Identifier, function: &Identifier) -> CodegenResult<String> {
        let trigger = table.suffixed(function.as_str())?;
        render(&DROP_TRIGGER, &[("trigger", &trigger), ("table", table)])
    }

    fn drop_table(&self, name: &Identifier) -> CodegenResult<String> {
        render(&DROP_TABLE, &[("table", name)])
    }

    fn drop_triggers(&self, table: &Identifier) -> CodegenResult<StatementBatch> {
        [
            &self.names.insert_update_function,
            &self.names.delete_function,
            &self.names.truncate_function,
        ]
        .into_iter()
        .map(|function| self.drop_trigger(table, function))
        .collect()
    }

    fn drop_functions(&self) -> CodegenResult<StatementBatch> {
        [
            &self.names.insert_update_function,
            &self.names.delete_function,
            &self.names.truncate_function,
            &self.names.registry_function,
            &self.names.fetched_function,
            &self.names.signature_function,
        ]
        .into_iter()
        .map(|function| self.drop_function(function))
        .collect()
    }
}
