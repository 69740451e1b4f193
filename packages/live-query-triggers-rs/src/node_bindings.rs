use napi_derive::napi;

use crate::{CodegenResult, PgTriggerCodegen, StatementBatch, TableWrapper, TriggerOptions};

fn to_napi<T>(result: CodegenResult<T>) -> napi::Result<T> {
    result.map_err(|err| napi::Error::from_reason(err.to_string()))
}

fn to_sql(result: CodegenResult<StatementBatch>) -> napi::Result<String> {
    to_napi(result).map(|batch| batch.to_string())
}

#[napi]
pub struct NativeTableWrapper {
    inner: TableWrapper<PgTriggerCodegen>,
}

#[napi]
impl NativeTableWrapper {
    /// `options_json` uses the camelCase option names; omitted fields default.
    #[napi(constructor)]
    pub fn new(options_json: Option<String>) -> napi::Result<Self> {
        let options = match options_json {
            Some(json) => to_napi(TriggerOptions::from_json(&json))?,
            None => TriggerOptions::default(),
        };
        let codegen = to_napi(PgTriggerCodegen::new(options))?;

        Ok(Self {
            inner: TableWrapper::new(codegen),
        })
    }

    #[napi]
    pub fn init(&self) -> napi::Result<String> {
        to_sql(self.inner.init())
    }

    #[napi]
    pub fn deinit(&self) -> napi::Result<String> {
        to_sql(self.inner.deinit())
    }

    #[napi]
    pub fn wrap(&self, table: String) -> napi::Result<String> {
        to_sql(self.inner.wrap(&table))
    }

    #[napi]
    pub fn unwrap(&self, table: String) -> napi::Result<String> {
        to_sql(self.inner.unwrap(&table))
    }

    #[napi]
    pub fn listen(&self, channel: String) -> String {
        self.inner.listen(&channel).to_string()
    }

    #[napi]
    pub fn unlisten(&self, channel: String) -> String {
        self.inner.unlisten(&channel).to_string()
    }
}
