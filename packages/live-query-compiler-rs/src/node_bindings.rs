use napi_derive::napi;

use crate::{
    registration_queries, CompileOptions, CompilerError, Expression, LiteralMode, QueryCompiler,
    ReferenceOptions,
};

#[napi(object)]
pub struct JsCompileOptions {
    pub inline_literals: Option<bool>,
}

fn parse_expression(expression_json: &str) -> napi::Result<Expression> {
    Expression::from_json(expression_json)
        .map_err(|err| napi::Error::from_reason(CompilerError::Json(err).to_string()))
}

#[napi(js_name = "compileQueryJson")]
pub fn compile_query_json(
    expression_json: String,
    options: Option<JsCompileOptions>,
) -> napi::Result<String> {
    let expression = parse_expression(&expression_json)?;
    let literals = match options.and_then(|value| value.inline_literals) {
        Some(true) => LiteralMode::Inline,
        _ => LiteralMode::Bind,
    };

    let compiled = QueryCompiler::new(CompileOptions { literals })
        .compile(&expression)
        .map_err(|err| napi::Error::from_reason(err.to_string()))?;

    serde_json::to_string(&compiled).map_err(|err| napi::Error::from_reason(err.to_string()))
}

#[napi(js_name = "registrationQueriesJson")]
pub fn registration_queries_json(
    expression_json: String,
    id_column: Option<String>,
) -> napi::Result<String> {
    let expression = parse_expression(&expression_json)?;
    let options = ReferenceOptions {
        id_column: id_column.unwrap_or_else(|| "id".to_string()),
    };

    let queries = registration_queries(&expression, &options)
        .map_err(|err| napi::Error::from_reason(err.to_string()))?;

    serde_json::to_string(&queries).map_err(|err| napi::Error::from_reason(err.to_string()))
}
