pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn inline_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote_literal(text),
        Value::Array(_) | Value::Object(_) => format!("{}::jsonb", quote_literal(&value.to_string())),
    }
}

fn render_path(path: &Path) -> String {
    match &path.table {
        Some(table) => format!("{}.{}", quote_ident(table), quote_ident(&path.column)),
        None => quote_ident(&path.column),
    }
}

impl QueryCompiler {
    fn render_data(&mut self, value: &Value) -> String {
        match value {
            Value::Bool(_) | Value::Number(_) => inline_literal(value),
            _ => match self.options.literals {
                LiteralMode::Bind => {
                    self.params.push(value.clone());
                    format!("${}", self.params.len())
                }
                LiteralMode::Inline => inline_literal(value),
            },
        }
    }

    fn render_value(&mut self, expr: &Expression) -> CompilerResult<String> {
        let rendered = self.render_bare(expr)?;
        Ok(match expr.alias() {
            Some(alias) => format!("{rendered} as {}", quote_ident(alias)),
            None => rendered,
        })
    }

    /// Renders a value where an alias is not allowed (operands, order and
    /// group entries). Any alias on `expr` is dropped.
    fn render_bare(&mut self, expr: &Expression) -> CompilerResult<String> {
        Ok(match expr {
            Expression::Data(data) => self.render_data(&data.value),
            Expression::Path(path) => render_path(path),
            Expression::Comparison(comparison) => self.render_comparison(comparison)?,
            Expression::Condition(condition) => self.render_condition(condition)?,
            Expression::Select(select) => format!("({})", self.render_select(select)?),
            Expression::Order(_) | Expression::Union(_) | Expression::UnionAll(_) => {
                return Err(CompilerError::Unsupported(format!(
                    "{} node cannot be used as a value",
                    expr.kind()
                )));
            }
        })
    }

    /// Comparison operand. Nested predicates are parenthesized so they bind
    /// as one value under the enclosing operator.
    fn render_operand(&mut self, expr: &Expression) -> CompilerResult<String> {
        let rendered = self.render_bare(expr)?;
        Ok(match expr {
            Expression::Comparison(_) | Expression::Condition(_) => format!("({rendered})"),
            _ => rendered,
        })
    }

    fn render_operand_list(&mut self, exprs: &[Expression]) -> CompilerResult<String> {
        let mut rendered = Vec::with_capacity(exprs.len());
        for expr in exprs {
            rendered.push(self.render_operand(expr)?);
        }
        Ok(rendered.join(","))
    }

    fn render_value_list(&mut self, exprs: &[Expression]) -> CompilerResult<String> {
        let mut rendered = Vec::with_capacity(exprs.len());
        for expr in exprs {
            rendered.push(self.render_value(expr)?);
        }
        Ok(rendered.join(","))
    }
}
