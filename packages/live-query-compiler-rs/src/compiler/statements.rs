fn render_source(source: &Source) -> String {
    match &source.alias {
        Some(alias) => format!("{} as {}", quote_ident(&source.table), quote_ident(alias)),
        None => quote_ident(&source.table),
    }
}

fn render_from(from: &[Source]) -> CompilerResult<String> {
    if from.is_empty() {
        return Err(CompilerError::MissingSource);
    }

    Ok(from.iter().map(render_source).collect::<Vec<_>>().join(","))
}

impl QueryCompiler {
    fn render_projection(&mut self, returns: &[Expression]) -> CompilerResult<String> {
        if returns.is_empty() {
            Ok("*".to_string())
        } else {
            self.render_value_list(returns)
        }
    }

    fn render_order(&mut self, order: &Order) -> CompilerResult<String> {
        let expr = self.render_bare(&order.expr)?;
        let direction = if order.descending { "DESC" } else { "ASC" };
        Ok(format!("{expr} {direction}"))
    }

    fn render_select(&mut self, select: &Select) -> CompilerResult<String> {
        // Clauses render in text order so placeholders number left to right.
        let mut sql = format!("select {}", self.render_projection(&select.returns)?);
        sql.push_str(" from ");
        sql.push_str(&render_from(&select.from)?);

        if let Some(filter) = &select.filter {
            sql.push_str(" where ");
            sql.push_str(&self.render_bare(filter)?);
        }

        if !select.group.is_empty() {
            sql.push_str(" group by ");
            let mut groups = Vec::with_capacity(select.group.len());
            for group in &select.group {
                groups.push(self.render_bare(group)?);
            }
            sql.push_str(&groups.join(","));
        }

        if !select.order.is_empty() {
            let mut orders = Vec::with_capacity(select.order.len());
            for order in &select.order {
                orders.push(self.render_order(order)?);
            }
            sql.push_str(" order by ");
            sql.push_str(&orders.join(","));
        }

        if let Some(offset) = select.offset {
            sql.push_str(&format!(" offset {offset}"));
        }

        if let Some(limit) = select.limit {
            sql.push_str(&format!(" limit {limit}"));
        }

        Ok(sql)
    }

    fn render_union(&mut self, union: &Union, keyword: &str) -> CompilerResult<String> {
        if union.selects.is_empty() {
            return Err(CompilerError::EmptyUnion);
        }

        let mut branches = Vec::with_capacity(union.selects.len());
        for select in &union.selects {
            branches.push(format!("({})", self.render_select(select)?));
        }

        Ok(branches.join(&format!(" {keyword} ")))
    }
}
