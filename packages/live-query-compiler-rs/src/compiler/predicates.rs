fn check_operand_count(comparison: &Comparison) -> CompilerResult<()> {
    let actual = comparison.operands.len();
    let (valid, expected) = match comparison.op {
        ComparisonOp::Eq
        | ComparisonOp::Not
        | ComparisonOp::Gt
        | ComparisonOp::Gte
        | ComparisonOp::Lt
        | ComparisonOp::Lte
        | ComparisonOp::Like => (actual == 2, "2"),
        ComparisonOp::In => (actual >= 2, "at least 2"),
        ComparisonOp::Between => (actual == 3, "3"),
        ComparisonOp::Exists | ComparisonOp::Null => (actual == 1, "1"),
    };

    if valid {
        Ok(())
    } else {
        Err(CompilerError::OperandCount {
            op: comparison.op.name(),
            expected,
            actual,
        })
    }
}

fn binary_operator(op: ComparisonOp) -> Option<&'static str> {
    match op {
        ComparisonOp::Eq => Some("="),
        ComparisonOp::Not => Some("!="),
        ComparisonOp::Gt => Some(">"),
        ComparisonOp::Gte => Some(">="),
        ComparisonOp::Lt => Some("<"),
        ComparisonOp::Lte => Some("<="),
        ComparisonOp::Like => Some("like"),
        _ => None,
    }
}

impl QueryCompiler {
    fn render_comparison(&mut self, comparison: &Comparison) -> CompilerResult<String> {
        check_operand_count(comparison)?;
        let operands = &comparison.operands;

        if let Some(operator) = binary_operator(comparison.op) {
            let left = self.render_operand(&operands[0])?;
            let right = self.render_operand(&operands[1])?;
            return Ok(format!("{left} {operator} {right}"));
        }

        match comparison.op {
            ComparisonOp::In => {
                let target = self.render_operand(&operands[0])?;
                let values = self.render_operand_list(&operands[1..])?;
                Ok(format!("{target} in ({values})"))
            }
            ComparisonOp::Between => {
                let value = self.render_operand(&operands[0])?;
                let low = self.render_operand(&operands[1])?;
                let high = self.render_operand(&operands[2])?;
                Ok(format!("{value} between {low} and {high}"))
            }
            ComparisonOp::Exists => match &operands[0] {
                Expression::Select(select) => Ok(format!("exists ({})", self.render_select(select)?)),
                other => Err(CompilerError::Unsupported(format!(
                    "exists expects a select operand, got {}",
                    other.kind()
                ))),
            },
            ComparisonOp::Null => {
                let value = self.render_operand(&operands[0])?;
                Ok(format!("{value} is null"))
            }
            _ => Err(CompilerError::Unsupported(format!(
                "comparison operator {}",
                comparison.op.name()
            ))),
        }
    }

    fn render_condition(&mut self, condition: &Condition) -> CompilerResult<String> {
        if condition.operands.is_empty() {
            return Err(CompilerError::EmptyCondition(condition.op.keyword()));
        }

        let mut parts = Vec::with_capacity(condition.operands.len());
        for operand in &condition.operands {
            parts.push(format!("({})", self.render_bare(operand)?));
        }

        Ok(parts.join(&format!(" {} ", condition.op.keyword())))
    }
}
