/// Column labels of every membership (live) query row.
pub const REFERENCE_ID_LABEL: &str = "id";
pub const REFERENCE_TABLE_LABEL: &str = "table";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceOptions {
    /// Row identity column present on every tracked table.
    #[serde(rename = "idColumn")]
    pub id_column: String,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
        }
    }
}

fn reference_selects(select: &Select, options: &ReferenceOptions) -> CompilerResult<Vec<Select>> {
    if select.from.is_empty() {
        return Err(CompilerError::MissingSource);
    }
    // Grouped rows have no single source row identity.
    if !select.group.is_empty() {
        return Err(CompilerError::Unsupported(
            "cannot derive row references from a grouped select".to_string(),
        ));
    }

    Ok(select
        .from
        .iter()
        .map(|source| {
            let id = Expression::Path(Path {
                table: Some(source.reference_name().to_string()),
                column: options.id_column.clone(),
                alias: Some(REFERENCE_ID_LABEL.to_string()),
            });
            let table = Expression::Data(Data {
                value: Value::String(source.table.clone()),
                alias: Some(REFERENCE_TABLE_LABEL.to_string()),
            });

            Select {
                returns: vec![id, table],
                alias: None,
                ..select.clone()
            }
        })
        .collect())
}

/// Rewrites a query so it returns only row identity: one `(id, table)` row
/// per referenced source row, filtered, ordered and limited like the input.
///
/// A select over several sources becomes a union with one branch per source.
pub fn returns_references(
    expr: &Expression,
    options: &ReferenceOptions,
) -> CompilerResult<Expression> {
    match expr {
        Expression::Select(select) => {
            let mut selects = reference_selects(select, options)?;
            if selects.len() == 1 {
                Ok(Expression::Select(Box::new(selects.remove(0))))
            } else {
                Ok(Expression::Union(Union { selects }))
            }
        }
        Expression::Union(union) | Expression::UnionAll(union) => {
            if union.selects.is_empty() {
                return Err(CompilerError::EmptyUnion);
            }

            let mut selects = Vec::new();
            for select in &union.selects {
                selects.extend(reference_selects(select, options)?);
            }

            let union = Union { selects };
            Ok(match expr {
                Expression::UnionAll(_) => Expression::UnionAll(union),
                _ => Expression::Union(union),
            })
        }
        other => Err(CompilerError::Unsupported(format!(
            "cannot derive row references from a {} node",
            other.kind()
        ))),
    }
}

/// Compiles the fetch query and its reference rewrite, each with a fresh
/// inline-literal compiler, ready to be stored in the registry.
pub fn registration_queries(
    expr: &Expression,
    options: &ReferenceOptions,
) -> CompilerResult<RegistrationQueries> {
    let live = returns_references(expr, options)?;
    let fetch_query = QueryCompiler::inline().compile(expr)?.sql;
    let live_query = QueryCompiler::inline().compile(&live)?.sql;

    debug!("registration queries: fetch=[{fetch_query}] live=[{live_query}]");

    Ok(RegistrationQueries {
        fetch_query,
        live_query,
    })
}
