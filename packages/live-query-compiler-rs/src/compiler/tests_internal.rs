fn sql(compiler: &mut QueryCompiler, expr: &Expression) -> String {
    compiler.compile(expr).unwrap().sql
}

fn values() -> Vec<Expression> {
    vec![
        data(true),
        data(false).aliased("a"),
        data(123),
        data(123).aliased("b"),
        data("123"),
        data("123").aliased("c"),
        path("a"),
        path("a").aliased("d"),
        table_path("a", "b"),
        table_path("a", "b").aliased("e"),
    ]
}

const RENDERED_VALUES: [&str; 10] = [
    "true",
    "false as \"a\"",
    "123",
    "123 as \"b\"",
    "$1",
    "$2 as \"c\"",
    "\"a\"",
    "\"a\" as \"d\"",
    "\"a\".\"b\"",
    "\"a\".\"b\" as \"e\"",
];

fn sample_condition() -> Expression {
    and(vec![
        or(vec![
            eq(table_path("a", "b"), data("a")),
            gt(data(123), table_path("x", "y")),
        ]),
        eq(table_path("a", "b"), data("a")),
        gt(data(123), table_path("x", "y")),
    ])
}

#[test]
fn inlines_booleans_and_numbers_and_binds_strings() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(sql(&mut compiler, &data(true)), "true");
    assert_eq!(sql(&mut compiler, &data(123)), "123");
    assert_eq!(sql(&mut compiler, &data("123")), "$1");
    assert_eq!(compiler.params(), &[Value::from("123")]);
}

#[test]
fn renders_values_paths_and_aliases() {
    let mut compiler = QueryCompiler::default();
    let rendered = values()
        .iter()
        .map(|value| sql(&mut compiler, value))
        .collect::<Vec<_>>();

    assert_eq!(rendered, RENDERED_VALUES);
}

#[test]
fn aliasing_leaves_the_original_node_untouched() {
    let original = table_path("a", "b");
    let aliased = original.aliased("c");

    assert_eq!(original.alias(), None);
    assert_eq!(aliased.alias(), Some("c"));
    assert_ne!(original, aliased);
    assert_eq!(aliased, table_path("a", "b").aliased("c"));
}

#[test]
fn empty_projection_renders_star() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(sql(&mut compiler, &select(vec![]).from_source(source("a")).into()), "select * from \"a\"");
}

#[test]
fn projection_list_binds_params_in_order() {
    let mut compiler = QueryCompiler::default();
    let query = select(values()).from_source(source("t"));

    assert_eq!(
        sql(&mut compiler, &query.into()),
        format!("select {} from \"t\"", RENDERED_VALUES.join(","))
    );
    assert_eq!(compiler.params(), &[Value::from("123"), Value::from("123")]);
}

#[test]
fn select_requires_a_source() {
    let mut compiler = QueryCompiler::default();
    let err = compiler.compile(&select(vec![]).into()).unwrap_err();
    assert!(matches!(err, CompilerError::MissingSource));
}

#[test]
fn renders_sources_with_and_without_alias() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(
        sql(&mut compiler, &select(vec![]).from_source(source("a")).into()),
        "select * from \"a\""
    );
    assert_eq!(
        sql(&mut compiler, &select(vec![]).from_source(aliased_source("a", "c")).into()),
        "select * from \"a\" as \"c\""
    );
}

#[test]
fn comparisons_continue_the_placeholder_counter() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(sql(&mut compiler, &data("a")), "$1");
    assert_eq!(
        sql(&mut compiler, &eq(table_path("a", "b"), data("a"))),
        "\"a\".\"b\" = $2"
    );
    assert_eq!(
        sql(
            &mut compiler,
            &in_list(table_path("a", "b"), vec![data("a"), data("b")])
        ),
        "\"a\".\"b\" in ($3,$4)"
    );
    assert_eq!(
        sql(
            &mut compiler,
            &between(table_path("a", "b"), data("a"), data("b"))
        ),
        "\"a\".\"b\" between $5 and $6"
    );
    assert_eq!(
        sql(&mut compiler, &like(table_path("a", "b"), data("a"))),
        "\"a\".\"b\" like $7"
    );
    assert_eq!(compiler.params().len(), 7);
}

#[test]
fn renders_remaining_comparison_operators() {
    let mut compiler = QueryCompiler::default();
    let column = || path("n");

    assert_eq!(sql(&mut compiler, &not(column(), data(1))), "\"n\" != 1");
    assert_eq!(sql(&mut compiler, &gte(column(), data(1))), "\"n\" >= 1");
    assert_eq!(sql(&mut compiler, &lt(column(), data(1))), "\"n\" < 1");
    assert_eq!(sql(&mut compiler, &lte(column(), data(1))), "\"n\" <= 1");
    assert_eq!(sql(&mut compiler, &is_null(column())), "\"n\" is null");
    assert_eq!(
        sql(
            &mut compiler,
            &exists(select(vec![]).from_source(source("a")).filter(eq(path("x"), data("y"))))
        ),
        "exists (select * from \"a\" where \"x\" = $1)"
    );
}

#[test]
fn comparison_operand_count_is_validated() {
    let mut compiler = QueryCompiler::default();

    let err = compiler
        .compile(&comparison(ComparisonOp::Eq, vec![]))
        .unwrap_err();
    assert!(matches!(
        err,
        CompilerError::OperandCount {
            op: "eq",
            actual: 0,
            ..
        }
    ));

    let err = compiler.compile(&in_list(path("a"), vec![])).unwrap_err();
    assert!(matches!(err, CompilerError::OperandCount { op: "in", .. }));

    let err = compiler
        .compile(&comparison(ComparisonOp::Between, vec![path("a"), data(1)]))
        .unwrap_err();
    assert!(matches!(err, CompilerError::OperandCount { op: "between", .. }));

    assert!(matches!(
        compiler.compile(&comparison(ComparisonOp::Exists, vec![path("a")])),
        Err(CompilerError::Unsupported(_))
    ));
}

#[test]
fn failed_compile_rolls_back_bound_params() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(sql(&mut compiler, &data("kept")), "$1");

    let broken = and(vec![eq(path("a"), data("dropped")), comparison(ComparisonOp::Like, vec![])]);
    assert!(compiler.compile(&broken).is_err());
    assert_eq!(compiler.params(), &[Value::from("kept")]);

    assert_eq!(sql(&mut compiler, &data("next")), "$2");
}

#[test]
fn nested_conditions_are_parenthesized() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(
        sql(&mut compiler, &sample_condition()),
        "((\"a\".\"b\" = $1) or (123 > \"x\".\"y\")) and (\"a\".\"b\" = $2) and (123 > \"x\".\"y\")"
    );
}

#[test]
fn empty_condition_fails() {
    let mut compiler = QueryCompiler::default();
    assert!(matches!(
        compiler.compile(&or(vec![])),
        Err(CompilerError::EmptyCondition("or"))
    ));
}

#[test]
fn renders_group_and_order_lists() {
    let mut compiler = QueryCompiler::default();
    let query = select(vec![])
        .from_source(source("t"))
        .group_by(path("a"))
        .group_by(table_path("b", "c"))
        .order_by(order(path("a")))
        .order_by(order_desc(table_path("b", "c")));

    assert_eq!(
        sql(&mut compiler, &query.into()),
        "select * from \"t\" group by \"a\",\"b\".\"c\" order by \"a\" ASC,\"b\".\"c\" DESC"
    );
    assert_eq!(sql(&mut compiler, &Expression::Order(order(path("a")))), "\"a\" ASC");
}

#[test]
fn renders_full_select() {
    let mut compiler = QueryCompiler::default();
    let query = select(vec![data("x"), table_path("x", "y")])
        .from_source(source("a"))
        .filter(sample_condition())
        .group_by(path("x"))
        .group_by(path("y"))
        .order_by(order(path("x")))
        .order_by(order_desc(table_path("z", "r")))
        .offset(5)
        .limit(3);

    assert_eq!(
        sql(&mut compiler, &query.into()),
        concat!(
            "select $1,\"x\".\"y\" from \"a\" where ",
            "((\"a\".\"b\" = $2) or (123 > \"x\".\"y\")) and (\"a\".\"b\" = $3) and (123 > \"x\".\"y\") ",
            "group by \"x\",\"y\" ",
            "order by \"x\" ASC,\"z\".\"r\" DESC ",
            "offset 5 limit 3"
        )
    );
}

#[test]
fn renders_unions() {
    let mut compiler = QueryCompiler::default();
    let branches = || {
        ["a", "b", "c"]
            .iter()
            .map(|table| select(vec![]).from_source(source(*table)))
            .collect::<Vec<_>>()
    };

    assert_eq!(
        sql(&mut compiler, &union(branches())),
        "(select * from \"a\") union (select * from \"b\") union (select * from \"c\")"
    );
    assert_eq!(
        sql(&mut compiler, &union_all(branches())),
        "(select * from \"a\") union all (select * from \"b\") union all (select * from \"c\")"
    );
    assert!(matches!(
        compiler.compile(&union(vec![])),
        Err(CompilerError::EmptyUnion)
    ));
}

#[test]
fn orders_and_unions_are_not_values() {
    let mut compiler = QueryCompiler::default();
    let query = select(vec![Expression::Order(order(path("a")))]).from_source(source("t"));
    assert!(matches!(
        compiler.compile(&query.into()),
        Err(CompilerError::Unsupported(_))
    ));
}

#[test]
fn subquery_values_are_parenthesized_and_aliased() {
    let mut compiler = QueryCompiler::default();
    let inner = select(vec![path("n")]).from_source(source("b")).limit(1);
    let query = select(vec![Expression::from(inner).aliased("first")]).from_source(source("a"));

    assert_eq!(
        sql(&mut compiler, &query.into()),
        "select (select \"n\" from \"b\" limit 1) as \"first\" from \"a\""
    );
}

#[test]
fn identifiers_escape_embedded_quotes() {
    assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    assert_eq!(quote_literal("it's"), "'it''s'");
}

#[test]
fn inline_mode_renders_escaped_literals() {
    let mut compiler = QueryCompiler::inline();
    let query = select(vec![data(Value::Null).aliased("nothing")])
        .from_source(source("t"))
        .filter(and(vec![
            eq(path("name"), data("o'brien")),
            eq(path("tags"), data(serde_json::json!(["a"]))),
        ]));

    assert_eq!(
        sql(&mut compiler, &query.into()),
        "select null as \"nothing\" from \"t\" where (\"name\" = 'o''brien') and (\"tags\" = '[\"a\"]'::jsonb)"
    );
    assert!(compiler.params().is_empty());
}

#[test]
fn fresh_compilers_are_deterministic() {
    let query: Expression = select(vec![data("x")])
        .from_source(source("a"))
        .filter(sample_condition())
        .into();

    assert_eq!(compile(&query).unwrap(), compile(&query).unwrap());
}

#[test]
fn reused_compiler_keeps_counting() {
    let mut compiler = QueryCompiler::default();
    let first = compiler.compile(&eq(path("a"), data("x"))).unwrap();
    let second = compiler.compile(&eq(path("a"), data("y"))).unwrap();

    assert_eq!(first.sql, "\"a\" = $1");
    assert_eq!(second.sql, "\"a\" = $2");
    assert_eq!(second.params, vec![Value::from("x"), Value::from("y")]);
}

#[test]
fn reference_rewrite_projects_identity() {
    let query: Expression = select(vec![table_path("t", "id").aliased("_id"), table_path("t", "num")])
        .from_source(source("t"))
        .filter(gt(table_path("t", "num"), data(2)))
        .order_by(order(table_path("t", "num")))
        .limit(2)
        .into();

    let live = returns_references(&query, &ReferenceOptions::default()).unwrap();
    let mut compiler = QueryCompiler::inline();
    assert_eq!(
        sql(&mut compiler, &live),
        "select \"t\".\"id\" as \"id\",'t' as \"table\" from \"t\" where \"t\".\"num\" > 2 order by \"t\".\"num\" ASC limit 2"
    );
}

#[test]
fn reference_rewrite_splits_multi_source_selects() {
    let query: Expression = select(vec![])
        .from_source(aliased_source("users", "u"))
        .from_source(source("posts"))
        .filter(eq(table_path("posts", "author"), table_path("u", "id")))
        .into();

    let live = returns_references(&query, &ReferenceOptions::default()).unwrap();
    let mut compiler = QueryCompiler::inline();
    assert_eq!(
        sql(&mut compiler, &live),
        concat!(
            "(select \"u\".\"id\" as \"id\",'users' as \"table\" from \"users\" as \"u\",\"posts\" where \"posts\".\"author\" = \"u\".\"id\")",
            " union ",
            "(select \"posts\".\"id\" as \"id\",'posts' as \"table\" from \"users\" as \"u\",\"posts\" where \"posts\".\"author\" = \"u\".\"id\")"
        )
    );
}

#[test]
fn reference_rewrite_rejects_non_queries() {
    assert!(matches!(
        returns_references(&data(1), &ReferenceOptions::default()),
        Err(CompilerError::Unsupported(_))
    ));
    assert!(matches!(
        returns_references(&select(vec![]).into(), &ReferenceOptions::default()),
        Err(CompilerError::MissingSource)
    ));
}

#[test]
fn registration_queries_are_placeholder_free() {
    let query: Expression = select(vec![])
        .from_source(source("items"))
        .filter(eq(table_path("items", "kind"), data("book")))
        .into();

    let queries = registration_queries(&query, &ReferenceOptions::default()).unwrap();
    assert_eq!(
        queries.fetch_query,
        "select * from \"items\" where \"items\".\"kind\" = 'book'"
    );
    assert_eq!(
        queries.live_query,
        "select \"items\".\"id\" as \"id\",'items' as \"table\" from \"items\" where \"items\".\"kind\" = 'book'"
    );
}

#[test]
fn nested_predicate_operands_are_parenthesized() {
    let mut compiler = QueryCompiler::default();
    assert_eq!(
        sql(
            &mut compiler,
            &eq(path("flag"), or(vec![eq(path("a"), data(1)), eq(path("b"), data(2))]))
        ),
        "\"flag\" = ((\"a\" = 1) or (\"b\" = 2))"
    );
    assert_eq!(
        sql(&mut compiler, &eq(gt(path("a"), data(1)), data(true))),
        "(\"a\" > 1) = true"
    );
    assert_eq!(
        sql(&mut compiler, &is_null(eq(path("a"), data(1)))),
        "(\"a\" = 1) is null"
    );
    assert_eq!(
        sql(
            &mut compiler,
            &in_list(lt(path("a"), data(1)), vec![data(true), gt(path("b"), data(2))])
        ),
        "(\"a\" < 1) in (true,(\"b\" > 2))"
    );
    assert_eq!(
        sql(
            &mut compiler,
            &between(path("n"), data(1), and(vec![path("x")]))
        ),
        "\"n\" between 1 and ((\"x\"))"
    );
}

#[test]
fn aliases_are_dropped_where_sql_does_not_allow_them() {
    let mut compiler = QueryCompiler::default();
    let query = select(vec![])
        .from_source(source("t"))
        .filter(eq(path("a").aliased("x"), data(1)).aliased("y"))
        .group_by(path("k").aliased("g"))
        .order_by(order(path("n").aliased("o")));

    assert_eq!(
        sql(&mut compiler, &query.into()),
        "select * from \"t\" where \"a\" = 1 group by \"k\" order by \"n\" ASC"
    );
}

#[test]
fn reference_rewrite_rejects_grouped_selects() {
    let grouped: Expression = select(vec![path("k")])
        .from_source(source("t"))
        .group_by(path("k"))
        .into();

    assert!(matches!(
        returns_references(&grouped, &ReferenceOptions::default()),
        Err(CompilerError::Unsupported(_))
    ));
    assert!(registration_queries(&grouped, &ReferenceOptions::default()).is_err());
}

#[test]
fn aliasing_orders_and_unions_leaves_them_unchanged() {
    let node = Expression::Order(order(path("a")));
    assert_eq!(node.aliased("x"), node);
    assert_eq!(node.aliased("x").alias(), None);

    let node = union(vec![select(vec![]).from_source(source("t"))]);
    assert_eq!(node.aliased("x"), node);
}
