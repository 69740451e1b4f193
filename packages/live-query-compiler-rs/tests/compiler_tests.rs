use live_query_compiler_rs::language::*;
use live_query_compiler_rs::{
    compile, registration_queries, CompileOptions, Expression, LiteralMode, QueryCompiler,
    ReferenceOptions,
};
use serde_json::{json, Value};

fn assert_parses(sql: &str) {
    if let Err(err) = pg_query::parse(sql) {
        panic!("generated SQL does not parse: {err}\n{sql}");
    }
}

fn lifecycle_query(table: &str) -> Expression {
    select(vec![
        table_path(table, "id").aliased("_id"),
        table_path(table, "num"),
    ])
    .from_source(source(table))
    .filter(and(vec![
        gt(table_path(table, "num"), data(2)),
        lt(table_path(table, "num"), data(6)),
    ]))
    .order_by(order(table_path(table, "num")))
    .order_by(order(table_path(table, "id")))
    .limit(2)
    .into()
}

#[test]
fn compiled_queries_are_valid_postgres() {
    let queries = vec![
        lifecycle_query("test"),
        select(vec![data("x"), count_like_path()])
            .from_source(aliased_source("a", "b"))
            .filter(or(vec![
                in_list(path("k"), vec![data("a"), data("b"), data(3)]),
                between(path("n"), data(1), data(9)),
                like(path("s"), data("%x%")),
                is_null(path("z")),
                exists(select(vec![]).from_source(source("c"))),
            ]))
            .group_by(path("k"))
            .offset(1)
            .limit(5)
            .into(),
        union_all(vec![
            select(vec![path("id")]).from_source(source("a")),
            select(vec![path("id")]).from_source(source("b")),
        ]),
    ];

    for query in &queries {
        assert_parses(&compile(query).unwrap().sql);
        assert_parses(&QueryCompiler::inline().compile(query).unwrap().sql);
    }
}

fn count_like_path() -> Expression {
    table_path("b", "total").aliased("sum")
}

#[test]
fn bound_params_follow_placeholder_order() {
    let compiled = compile(&lifecycle_query("test")).unwrap();
    assert!(compiled.params.is_empty());

    let query: Expression = select(vec![data("first")])
        .from_source(source("t"))
        .filter(and(vec![
            eq(path("a"), data("second")),
            in_list(path("b"), vec![data("third"), data(4), data(Value::Null)]),
        ]))
        .into();

    let compiled = QueryCompiler::new(CompileOptions {
        literals: LiteralMode::Bind,
    })
    .compile(&query)
    .unwrap();

    assert_eq!(
        compiled.sql,
        "select $1 from \"t\" where (\"a\" = $2) and (\"b\" in ($3,4,$4))"
    );
    assert_eq!(
        compiled.params,
        vec![json!("first"), json!("second"), json!("third"), Value::Null]
    );
}

#[test]
fn registration_pair_is_valid_postgres() {
    let queries = registration_queries(&lifecycle_query("test"), &ReferenceOptions::default()).unwrap();

    assert_eq!(
        queries.fetch_query,
        "select \"test\".\"id\" as \"_id\",\"test\".\"num\" from \"test\" where (\"test\".\"num\" > 2) and (\"test\".\"num\" < 6) order by \"test\".\"num\" ASC,\"test\".\"id\" ASC limit 2"
    );
    assert_eq!(
        queries.live_query,
        "select \"test\".\"id\" as \"id\",'test' as \"table\" from \"test\" where (\"test\".\"num\" > 2) and (\"test\".\"num\" < 6) order by \"test\".\"num\" ASC,\"test\".\"id\" ASC limit 2"
    );
    assert_parses(&queries.fetch_query);
    assert_parses(&queries.live_query);
}

#[test]
fn expressions_round_trip_through_json() {
    let json = json!({
        "type": "select",
        "returns": [{ "type": "path", "table": "t", "column": "id", "as": "key" }],
        "from": [{ "table": "t" }],
        "where": {
            "type": "comparison",
            "op": "eq",
            "operands": [
                { "type": "path", "column": "kind" },
                { "type": "data", "value": "a" }
            ]
        },
        "order": [{ "expr": { "type": "path", "column": "id" }, "descending": true }],
        "limit": 1
    });

    let expression = Expression::from_json(&json.to_string()).unwrap();
    let expected: Expression = select(vec![table_path("t", "id").aliased("key")])
        .from_source(source("t"))
        .filter(eq(path("kind"), data("a")))
        .order_by(order_desc(path("id")))
        .limit(1)
        .into();

    assert_eq!(expression, expected);
    assert_eq!(
        compile(&expression).unwrap().sql,
        "select \"t\".\"id\" as \"key\" from \"t\" where \"kind\" = $1 order by \"id\" DESC limit 1"
    );
}

#[test]
fn nested_predicates_and_aliased_clauses_are_valid_postgres() {
    let query: Expression = select(vec![path("k").aliased("key")])
        .from_source(source("t"))
        .filter(and(vec![
            eq(path("flag"), or(vec![eq(path("a"), data(1)), eq(path("b"), data(2))])),
            eq(gt(path("a"), data(1)), data(true)),
        ]))
        .group_by(path("k").aliased("g"))
        .order_by(order(path("k").aliased("o")))
        .into();

    assert_parses(&compile(&query).unwrap().sql);
}
