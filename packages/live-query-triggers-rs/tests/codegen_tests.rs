use live_query_compiler_rs::language::*;
use live_query_triggers_rs::{
    CodegenError, Identifier, NewRegistration, PgTriggerCodegen, StatementBatch, TableWrapper,
    TriggerCodegen, TriggerOptions,
};

fn wrapper() -> TableWrapper<PgTriggerCodegen> {
    TableWrapper::new(PgTriggerCodegen::new(TriggerOptions::default()).unwrap())
}

fn assert_parses(batch: &StatementBatch) {
    for statement in batch.statements() {
        if let Err(err) = pg_query::parse(statement) {
            panic!("generated SQL does not parse: {err}\n{statement}");
        }
    }

    // The joined form is what a simple-query round trip sends.
    let joined = batch.to_string();
    let parsed = pg_query::parse(&joined).unwrap();
    assert_eq!(parsed.protobuf.stmts.len(), batch.len());
}

#[test]
fn lifecycle_statements_are_valid_postgres() {
    let wrapper = wrapper();
    assert_parses(&wrapper.init().unwrap());
    assert_parses(&wrapper.wrap("items").unwrap());
    assert_parses(&wrapper.unwrap("items").unwrap());
    assert_parses(&wrapper.deinit().unwrap());
    assert_parses(&wrapper.listen("live_query_1"));
    assert_parses(&wrapper.unlisten("live_query_1"));
}

#[test]
fn function_bodies_are_valid_plpgsql() {
    let codegen = PgTriggerCodegen::new(TriggerOptions::default()).unwrap();
    let mut functions = codegen.create_helper_functions().unwrap().into_statements();
    functions.push(codegen.create_registry_function().unwrap());
    functions.push(codegen.create_insert_update_function().unwrap());
    functions.push(codegen.create_delete_function().unwrap());
    functions.push(codegen.create_truncate_function().unwrap());

    for function in &functions {
        if let Err(err) = pg_query::parse_plpgsql(function) {
            panic!("generated function does not parse: {err}\n{function}");
        }
    }
}

#[test]
fn custom_options_generate_valid_sql() {
    let options = TriggerOptions::from_json(
        r#"{"registryTable": "watchers", "truncateFunction": "watch_truncate", "idColumn": "uid"}"#,
    )
    .unwrap();
    assert_eq!(options.insert_update_function, "live_query_insert_update");

    let wrapper = TableWrapper::new(PgTriggerCodegen::new(options).unwrap());
    let init = wrapper.init().unwrap();
    assert_parses(&init);
    assert!(init.to_string().contains("create table if not exists watchers"));
    assert!(wrapper
        .wrap("docs")
        .unwrap()
        .to_string()
        .contains("create trigger docs_watch_truncate"));
}

#[test]
fn installing_twice_replaces_rather_than_duplicates() {
    let wrapper = wrapper();
    let first = wrapper.wrap("items").unwrap();
    let second = wrapper.wrap("items").unwrap();
    assert_eq!(first, second);

    // Each create trigger is preceded by a drop of the same trigger.
    for pair in first.statements().chunks(2) {
        let name = pair[1]
            .strip_prefix("create trigger ")
            .and_then(|rest| rest.lines().next())
            .unwrap();
        assert!(pair[0].starts_with(&format!("drop trigger if exists {name} on items")));
    }

    for statement in wrapper.init().unwrap().statements() {
        assert!(
            statement.starts_with("create table if not exists")
                || statement.starts_with("create or replace function")
                || statement.starts_with("drop trigger if exists")
                || statement.starts_with("create trigger"),
            "{statement}"
        );
    }
}

#[test]
fn invalid_names_never_reach_sql() {
    let wrapper = wrapper();
    let long = "x".repeat(64);
    for table in ["Items", "items\"; drop table x; --", "1items", long.as_str()] {
        assert!(matches!(
            wrapper.wrap(table),
            Err(CodegenError::InvalidIdentifier { .. })
        ));
    }

    for json in [
        r#"{"registryTable": "Live"}"#,
        r#"{"deleteFunction": ""}"#,
        r#"{"idColumn": "id; --"}"#,
    ] {
        assert!(TriggerOptions::from_json(json).is_err(), "{json}");
    }

    // Derived names are checked too: <registry>_signature must fit.
    let options = TriggerOptions {
        registry_table: "r".repeat(60),
        ..Default::default()
    };
    assert!(options.validate().is_err());
    assert!(PgTriggerCodegen::new(options).is_err());
}

#[test]
fn registration_round_trip_through_wrapper() {
    let wrapper = wrapper();
    let expr = select(vec![])
        .from_source(source("items"))
        .filter(and(vec![gt(path("num"), data(2)), lt(path("num"), data(6))]))
        .order_by(order(path("num")))
        .limit(2)
        .into_expression();

    let registration =
        NewRegistration::from_expression(&expr, "live_items", &TriggerOptions::default()).unwrap();
    pg_query::parse(&registration.fetch_query).unwrap();
    pg_query::parse(&registration.live_query).unwrap();

    let insert = wrapper.register(&registration);
    pg_query::parse(&insert.sql).unwrap();
    assert_eq!(insert.params.len(), 3);

    let remove = wrapper.unregister(1);
    pg_query::parse(&remove.sql).unwrap();
}

#[test]
fn trait_defaults_compose_required_methods() {
    let codegen = PgTriggerCodegen::new(TriggerOptions::default()).unwrap();
    let table = Identifier::parse("items").unwrap();

    let mut expected = codegen.create_insert_update_trigger(&table).unwrap();
    expected.append(codegen.create_delete_trigger(&table).unwrap());
    expected.append(codegen.create_truncate_trigger(&table).unwrap());
    assert_eq!(codegen.create_triggers(&table).unwrap(), expected);
}
