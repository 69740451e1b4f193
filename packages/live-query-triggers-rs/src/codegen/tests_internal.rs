fn codegen() -> PgTriggerCodegen {
    PgTriggerCodegen::new(TriggerOptions::default()).unwrap()
}

fn table(name: &str) -> Identifier {
    Identifier::parse(name).unwrap()
}

#[test]
fn registry_table_uses_configured_name() {
    let sql = codegen().create_registry_table().unwrap();
    assert!(sql.starts_with("create table if not exists live_query_trackings ("));
    assert!(sql.contains("fetchQuery text not null"));
    assert!(sql.contains("liveQuery text not null"));
    assert!(sql.contains("tracked text,"));
    assert!(sql.contains("channel text not null"));
}

#[test]
fn no_slot_markers_survive_rendering() {
    let codegen = codegen();
    let items = table("items");
    let mut all = codegen.create_functions().unwrap();
    all.push(codegen.create_registry_table().unwrap());
    all.append(codegen.create_triggers(&items).unwrap());
    all.append(codegen.drop_triggers(&items).unwrap());
    all.append(codegen.drop_functions().unwrap());

    for statement in all.statements() {
        assert!(!statement.contains("{{"), "{statement}");
        assert!(!statement.contains("}}"), "{statement}");
    }
}

#[test]
fn functions_follow_dependency_order() {
    let batch = codegen().create_functions().unwrap();
    let heads: Vec<&str> = batch
        .statements()
        .iter()
        .map(|s| s.lines().next().unwrap())
        .collect();

    assert_eq!(
        heads,
        vec![
            "create or replace function live_query_trackings_signature(query text) returns text as $signature$",
            "create or replace function live_query_trackings_fetched(query text) returns jsonb as $fetched$",
            "create or replace function live_query_trackings_func() returns trigger as $trigger$",
            "drop trigger if exists live_query_trackings_live_query_trackings_func on live_query_trackings;",
            "create trigger live_query_trackings_live_query_trackings_func",
            "create or replace function live_query_insert_update() returns trigger as $trigger$",
            "create or replace function live_query_delete() returns trigger as $trigger$",
            "create or replace function live_query_truncate() returns trigger as $trigger$",
        ]
    );
}

#[test]
fn row_functions_differ_only_in_row_variable() {
    let codegen = codegen();
    let insert_update = codegen.create_insert_update_function().unwrap();
    let delete = codegen.create_delete_function().unwrap();

    assert!(insert_update.contains("new.id::text || '/' || TG_TABLE_NAME"));
    assert!(insert_update.contains("return new;"));
    assert!(delete.contains("old.id::text || '/' || TG_TABLE_NAME"));
    assert!(delete.contains("return old;"));

    let normalize = |sql: &str| {
        sql.replace("live_query_delete", "live_query_insert_update")
            .replace("old.", "new.")
            .replace("return old;", "return new;")
    };
    assert_eq!(normalize(&delete), normalize(&insert_update));
}

#[test]
fn updates_also_check_the_previous_identity() {
    let sql = codegen().create_insert_update_function().unwrap();
    assert!(sql.contains(
        "if not affected and TG_OP = 'UPDATE' then\n      affected := tracked_identities ? (old.id::text || '/' || TG_TABLE_NAME);"
    ));
}

#[test]
fn fetched_ids_come_from_the_live_query() {
    let codegen = codegen();
    let helpers = codegen.create_helper_functions().unwrap().to_string();
    assert!(helpers.contains("jsonb_agg(to_jsonb(live.id))"));

    for sql in [
        codegen.create_insert_update_function().unwrap(),
        codegen.create_truncate_function().unwrap(),
    ] {
        assert!(sql.contains("fetched := live_query_trackings_fetched(registration.liveQuery);"));
        assert!(!sql.contains("fetchQuery"));
    }
}

#[test]
fn truncate_notification_has_no_row_id() {
    let sql = codegen().create_truncate_function().unwrap();
    assert!(sql.contains("'query', registration.id"));
    assert!(!sql.contains("'id',"));
    assert!(sql.contains("return null;"));
}

#[test]
fn triggers_are_replaced_not_duplicated() {
    let batch = codegen().create_triggers(&table("items")).unwrap();
    assert_eq!(
        batch.statements()[0],
        "drop trigger if exists items_live_query_insert_update on items;"
    );
    assert!(batch.statements()[1].starts_with("create trigger items_live_query_insert_update\n  after insert or update on items\n  for each row"));
    assert_eq!(
        batch.statements()[2],
        "drop trigger if exists items_live_query_delete on items;"
    );
    assert!(batch.statements()[3].contains("after delete on items"));
    assert_eq!(
        batch.statements()[4],
        "drop trigger if exists items_live_query_truncate on items;"
    );
    assert!(batch.statements()[5].contains("after truncate on items\n  for each statement"));
    assert_eq!(batch.len(), 6);
}

#[test]
fn drops_cover_every_generated_object() {
    let codegen = codegen();
    assert_eq!(
        codegen.drop_functions().unwrap().into_statements(),
        vec![
            "drop function if exists live_query_insert_update cascade;",
            "drop function if exists live_query_delete cascade;",
            "drop function if exists live_query_truncate cascade;",
            "drop function if exists live_query_trackings_func cascade;",
            "drop function if exists live_query_trackings_fetched cascade;",
            "drop function if exists live_query_trackings_signature cascade;",
        ]
    );
    assert_eq!(
        codegen.drop_registry_table().unwrap(),
        "drop table if exists live_query_trackings;"
    );
    assert_eq!(codegen.drop_triggers(&table("items")).unwrap().len(), 3);
}

#[test]
fn custom_names_flow_into_every_object() {
    let codegen = PgTriggerCodegen::new(TriggerOptions {
        registry_table: "watchers".to_string(),
        id_column: "uid".to_string(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(codegen.registry().as_str(), "watchers");
    let functions = codegen.create_functions().unwrap().to_string();
    assert!(functions.contains("watchers_signature(NEW.liveQuery)"));
    assert!(functions.contains("new.uid::text"));
    assert!(functions.contains("old.uid::text"));
    assert!(!functions.contains("live_query_trackings"));
}

#[test]
fn trigger_name_length_is_checked() {
    let long = "t".repeat(40);
    let err = codegen().create_triggers(&table(&long)).unwrap_err();
    assert!(matches!(err, crate::CodegenError::InvalidIdentifier { .. }));
}
