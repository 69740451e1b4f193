const GREETING: Template = Template {
    name: "greeting",
    text: "drop trigger if exists {{table}}_{{ function }} on {{table}};",
};

fn ident(name: &str) -> Identifier {
    Identifier::parse(name).unwrap()
}

#[test]
fn fills_every_slot_occurrence() {
    let table = ident("items");
    let function = ident("on_change");

    assert_eq!(
        render(&GREETING, &[("table", &table), ("function", &function)]).unwrap(),
        "drop trigger if exists items_on_change on items;"
    );
}

#[test]
fn missing_slot_value_fails() {
    let table = ident("items");
    let err = render(&GREETING, &[("table", &table)]).unwrap_err();

    assert!(matches!(err, CodegenError::Template(message) if message.contains("function")));
}

#[test]
fn unterminated_marker_fails() {
    let broken = Template {
        name: "broken",
        text: "select {{table",
    };
    assert!(render(&broken, &[("table", &ident("t"))]).is_err());
}

#[test]
fn text_without_markers_is_unchanged() {
    let plain = Template {
        name: "plain",
        text: "select $1, '$$' from t",
    };
    assert_eq!(render(&plain, &[]).unwrap(), "select $1, '$$' from t");
}
