#[test]
fn accepts_lowercase_snake_case_names() {
    for name in ["test", "_private", "table_2", "a"] {
        assert_eq!(Identifier::parse(name).unwrap().as_str(), name);
    }
}

#[test]
fn rejects_names_that_would_need_quoting() {
    for name in ["", "Test", "2table", "my-table", "a b", "t\"x", "t;drop", "tåble"] {
        assert!(
            matches!(
                Identifier::parse(name),
                Err(CodegenError::InvalidIdentifier { .. })
            ),
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn enforces_postgres_length_limit() {
    let longest = "a".repeat(MAX_IDENTIFIER_LEN);
    assert!(Identifier::parse(&longest).is_ok());
    assert!(Identifier::parse(&format!("{longest}a")).is_err());

    let base = Identifier::parse(&"b".repeat(60)).unwrap();
    assert!(base.suffixed("xy").is_ok());
    assert!(base.suffixed("xyz").is_err());
}
