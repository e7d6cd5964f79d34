use filterdoc::{
    Filter, Operator, Operand, StatementValue,
    cli::{CliError, ConvertOptions, execute_convert, get_doc_category, load_strategy},
};
use serde_json::json;

fn run(filter: serde_json::Value, strategy: Option<serde_json::Value>) -> Result<serde_json::Value, CliError> {
    let options = ConvertOptions {
        filter: Some(filter.to_string()),
        strategy: strategy.map(|s| s.to_string()),
    };
    execute_convert(&options).map(|result| serde_json::to_value(result).unwrap())
}

fn clause(path: serde_json::Value, operator: &str, object: serde_json::Value) -> serde_json::Value {
    json!({"clause": {"subject": {"target": path}, "operator": operator, "object": object}})
}

#[test]
fn test_filter_json_form() {
    let filter: Filter = serde_json::from_value(json!({"statements": [
        {"conjunctive": "and", "value": clause(json!(["foo", 0]), "between", json!({"range": {"lower": 0, "upper": 42}}))},
        {"conjunctive": "or", "value": {"filter": {"statements": [
            {"value": clause(json!(["bar"]), "like", json!({"literal": "*x"}))}
        ]}}}
    ]}))
    .unwrap();

    assert_eq!(filter.statements.len(), 2);
    let StatementValue::Clause(first) = &filter.statements[0].value else {
        panic!("expected a clause");
    };
    assert_eq!(first.operator, Operator::Between);
    assert!(matches!(first.object, Operand::Range(_)));
    assert!(matches!(filter.statements[1].value, StatementValue::Filter(_)));
}

#[test]
fn test_unknown_operator_token_survives_decoding() {
    let filter: Filter = serde_json::from_value(json!({"statements": [
        {"value": clause(json!(["foo"]), "near", json!({"literal": 1}))}
    ]}))
    .unwrap();

    let StatementValue::Clause(clause) = &filter.statements[0].value else {
        panic!("expected a clause");
    };
    assert_eq!(clause.operator, Operator::Other("near".to_string()));
}

#[test]
fn test_execute_convert() {
    let filter = json!({"statements": [
        {"value": clause(json!(["foo"]), "eq", json!({"literal": 42}))},
        {"conjunctive": "and", "value": clause(json!(["bar", 0]), "lt", json!({"literal": 22.5}))}
    ]});

    assert_eq!(
        run(filter, None).unwrap(),
        json!({
            "fields": ["/foo", "/bar"],
            "document": {"$and": [{"foo": 42}, {"bar.0": {"$lt": 22.5}}]}
        })
    );
}

#[test]
fn test_execute_convert_with_strategy() {
    let filter = json!({"statements": [
        {"value": clause(json!(["secret"]), "eq", json!({"literal": "x"}))}
    ]});

    let err = run(filter, Some(json!({"deny": ["/secret"]}))).unwrap_err();
    assert!(matches!(err, CliError::Convert(_)));
    assert_eq!(err.to_string(), "Conversion error: Denied field encountered: /secret");
}

#[test]
fn test_invalid_strategy() {
    let filter = json!({"statements": []});
    let err = run(filter, Some(json!({"allow": ["/a"], "deny": ["/b"]}))).unwrap_err();
    assert!(matches!(err, CliError::Strategy(_)));
}

#[test]
fn test_empty_target_rejected_while_decoding() {
    let filter = json!({"statements": [
        {"value": clause(json!([]), "eq", json!({"literal": 1}))}
    ]});
    assert!(matches!(run(filter, None), Err(CliError::Json(_))));
}

#[test]
fn test_document_literal_rejected() {
    for literal in [json!({"$where": "sleep(1000)"}), json!({"$ne": null}), json!([{"$ne": null}])] {
        for operator in ["eq", "in"] {
            let filter = json!({"statements": [
                {"value": clause(json!(["pw"]), operator, json!({"literal": literal}))}
            ]});
            assert!(matches!(run(filter, None), Err(CliError::Convert(_))));
        }
    }

    let filter = json!({"statements": [
        {"value": clause(json!(["pw"]), "between", json!({"range": {"lower": {"$ne": null}, "upper": 1}}))}
    ]});
    assert!(matches!(run(filter, None), Err(CliError::Convert(_))));
}

#[test]
fn test_integer_beyond_i64_rejected_while_decoding() {
    let filter = r#"{"statements": [{"value": {"clause": {"subject": {"target": ["foo"]}, "operator": "eq", "object": {"literal": 18446744073709551615}}}}]}"#;
    let options = ConvertOptions {
        filter: Some(filter.to_string()),
        strategy: None,
    };
    assert!(matches!(execute_convert(&options), Err(CliError::Json(_))));
}

#[test]
fn test_no_input() {
    let err = execute_convert(&ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_load_strategy_from_file() {
    let path = std::env::temp_dir().join(format!("filterdoc-strategy-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"require": {"fields": ["/tenant"], "which": "all"}}"#).unwrap();

    let strategy = load_strategy(Some(format!("@{}", path.display()).as_str())).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(strategy.required_fields(), ["/tenant"]);
}

#[test]
fn test_docs() {
    assert!(get_doc_category("operators").unwrap().contains("$regex"));
    assert!(get_doc_category("policy").unwrap().contains("allow"));
    assert!(matches!(get_doc_category("nope"), Err(CliError::UnknownCategory(_))));
}
