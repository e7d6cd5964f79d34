use filterdoc::{
    Clause, ConvertError, Filter, FieldList, Operator, PathSegment, RequireMode, RequireOptions,
    Strategy, StrategyError, StrategyOptions, Target, Value, convert_with,
};
use serde_json::json;

fn target(path: &[&str]) -> Target {
    Target::new(
        path.iter()
            .map(|s| match s.parse::<i64>() {
                Ok(n) => PathSegment::Index(n),
                Err(_) => PathSegment::Field(s.to_string()),
            })
            .collect(),
    )
    .unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// /foo eq 42 and /bar/0 lt 22
fn sample_filter() -> Filter {
    Filter::clause(Clause::new(target(&["foo"]), Operator::Eq, Value::Integer(42))).and(
        Clause::new(target(&["bar", "0"]), Operator::Lt, Value::Integer(22)),
    )
}

fn require(fields: &[&str], which: RequireMode) -> Strategy {
    Strategy::new(StrategyOptions {
        require: Some(RequireOptions {
            fields: Some(strings(fields)),
            which: Some(which),
        }),
        ..Default::default()
    })
    .unwrap()
}

// ========================================================================
// Construction
// ========================================================================

#[test]
fn test_default_is_unrestricted() {
    let strategy = Strategy::default();
    assert_eq!(strategy, Strategy::UNRESTRICTED);
    assert_eq!(strategy.field_list(), &FieldList::Unrestricted);
    assert!(strategy.required_fields().is_empty());
    assert_eq!(strategy.require_mode(), RequireMode::Any);
}

#[test]
fn test_allow_and_deny_rejected() {
    let result = Strategy::new(StrategyOptions {
        allow: Some(strings(&["/foo"])),
        deny: Some(strings(&["/foo"])),
        require: None,
    });
    assert_eq!(result, Err(StrategyError::AllowAndDeny));
}

#[test]
fn test_empty_lists_allowed_together() {
    let strategy = Strategy::new(StrategyOptions {
        allow: Some(vec![]),
        deny: Some(vec![]),
        require: None,
    })
    .unwrap();
    assert_eq!(strategy.field_list(), &FieldList::Unrestricted);
}

#[test]
fn test_from_json_shapes() {
    let cases = [
        (json!(42), StrategyError::OptionsNotObject),
        (json!({"allow": 42}), StrategyError::AllowNotArray),
        (json!({"allow": [1]}), StrategyError::AllowNotArray),
        (json!({"deny": "foo"}), StrategyError::DenyNotArray),
        (json!({"allow": ["/a"], "deny": ["/b"]}), StrategyError::AllowAndDeny),
        (json!({"require": 42}), StrategyError::RequireNotObject),
        (json!({"require": {"fields": 42}}), StrategyError::RequireFieldsNotArray),
        (json!({"require": {"which": "most"}}), StrategyError::InvalidRequireMode),
        (json!({"require": {"which": 1}}), StrategyError::InvalidRequireMode),
    ];

    for (options, expected) in cases {
        assert_eq!(Strategy::from_json(&options), Err(expected), "{}", options);
    }
}

#[test]
fn test_from_json_valid() {
    let strategy = Strategy::from_json(&json!({
        "deny": ["/secret"],
        "require": {"fields": ["/tenant"], "which": "all"}
    }))
    .unwrap();

    assert!(strategy.is_deny_list());
    assert_eq!(strategy.required_fields(), ["/tenant"]);
    assert_eq!(strategy.require_mode(), RequireMode::All);

    assert_eq!(Strategy::from_json(&json!(null)), Ok(Strategy::default()));
    assert_eq!(Strategy::from_json(&json!({})), Ok(Strategy::default()));
}

#[test]
fn test_options_deserialize() {
    let options: StrategyOptions =
        serde_json::from_value(json!({"allow": ["/foo"], "require": {"which": "any"}})).unwrap();
    let strategy = Strategy::try_from(options).unwrap();

    assert_eq!(strategy.field_list(), &FieldList::Allow(strings(&["/foo"])));
}

// ========================================================================
// Allow / deny
// ========================================================================

#[test]
fn test_denied_field() {
    let strategy = Strategy::from_json(&json!({"deny": ["/bar"]})).unwrap();
    let err = convert_with(&sample_filter(), &strategy).unwrap_err();

    assert_eq!(err, ConvertError::DeniedField("/bar".to_string()));
    assert_eq!(err.data(), Some(vec!["/bar"]));
    assert!(err.is_policy_violation());
}

#[test]
fn test_deny_list_not_referenced() {
    let strategy = Strategy::from_json(&json!({"deny": ["/baz"]})).unwrap();
    let result = convert_with(&sample_filter(), &strategy).unwrap();
    assert_eq!(result.fields, vec!["/foo", "/bar"]);
}

#[test]
fn test_unallowed_field() {
    let strategy = Strategy::from_json(&json!({"allow": ["/foo"]})).unwrap();
    let err = convert_with(&sample_filter(), &strategy).unwrap_err();
    assert_eq!(err, ConvertError::UnallowedField("/bar".to_string()));
}

#[test]
fn test_all_fields_allowed() {
    let strategy = Strategy::from_json(&json!({"allow": ["/foo", "/bar"]})).unwrap();
    assert!(convert_with(&sample_filter(), &strategy).is_ok());
}

#[test]
fn test_policy_checked_for_field_comparisons() {
    let filter = Filter::clause(Clause::new(target(&["foo"]), Operator::Eq, target(&["bar"])));
    let strategy = Strategy::from_json(&json!({"deny": ["/bar"]})).unwrap();

    assert_eq!(
        convert_with(&filter, &strategy),
        Err(ConvertError::DeniedField("/bar".to_string()))
    );
}

// ========================================================================
// Required fields
// ========================================================================

#[test]
fn test_missing_all_required() {
    let strategy = require(&["/foo", "/qux"], RequireMode::All);
    let err = convert_with(&sample_filter(), &strategy).unwrap_err();

    assert_eq!(
        err,
        ConvertError::RequiredField {
            fields: strings(&["/foo", "/qux"]),
            mode: RequireMode::All,
        }
    );
    assert_eq!(err.data(), Some(vec!["/foo", "/qux"]));
    assert!(err.to_string().contains("/qux"));
}

#[test]
fn test_contains_all_required() {
    let strategy = require(&["/foo", "/bar"], RequireMode::All);
    assert!(convert_with(&sample_filter(), &strategy).is_ok());
}

#[test]
fn test_missing_any_required() {
    let strategy = require(&["/baz", "/qux"], RequireMode::Any);
    assert!(matches!(
        convert_with(&sample_filter(), &strategy),
        Err(ConvertError::RequiredField { mode: RequireMode::Any, .. })
    ));
}

#[test]
fn test_contains_any_required() {
    let strategy = require(&["/baz", "/bar"], RequireMode::Any);
    assert!(convert_with(&sample_filter(), &strategy).is_ok());
}

#[test]
fn test_strategy_reused_across_threads() {
    let strategy = std::sync::Arc::new(Strategy::from_json(&json!({"allow": ["/foo", "/bar"]})).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let strategy = strategy.clone();
            std::thread::spawn(move || convert_with(&sample_filter(), &strategy).map(|r| r.fields))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), vec!["/foo", "/bar"]);
    }
}
