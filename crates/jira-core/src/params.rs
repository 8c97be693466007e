//! Declared parameter rule sets and the validator that enforces them.
//!
//! Every operation names the keys it accepts, which of them are required and
//! what kind of value each key takes. Callers hand in any `Serialize` value;
//! it is converted to a JSON object and checked against the rule set before
//! anything is sent.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ParameterError, Result, Violation};

/// Parameter bag for a single operation call
pub type Parameters = serde_json::Map<String, Value>;

/// Kind of value a parameter key accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    /// JSON integer; floats are rejected
    Integer,
    /// JSON boolean; the strings "true"/"false" are rejected
    Boolean,
    /// Array of strings, or a single comma-separated string
    StringList,
    /// String from a fixed set of values
    OneOf(&'static [&'static str]),
    /// Any JSON object
    Object,
    /// Any JSON array
    Array,
    /// JSON object checked against nested rules
    Shape(&'static [Rule]),
}

impl ValueKind {
    /// Human readable description used in violation messages
    pub fn describe(&self) -> String {
        match self {
            ValueKind::String => "a string".to_string(),
            ValueKind::Integer => "an integer".to_string(),
            ValueKind::Boolean => "a boolean".to_string(),
            ValueKind::StringList => "a list of strings".to_string(),
            ValueKind::OneOf(allowed) => format!("one of [{}]", allowed.join(", ")),
            ValueKind::Object | ValueKind::Shape(_) => "an object".to_string(),
            ValueKind::Array => "an array".to_string(),
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::StringList => match value {
                Value::String(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            },
            ValueKind::OneOf(allowed) => value
                .as_str()
                .map(|s| allowed.contains(&s))
                .unwrap_or(false),
            ValueKind::Object | ValueKind::Shape(_) => value.is_object(),
            ValueKind::Array => value.is_array(),
        }
    }
}

/// A declared parameter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub key: &'static str,
    pub kind: ValueKind,
    pub required: bool,
}

impl Rule {
    pub const fn required(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }
}

/// The full schema of one operation's parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// `resource.operation`, used in error messages
    pub name: &'static str,
    pub rules: &'static [Rule],
}

impl RuleSet {
    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, rules }
    }

    /// A rule set that accepts no parameters at all
    pub const fn empty(name: &'static str) -> Self {
        Self { name, rules: &[] }
    }

    pub fn rule(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.key == key)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().filter(|r| r.required).map(|r| r.key)
    }

    /// Validate an already-built parameter map
    pub fn validate(&self, parameters: &Parameters) -> std::result::Result<(), ParameterError> {
        validate(parameters, self)
    }

    /// Convert a serializable value to parameters and validate it.
    ///
    /// `null` (e.g. `()` or `None`) is read as an empty parameter bag.
    pub fn check<P: Serialize + ?Sized>(&self, parameters: &P) -> Result<Parameters> {
        let parameters = match serde_json::to_value(parameters)? {
            Value::Object(map) => map,
            Value::Null => Parameters::new(),
            other => {
                return Err(ParameterError::single(
                    self.name,
                    Violation::NotAnObject {
                        found: json_type_name(&other).to_string(),
                    },
                )
                .into());
            }
        };

        self.validate(&parameters)?;
        Ok(parameters)
    }
}

/// Check `parameters` against `rule_set`, collecting every violation
pub fn validate(
    parameters: &Parameters,
    rule_set: &RuleSet,
) -> std::result::Result<(), ParameterError> {
    let mut violations = Vec::new();
    collect_violations(parameters, rule_set.rules, "", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ParameterError::new(rule_set.name, violations))
    }
}

fn collect_violations(
    parameters: &Parameters,
    rules: &[Rule],
    prefix: &str,
    violations: &mut Vec<Violation>,
) {
    for rule in rules {
        let key = format!("{}{}", prefix, rule.key);

        match parameters.get(rule.key) {
            None | Some(Value::Null) => {
                if rule.required {
                    violations.push(Violation::Missing { key });
                }
            }
            Some(value) if !rule.kind.accepts(value) => {
                violations.push(Violation::Mismatch {
                    key,
                    expected: rule.kind.describe(),
                });
            }
            Some(Value::Object(nested)) => {
                if let ValueKind::Shape(nested_rules) = rule.kind {
                    collect_violations(nested, nested_rules, &format!("{}.", key), violations);
                }
            }
            Some(_) => {}
        }
    }

    for key in parameters.keys() {
        if !rules.iter().any(|r| r.key == key) {
            violations.push(Violation::Unknown {
                key: format!("{}{}", prefix, key),
            });
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VISIBILITY: &[Rule] = &[
        Rule::required("type", ValueKind::OneOf(&["group", "role"])),
        Rule::required("value", ValueKind::String),
    ];

    const SEARCH: RuleSet = RuleSet::new(
        "issue.search",
        &[
            Rule::required("jql", ValueKind::String),
            Rule::optional("startAt", ValueKind::Integer),
            Rule::optional("maxResults", ValueKind::Integer),
            Rule::optional("fields", ValueKind::StringList),
            Rule::optional("validateQuery", ValueKind::OneOf(&["strict", "warn", "none"])),
        ],
    );

    const COMMENT: RuleSet = RuleSet::new(
        "comment.add",
        &[
            Rule::required("body", ValueKind::String),
            Rule::optional("visibility", ValueKind::Shape(VISIBILITY)),
            Rule::optional("properties", ValueKind::Array),
        ],
    );

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn accepts_declared_keys_with_valid_types() {
        let input = params(json!({
            "jql": "project = TEST",
            "startAt": 0,
            "maxResults": 50,
            "fields": ["summary", "status"],
            "validateQuery": "warn"
        }));
        let before = input.clone();

        assert!(validate(&input, &SEARCH).is_ok());
        assert_eq!(input, before);
    }

    #[test]
    fn string_list_accepts_comma_separated_string() {
        let input = params(json!({"jql": "x", "fields": "summary,status"}));
        assert!(SEARCH.validate(&input).is_ok());
    }

    #[test]
    fn rejects_missing_required_key() {
        let err = validate(&params(json!({"startAt": 0})), &SEARCH).unwrap_err();
        assert_eq!(err.operation, "issue.search");
        assert_eq!(
            err.violations,
            vec![Violation::Missing {
                key: "jql".to_string()
            }]
        );
    }

    #[test]
    fn null_counts_as_absent() {
        let err = validate(&params(json!({"jql": null})), &SEARCH).unwrap_err();
        assert!(err.concerns("jql"));

        let input = params(json!({"jql": "x", "startAt": null}));
        assert!(validate(&input, &SEARCH).is_ok());
    }

    #[test]
    fn rejects_unknown_key() {
        let err = validate(&params(json!({"jql": "x", "limit": 10})), &SEARCH).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::Unknown {
                key: "limit".to_string()
            }]
        );
    }

    #[test]
    fn rejects_type_mismatches() {
        let cases = [
            json!({"jql": 42}),
            json!({"jql": "x", "startAt": "0"}),
            json!({"jql": "x", "startAt": 1.5}),
            json!({"jql": "x", "fields": [1, 2]}),
            json!({"jql": "x", "fields": {"a": 1}}),
            json!({"jql": "x", "validateQuery": "loose"}),
            json!({"jql": "x", "validateQuery": true}),
        ];

        for case in cases {
            let input = params(case.clone());
            assert!(
                validate(&input, &SEARCH).is_err(),
                "expected violation for {}",
                case
            );
        }
    }

    #[test]
    fn accumulates_all_violations() {
        let err = validate(
            &params(json!({"startAt": "zero", "bogus": true})),
            &SEARCH,
        )
        .unwrap_err();

        assert_eq!(err.violations.len(), 3);
        assert!(err.concerns("jql"));
        assert!(err.concerns("startAt"));
        assert!(err.concerns("bogus"));
    }

    #[test]
    fn validates_nested_shape() {
        let ok = params(json!({
            "body": "hello",
            "visibility": {"type": "role", "value": "Administrators"}
        }));
        assert!(COMMENT.validate(&ok).is_ok());

        let err = COMMENT
            .validate(&params(json!({
                "body": "hello",
                "visibility": {"type": "team", "extra": 1}
            })))
            .unwrap_err();

        assert!(err.concerns("visibility.type"));
        assert!(err.concerns("visibility.value"));
        assert!(err.concerns("visibility.extra"));
    }

    #[test]
    fn shape_must_be_an_object() {
        let err = COMMENT
            .validate(&params(json!({"body": "x", "visibility": "group"})))
            .unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::Mismatch {
                key: "visibility".to_string(),
                expected: "an object".to_string()
            }]
        );
    }

    #[test]
    fn check_converts_serializable_values() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Search {
            jql: String,
            max_results: u32,
        }

        let parameters = SEARCH
            .check(&Search {
                jql: "project = TEST".to_string(),
                max_results: 10,
            })
            .unwrap();

        assert_eq!(parameters.get("maxResults"), Some(&json!(10)));
    }

    #[test]
    fn check_reads_null_as_empty() {
        let rules = RuleSet::empty("attachment.meta");
        assert!(rules.check(&()).unwrap().is_empty());
        assert!(SEARCH.check(&()).is_err());
    }

    #[test]
    fn check_rejects_non_objects() {
        let err = SEARCH.check(&json!(["jql"])).unwrap_err();
        match err {
            crate::JiraError::ParameterType(e) => {
                assert_eq!(
                    e.violations,
                    vec![Violation::NotAnObject {
                        found: "an array".to_string()
                    }]
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_rule_set_rejects_any_key() {
        let rules = RuleSet::empty("project.delete");
        assert!(rules.validate(&Parameters::new()).is_ok());
        assert!(rules.validate(&params(json!({"force": true}))).is_err());
    }

    #[test]
    fn required_keys_lists_only_required_rules() {
        let keys: Vec<_> = SEARCH.required_keys().collect();
        assert_eq!(keys, vec!["jql"]);
    }

    #[test]
    fn rule_lookup_by_key() {
        let jql = SEARCH.rule("jql").unwrap();
        assert!(jql.required);
        assert_eq!(jql.kind, ValueKind::String);

        let start_at = SEARCH.rule("startAt").unwrap();
        assert!(!start_at.required);
        assert_eq!(start_at.kind, ValueKind::Integer);

        assert!(SEARCH.rule("limit").is_none());
        assert!(COMMENT.rule("visibility").is_some());
    }
}
