use serde_json::json;
use stillwater::Validation;
use typegate::{
    args, args_varargs, boolean, define, dict, list, maybe, number, optional, shape, string,
    tuple, union, validate, Context, Failures, Mode, Type, ValidationResult, Value,
};

fn failures(result: ValidationResult<'_>) -> Failures<'_> {
    match result {
        Validation::Failure(failures) => failures,
        Validation::Success(()) => panic!("expected validation failure"),
    }
}

fn collect<'v>(value: &'v Value, ty: Type) -> ValidationResult<'v> {
    validate(value, ty, &Context::root(), Mode::Collect)
}

// ====== list Tests ======

#[test]
fn test_list_default_name() {
    assert_eq!(list(number()).name(), "Array<number>");
}

#[test]
fn test_list_renamed() {
    assert_eq!(list(number()).named("MyList").name(), "MyList");
}

#[test]
fn test_list_fails_if_not_an_array() {
    let value = Value::from(1i64);
    let report = failures(collect(&value, list(number())));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of array got 1, context: Array<number>"
    );
}

#[test]
fn test_list_fails_on_element_with_index_context() {
    let value = Value::from(json!([1, "s"]));
    let report = failures(collect(&value, list(number())));
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of number got \"s\", context: Array<number> / 1"
    );
}

#[test]
fn test_list_succeeds() {
    assert!(list(number()).is(&Value::from(json!([1, 2]))));
    assert!(list(number()).is(&Value::from(json!([]))));
}

#[test]
fn test_list_renamed_contexts_use_new_name() {
    let value = Value::from(json!(["s"]));
    let report = failures(collect(&value, list(number()).named("Ids")));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of number got \"s\", context: Ids / 0"
    );
}

#[test]
fn test_list_collects_all_element_failures_in_order() {
    let value = Value::from(json!(["a", 1, "b"]));
    let report = failures(collect(&value, list(number())));
    assert_eq!(report.len(), 2);
    let contexts: Vec<String> = report.iter().map(|f| f.context().to_string()).collect();
    assert_eq!(contexts, vec!["Array<number> / 0", "Array<number> / 2"]);
}

#[test]
fn test_list_fail_fast_stops_at_first_element() {
    let value = Value::from(json!(["a", 1, "b"]));
    let report = failures(validate(
        &value,
        list(number()),
        &Context::root(),
        Mode::FailFast,
    ));
    assert_eq!(report.len(), 1);
    assert_eq!(report.first().context().to_string(), "Array<number> / 0");
}

// ====== optional / maybe Tests ======

#[test]
fn test_optional_default_name() {
    assert_eq!(optional(number()).name(), "number?");
}

#[test]
fn test_optional_accepts_absent_but_not_null() {
    assert!(optional(number()).is(&Value::Absent));
    assert!(!optional(number()).is(&Value::Null));
    assert!(optional(number()).is(&Value::from(1i64)));
}

#[test]
fn test_maybe_default_name() {
    assert_eq!(maybe(number()).name(), "?number");
}

#[test]
fn test_maybe_accepts_null_but_not_absent() {
    assert!(maybe(number()).is(&Value::Null));
    assert!(!maybe(number()).is(&Value::Absent));
    assert!(maybe(number()).is(&Value::from(1i64)));
}

#[test]
fn test_maybe_delegation_appends_own_name_to_context() {
    let value = Value::from("s");
    let report = failures(collect(&value, maybe(number())));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of number got \"s\", context: ?number"
    );
}

#[test]
fn test_maybe_rejects_absent_with_context() {
    let report = failures(collect(&Value::Absent, maybe(number())));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of number got undefined, context: ?number"
    );
}

// ====== tuple Tests ======

#[test]
fn test_tuple_default_name() {
    assert_eq!(tuple([string(), number()]).name(), "[string, number]");
}

#[test]
fn test_tuple_fails_if_not_an_array() {
    let value = Value::from(1i64);
    let report = failures(collect(&value, tuple([string(), number()])));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of array got 1, context: [string, number]"
    );
}

#[test]
fn test_tuple_wrong_length_fails_against_the_tuple_itself() {
    let value = Value::from(json!(["s"]));
    let report = failures(collect(&value, tuple([string(), number()])));
    assert_eq!(report.len(), 1);
    let failure = report.first();
    assert_eq!(failure.expected().name(), "[string, number]");
    assert!(failure.context().is_empty());
    assert_eq!(
        failure.to_string(),
        "Expected an instance of [string, number] got [\"s\"], (no context)"
    );
}

#[test]
fn test_tuple_fails_on_position_with_index_context() {
    let value = Value::from(json!([1, 2]));
    let report = failures(collect(&value, tuple([string(), number()])));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of string got 1, context: [string, number] / 0"
    );
}

#[test]
fn test_tuple_succeeds() {
    assert!(tuple([string(), number()]).is(&Value::from(json!(["s", 1]))));
}

// ====== dict Tests ======

#[test]
fn test_dict_default_name() {
    assert_eq!(
        dict(string(), number()).name(),
        "{[key: string]: number}"
    );
}

#[test]
fn test_dict_fails_if_not_an_object() {
    let value = Value::from(1i64);
    let report = failures(collect(&value, dict(string(), number())));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of object got 1, context: {[key: string]: number}"
    );
}

#[test]
fn test_dict_fails_on_value_with_key_context() {
    let value = Value::from(json!({"a": "s"}));
    let report = failures(collect(&value, dict(string(), number())));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of number got \"s\", context: {[key: string]: number} / a"
    );
}

#[test]
fn test_dict_checks_keys_against_the_domain() {
    let short = define("short", |v| matches!(v, Value::Str(s) if s.len() <= 1));
    let value = Value::from(json!({"ab": 1}));
    let report = failures(collect(&value, dict(short, number())));
    assert_eq!(report.len(), 1);
    let failure = report.first();
    assert_eq!(failure.expected().name(), "short");
    assert_eq!(failure.actual(), &Value::from("ab"));
}

#[test]
fn test_dict_checks_key_and_value_per_entry_in_collect_mode() {
    let value = Value::from(json!({"a": "s"}));
    let report = failures(collect(&value, dict(number(), number())));
    assert_eq!(report.len(), 2);
    let actuals: Vec<String> = report
        .iter()
        .map(|f| f.actual().to_string())
        .collect();
    assert_eq!(actuals, vec!["a", "s"]);
}

#[test]
fn test_dict_accepts_empty_object() {
    assert!(dict(string(), number()).is(&Value::from(json!({}))));
}

#[test]
fn test_dict_succeeds() {
    assert!(dict(string(), number()).is(&Value::from(json!({"a": 1, "b": 2}))));
}

// ====== shape Tests ======

#[test]
fn test_shape_default_name() {
    assert_eq!(
        shape([("a", number()), ("b", string())]).name(),
        "{a: number; b: string;}"
    );
}

#[test]
fn test_shape_fails_if_not_an_object() {
    let value = Value::from(1i64);
    let report = failures(collect(&value, shape([("a", number()), ("b", string())])));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of object got 1, context: {a: number; b: string;}"
    );
}

#[test]
fn test_shape_fails_on_property_with_key_context() {
    let value = Value::from(json!({"a": 1, "b": 2}));
    let report = failures(collect(&value, shape([("a", number()), ("b", string())])));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of string got 2, context: {a: number; b: string;} / b"
    );
}

#[test]
fn test_shape_missing_key_yields_absent() {
    let value = Value::from(json!({}));
    let report = failures(collect(&value, shape([("a", maybe(number()))])));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of number got undefined, context: {a: ?number;} / a / ?number"
    );
}

#[test]
fn test_shape_missing_key_fails_plain_descriptor() {
    assert!(!shape([("a", number())]).is(&Value::from(json!({}))));
}

#[test]
fn test_shape_optional_property_tolerates_missing_key() {
    assert!(shape([("a", optional(number()))]).is(&Value::from(json!({}))));
    assert!(!shape([("a", optional(number()))]).is(&Value::from(json!({"a": null}))));
}

#[test]
fn test_shape_tolerates_extra_properties() {
    assert!(shape([("a", number())]).is(&Value::from(json!({"a": 1, "b": "extra"}))));
}

#[test]
fn test_shape_succeeds() {
    let value = Value::from(json!({"a": 1, "b": "s"}));
    assert!(shape([("a", number()), ("b", string())]).is(&value));
}

// ====== union Tests ======

#[test]
fn test_union_default_name() {
    assert_eq!(union([string(), number()]).name(), "string | number");
}

#[test]
fn test_union_fails_against_the_union_itself() {
    let value = Value::from(false);
    let report = failures(collect(&value, union([string(), number()])));
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of string | number got false, context: string | number"
    );
}

#[test]
fn test_union_succeeds_when_any_branch_accepts() {
    let id = union([string(), number()]);
    assert!(id.is(&Value::from(1i64)));
    assert!(id.is(&Value::from("s")));
    assert!(!id.is(&Value::from(true)));
}

// ====== args Tests ======

#[test]
fn test_args_name_without_varargs() {
    assert_eq!(args([number(), string()]).name(), "(number, string, ...any)");
}

#[test]
fn test_args_name_with_varargs() {
    assert_eq!(
        args_varargs([number(), string()], boolean()).name(),
        "(number, string, ...boolean)"
    );
}

#[test]
fn test_args_tolerates_extra_positional_arguments() {
    assert!(args([string(), number()]).is(&Value::from(json!(["s", 1, 2]))));
}

#[test]
fn test_args_pads_missing_arguments_with_absent() {
    let value = Value::from(json!([]));
    let report = failures(collect(&value, args([string(), number()])));
    assert_eq!(report.len(), 2);
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of string got undefined, context: arguments / [string, number] / 0"
    );
}

#[test]
fn test_args_validates_positionally() {
    let value = Value::from(json!([1]));
    let report = failures(collect(&value, args([string(), number()])));
    let contexts: Vec<String> = report.iter().map(|f| f.context().to_string()).collect();
    assert_eq!(
        contexts,
        vec![
            "arguments / [string, number] / 0",
            "arguments / [string, number] / 1"
        ]
    );
}

#[test]
fn test_args_succeeds() {
    assert!(args([string(), number()]).is(&Value::from(json!(["s", 1]))));
}

#[test]
fn test_args_varargs_validates_the_trailing_slice() {
    let signature = args_varargs(Vec::<Type>::new(), string());
    let value = Value::from(json!([1]));
    let report = failures(collect(&value, signature));
    assert_eq!(
        report.first().to_string(),
        "Expected an instance of string got 1, context: varargs / Array<string> / 0"
    );
}

#[test]
fn test_args_varargs_succeeds() {
    let signature = args_varargs(Vec::<Type>::new(), string());
    assert!(signature.is(&Value::from(json!(["a", "b"]))));
}

#[test]
fn test_args_varargs_indices_are_relative_to_the_slice() {
    let signature = args_varargs([string()], number());
    let value = Value::from(json!(["s", 1, "x"]));
    let report = failures(collect(&value, signature));
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.first().context().to_string(),
        "varargs / Array<number> / 1"
    );
}

// ====== Traversal Mode Tests ======

#[test]
fn test_collect_mode_reports_all_failures_in_declaration_order() {
    let person = shape([("name", string()), ("age", number())]);
    let value = Value::from(json!({"name": 1, "age": "x"}));

    let report = failures(collect(&value, person));
    assert_eq!(report.len(), 2);
    let contexts: Vec<String> = report.iter().map(|f| f.context().to_string()).collect();
    assert_eq!(
        contexts,
        vec![
            "{name: string; age: number;} / name",
            "{name: string; age: number;} / age"
        ]
    );
}

#[test]
fn test_fail_fast_mode_reports_exactly_one_failure() {
    let person = shape([("name", string()), ("age", number())]);
    let value = Value::from(json!({"name": 1, "age": "x"}));

    let report = failures(validate(&value, person, &Context::root(), Mode::FailFast));
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.first().context().to_string(),
        "{name: string; age: number;} / name"
    );
}

#[test]
fn test_shape_outer_mismatch_short_circuits_even_in_collect_mode() {
    let person = shape([("name", string()), ("age", number())]);
    let report = failures(collect(&Value::Null, person));
    assert_eq!(report.len(), 1);
}

// ====== Nesting Tests ======

#[test]
fn test_nested_combinators_accumulate_full_paths() {
    let users = list(shape([("name", string()), ("tags", list(string()))]));
    let value = Value::from(json!([
        {"name": "a", "tags": ["x"]},
        {"name": "b", "tags": ["y", 3]}
    ]));

    let report = failures(collect(&value, users));
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.first().context().to_string(),
        "Array<{name: string; tags: Array<string>;}> / 1 / {name: string; tags: Array<string>;} / tags / Array<string> / 1"
    );
}

#[test]
fn test_union_of_composites() {
    let value_type = union([list(number()), dict(string(), number())]);
    assert!(value_type.is(&Value::from(json!([1, 2]))));
    assert!(value_type.is(&Value::from(json!({"a": 1}))));
    assert!(!value_type.is(&Value::from(json!("nope"))));
}

#[test]
fn test_descriptors_are_reusable_across_validations() {
    let ids = list(number());
    for _ in 0..3 {
        assert!(ids.is(&Value::from(json!([1, 2]))));
        assert!(!ids.is(&Value::from(json!(["x"]))));
    }
}
