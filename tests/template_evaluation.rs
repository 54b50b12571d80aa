// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end template evaluation tests

use jsontemplate::{EngineConfig, Template};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn render(template: Value, data: Value) -> Value {
    Template::from_value(template).evaluate_value(&data)
}

#[test]
fn test_evaluation_is_deterministic() {
    let template = Template::new(
        r#"{
            "type": "list",
            "title": "{{title | upcase}}",
            "items": {"$for": "item", "$in": "items", "$template": {"label": "{{item.name}} #{{loop.index}}"}},
            "footer": {"$if": "items", "$then": "{{items | size}} items", "$else": "empty"}
        }"#,
    )
    .unwrap();
    let data = r#"{"title": "inbox", "items": [{"name": "a"}, {"name": "b"}]}"#;

    let first = template.evaluate(data).unwrap();
    let second = template.evaluate(data).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        r##"{"type":"list","title":"INBOX","items":[{"label":"a #0"},{"label":"b #1"}],"footer":"2 items"}"##
    );
}

#[test]
fn test_pure_expression_preserves_type() {
    let data = json!({"x": [1, 2, 3], "flag": false, "obj": {"k": "v"}, "n": 2.5});
    let output = render(
        json!({"list": "{{x}}", "flag": "{{flag}}", "obj": " {{ obj }} ", "n": "{{n}}"}),
        data.clone(),
    );
    assert_eq!(output, json!({"list": [1, 2, 3], "flag": false, "obj": {"k": "v"}, "n": 2.5}));
}

#[test]
fn test_interpolation_always_strings() {
    assert_eq!(render(json!("Hi {{name}}!"), json!({"name": "Ann"})), json!("Hi Ann!"));
    assert_eq!(render(json!("{{a}}-{{b}}"), json!({"a": 1, "b": true})), json!("1-true"));
}

#[rstest]
#[case(json!(0))]
#[case(json!(""))]
#[case(json!([]))]
#[case(json!({}))]
#[case(json!(null))]
#[case(json!(false))]
fn test_falsy_conditions_select_else(#[case] value: Value) {
    let template = json!({"$if": "v", "$then": "then", "$else": "else"});
    assert_eq!(render(template, json!({"v": value})), json!("else"));
}

#[rstest]
#[case(json!("false"))]
#[case(json!(1))]
#[case(json!("x"))]
#[case(json!([0]))]
#[case(json!({"a": 1}))]
#[case(json!("0"))]
#[case(json!(true))]
fn test_truthy_conditions_select_then(#[case] value: Value) {
    let template = json!({"$if": "v", "$then": "then", "$else": "else"});
    assert_eq!(render(template, json!({"v": value})), json!("then"));
}

#[test]
fn test_absent_condition_selects_else() {
    let template = json!({"$if": "missing.deep", "$then": "then", "$else": "else"});
    assert_eq!(render(template, json!({})), json!("else"));
}

#[test]
fn test_missing_branch_yields_nothing() {
    let template = json!({"a": {"$if": "flag", "$then": 1}, "b": [{"$if": "flag", "$then": 1}]});
    assert_eq!(render(template, json!({"flag": false})), json!({"a": null, "b": []}));
}

#[test]
fn test_loop_scoping() {
    let template = json!({
        "rows": {
            "$for": "item",
            "$in": "items",
            "$template": ["{{loop.index}}", "{{loop.first}}", "{{loop.last}}", "{{item}}"]
        },
        "outside": "{{loop.index | default: 'none'}}"
    });
    let output = render(template, json!({"items": ["a", "b", "c"]}));
    assert_eq!(
        output,
        json!({
            "rows": [[0, true, false, "a"], [1, false, false, "b"], [2, false, true, "c"]],
            "outside": "none"
        })
    );
}

#[test]
fn test_filter_order() {
    assert_eq!(
        render(json!("{{x | upcase | truncate: 3}}"), json!({"x": "hello"})),
        json!("HEL...")
    );
    assert_eq!(
        render(json!("{{x | truncate: 3 | size}}"), json!({"x": "hello"})),
        json!(6)
    );
}

#[test]
fn test_date_auto_detection() {
    let template = json!({
        "seconds": "{{s | date: '%Y-%m-%d'}}",
        "millis": "{{ms | date: %Y-%m-%d}}"
    });
    let output = render(template, json!({"s": 1_700_000_000, "ms": 1_700_000_000_000_i64}));
    assert_eq!(output["seconds"], output["millis"]);
    assert_eq!(output["seconds"], json!("2023-11-14"));
}

#[test]
fn test_missing_path() {
    assert_eq!(render(json!("[{{a.b}}]"), json!({})), json!("[]"));
    assert_eq!(render(json!("{{a.b}}"), json!({})), Value::Null);
    assert_eq!(render(json!("{{a.b}}"), json!({"a": [1]})), Value::Null);
    assert_eq!(render(json!("{{a.0.b}}"), json!({"a": "text"})), Value::Null);
}

#[test]
fn test_array_splicing_vs_nesting() {
    let for_node = json!({"$for": "n", "$in": "numbers", "$template": {"value": "{{n}}"}});
    let data = json!({"numbers": [1, 2, 3]});

    let spliced = render(json!([{"type": "header"}, for_node.clone()]), data.clone());
    assert_eq!(
        spliced,
        json!([{"type": "header"}, {"value": 1}, {"value": 2}, {"value": 3}])
    );

    let nested = render(json!({"children": for_node}), data);
    assert_eq!(
        nested,
        json!({"children": [{"value": 1}, {"value": 2}, {"value": 3}]})
    );
}

#[test]
fn test_output_is_independent_of_data_model() {
    let template = Template::from_value(json!({"items": "{{items}}", "user": "{{user}}"}));
    let mut data = json!({"items": [1, 2], "user": {"name": "Ann"}});

    let output = template.evaluate_value(&data);
    data["items"][0] = json!(99);
    data["user"]["name"] = json!("Bob");

    assert_eq!(output, json!({"items": [1, 2], "user": {"name": "Ann"}}));
}

#[test]
fn test_evaluations_produce_independent_trees() {
    let template = Template::from_value(json!({"list": "{{items}}", "fixed": {"a": [1]}}));

    let mut first = template.evaluate_value(&json!({"items": ["x"]}));
    let second = template.evaluate_value(&json!({"items": ["y"]}));

    first["fixed"]["a"][0] = json!("changed");
    first["list"][0] = json!("changed");

    assert_eq!(second, json!({"list": ["y"], "fixed": {"a": [1]}}));
    assert_eq!(template.source(), &json!({"list": "{{items}}", "fixed": {"a": [1]}}));
}

#[test]
fn test_in_accepts_expression_and_literal() {
    let template = json!({
        "from_expression": {"$for": "t", "$in": "{{tags}}", "$template": "{{t | upcase}}"},
        "from_literal": {"$for": "n", "$in": [1, 2], "$template": "{{n}}"}
    });
    let output = render(template, json!({"tags": ["a", "b"]}));
    assert_eq!(output, json!({"from_expression": ["A", "B"], "from_literal": [1, 2]}));
}

#[test]
fn test_if_accepts_filtered_expression() {
    let template = json!([
        {"$if": "{{items | size}}", "$then": "has items"},
        {"$if": "{{items | not}}", "$then": "no items"}
    ]);
    assert_eq!(render(template.clone(), json!({"items": [1]})), json!(["has items"]));
    assert_eq!(render(template, json!({"items": []})), json!(["no items"]));
}

#[test]
fn test_if_true_default_chain() {
    let template = json!({
        "on": "{{a | if_true: 'X' | default: 'Y'}}",
        "off": "{{b | if_true: 'X' | default: 'Y'}}"
    });
    let output = render(template, json!({"a": true, "b": false}));
    assert_eq!(output, json!({"on": "X", "off": "Y"}));
}

#[test]
fn test_realistic_screen() {
    let template = json!({
        "type": "column",
        "children": [
            {"type": "text", "value": "{{user.name | default: 'Guest'}}", "style": "title"},
            {
                "$if": "user.premium",
                "$then": {"type": "badge", "label": "Premium"}
            },
            {
                "$for": "track",
                "$in": "playlist",
                "$template": {
                    "type": "row",
                    "title": "{{loop.index}}. {{track.title | escape}}",
                    "subtitle": "{{track.length | duration}}",
                    "selected": "{{track.selected}}"
                },
                "$empty": {"type": "text", "value": "No tracks"}
            },
            {"type": "text", "value": "Total: {{playlist | size}}"}
        ]
    });
    let data = json!({
        "user": {"name": "Ann", "premium": false},
        "playlist": [
            {"title": "Rock & Roll", "length": 185_000, "selected": true},
            {"title": "<Intro>", "length": 3_723_000}
        ]
    });

    assert_eq!(
        render(template, data),
        json!({
            "type": "column",
            "children": [
                {"type": "text", "value": "Ann", "style": "title"},
                {"type": "row", "title": "0. Rock &amp; Roll", "subtitle": "00:03:05", "selected": true},
                {"type": "row", "title": "1. &lt;Intro&gt;", "subtitle": "01:02:03", "selected": null},
                {"type": "text", "value": "Total: 2"}
            ]
        })
    );
}

#[test]
fn test_bounds_are_recoverable() {
    let template = Template::from_value_with_config(
        json!({
            "list": {"$for": "i", "$in": "items", "$template": "{{i}}"},
            "deep": {"a": {"b": {"c": 1}}},
            "after": "ok"
        }),
        EngineConfig::new(3, 2),
    );
    let output = template.evaluate_value(&json!({"items": [1, 2, 3, 4]}));
    assert_eq!(
        output,
        json!({"list": [1, 2], "deep": {"a": {"b": null}}, "after": "ok"})
    );
}

#[test]
fn test_invalid_template_is_rejected() {
    assert!(Template::new("{not json").is_err());
    assert!(Template::new("").is_err());
}
