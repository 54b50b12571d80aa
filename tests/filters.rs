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

//! Filter catalog behaviour through template expressions

use jsontemplate::Template;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn fixture() -> Value {
    json!({
        "name": "Ann Lee",
        "empty": "",
        "zero": 0,
        "html": "<b>\"Tom\" & 'Jerry'</b>",
        "tags": ["rust", "json", "ui"],
        "mixed": ["a", 1, null, true],
        "profile": {"city": "Oslo", "zip": "0150"},
        "elapsed": 3_723_000,
        "created": 1_700_000_000,
        "created_ms": 1_700_000_000_123_i64,
        "iso": "2024-03-05T14:07:09Z"
    })
}

fn eval(expression: &str) -> Value {
    Template::from_value(json!(expression)).evaluate_value(&fixture())
}

#[rstest]
#[case("{{name | default: 'Guest'}}", json!("Ann Lee"))]
#[case("{{empty | default: 'Guest'}}", json!("Guest"))]
#[case("{{missing | default: \"Guest\"}}", json!("Guest"))]
#[case("{{zero | default}}", Value::Null)]
#[case("{{tags | size}}", json!(3))]
#[case("{{name | size}}", json!(7))]
#[case("{{profile | size}}", json!(2))]
#[case("{{zero | size}}", json!(0))]
#[case("{{name | truncate: 3}}", json!("Ann..."))]
#[case("{{name | truncate: 20}}", json!("Ann Lee"))]
#[case("{{html | escape}}", json!("&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"))]
#[case("{{name | upcase}}", json!("ANN LEE"))]
#[case("{{name | downcase}}", json!("ann lee"))]
#[case("{{zero | upcase}}", json!(0))]
#[case("{{profile | json}}", json!(r#"{"city":"Oslo","zip":"0150"}"#))]
#[case("{{missing | json}}", json!("null"))]
#[case("{{zero | not}}", json!(true))]
#[case("{{name | negate}}", json!(false))]
#[case("{{name | if_true: 'yes'}}", json!("yes"))]
#[case("{{empty | if_true: 'yes'}}", json!(""))]
#[case("{{elapsed | duration}}", json!("01:02:03"))]
#[case("{{tags | first}}", json!("rust"))]
#[case("{{tags | last}}", json!("ui"))]
#[case("{{name | first}}", Value::Null)]
#[case("{{tags | join}}", json!("rust, json, ui"))]
#[case("{{tags | join: ' | '}}", json!("rust | json | ui"))]
#[case("{{mixed | join: -}}", json!("a-1--true"))]
#[case("{{zero | append: ' items'}}", json!("0 items"))]
#[case("{{name | prepend: 'Dr. '}}", json!("Dr. Ann Lee"))]
#[case("{{created | date: '%Y-%m-%d'}}", json!("2023-11-14"))]
#[case("{{created_ms | date: '%H:%M:%S'}}", json!("22:13:20"))]
#[case("{{iso | date: '%d %b %Y, %I:%M %p'}}", json!("05 Mar 2024, 02:07 PM"))]
#[case("{{name | date: '%Y'}}", json!("Ann Lee"))]
#[case("{{name | no_such_filter}}", json!("Ann Lee"))]
fn test_filter(#[case] expression: &str, #[case] expected: Value) {
    assert_eq!(eval(expression), expected);
}

#[test]
fn test_filter_argument_is_not_evaluated() {
    assert_eq!(eval("{{missing | default: name}}"), json!("name"));
    assert_eq!(eval("{{missing | default: 'profile.city'}}"), json!("profile.city"));
}

#[test]
fn test_first_returns_independent_copy() {
    let data = json!({"rows": [{"id": 1}]});
    let template = Template::from_value(json!("{{rows | first}}"));

    let mut output = template.evaluate_value(&data);
    output["id"] = json!(2);

    assert_eq!(data["rows"][0]["id"], json!(1));
}

#[test]
fn test_filters_in_interpolation() {
    assert_eq!(
        eval("{{name | upcase}} has {{tags | size}} tags: {{tags | join: '/'}}"),
        json!("ANN LEE has 3 tags: rust/json/ui")
    );
}
