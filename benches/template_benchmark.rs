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

use criterion::{Criterion, criterion_group, criterion_main};
use jsontemplate::Template;
use serde_json::{Value, json};
use std::hint::black_box;

const TEMPLATE: &str = r#"{
    "type": "column",
    "children": [
        {"type": "text", "value": "{{user.name | default: 'Guest' | upcase}}"},
        {"$if": "user.premium", "$then": {"type": "badge", "label": "Premium"}},
        {
            "$for": "track",
            "$in": "tracks",
            "$template": {
                "type": "row",
                "title": "{{loop.index}}. {{track.title | escape | truncate: 24}}",
                "length": "{{track.length | duration}}",
                "added": "{{track.added | date: '%d %b %Y'}}",
                "tags": "{{track.tags | join: ' / '}}"
            },
            "$empty": {"type": "text", "value": "No tracks"}
        }
    ]
}"#;

fn data_model(tracks: usize) -> Value {
    let tracks: Vec<Value> = (0..tracks)
        .map(|i| {
            json!({
                "title": format!("Track <{i}> & friends with a rather long name"),
                "length": 180_000 + i * 1_000,
                "added": 1_700_000_000 + i * 86_400,
                "tags": ["rock", "live"]
            })
        })
        .collect();
    json!({"user": {"name": "ann", "premium": true}, "tracks": tracks})
}

fn benchmark_construction(c: &mut Criterion) {
    c.bench_function("template_parse", |b| {
        b.iter(|| black_box(Template::new(black_box(TEMPLATE))))
    });
}

fn benchmark_evaluation(c: &mut Criterion) {
    let template = Template::new(TEMPLATE).expect("benchmark template parses");

    let mut group = c.benchmark_group("template_evaluate");
    for size in [10, 100, 1_000] {
        let data = data_model(size);
        group.bench_function(format!("tracks_{size}"), |b| {
            b.iter(|| black_box(template.evaluate_value(black_box(&data))))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_construction, benchmark_evaluation);
criterion_main!(benches);
