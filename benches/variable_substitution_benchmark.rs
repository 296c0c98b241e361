//! Benchmarks for placeholder substitution, request building and response transforms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use modhead_refresh::executor::build_refresh_request;
use modhead_refresh::models::{HttpMethod, RefreshBody, RefreshConfig, Variable};
use modhead_refresh::variables::{
    substitute_variables, substitute_variables_in_object, transform_response,
};
use serde_json::json;

/// Generate a variable list with a specified number of entries.
fn generate_variables(num_vars: usize) -> Vec<Variable> {
    let mut variables: Vec<Variable> = (0..num_vars)
        .map(|i| Variable::new(i.to_string(), format!("var_{}", i), format!("value_{}", i)))
        .collect();

    variables.push(Variable::new("base", "baseUrl", "https://auth.example.com"));
    variables.push(Variable::new("client", "clientId", "client_123"));
    variables.push(Variable::new("secret", "clientSecret", "secret_456").sensitive());
    variables
}

/// Generate a string with a specified number of placeholder references.
fn generate_text_with_placeholders(num_refs: usize) -> String {
    let mut text = String::from("${baseUrl}/oauth/token?client_id=${clientId}");
    for i in 0..num_refs {
        text.push_str(&format!("&p{}=${{var_{}}}", i, i % 100));
    }
    text
}

fn bench_substitute_simple(c: &mut Criterion) {
    let variables = generate_variables(10);
    let text = "${baseUrl}/token?id=${clientId}&secret=${clientSecret}";

    c.bench_function("substitute_simple", |b| {
        b.iter(|| substitute_variables(black_box(text), black_box(&variables)))
    });
}

fn bench_substitute_large_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute_large_list");

    for size in [10, 100, 500, 1000].iter() {
        let variables = generate_variables(*size);
        let text = generate_text_with_placeholders(10);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| substitute_variables(black_box(&text), black_box(&variables)))
        });
    }

    group.finish();
}

fn bench_substitute_no_placeholders(c: &mut Criterion) {
    let variables = generate_variables(100);
    let text = "https://auth.example.com/oauth/token?grant_type=client_credentials";

    c.bench_function("substitute_no_placeholders", |b| {
        b.iter(|| substitute_variables(black_box(text), black_box(&variables)))
    });
}

fn bench_substitute_object(c: &mut Criterion) {
    let variables = generate_variables(50);
    let body = json!({
        "client_id": "${clientId}",
        "client_secret": "${clientSecret}",
        "nested": {"a": "${var_1}", "b": {"c": "${var_2}", "d": 42}},
        "scopes": ["read", "write"]
    });
    let obj = body.as_object().cloned().unwrap_or_default();

    c.bench_function("substitute_object", |b| {
        b.iter(|| substitute_variables_in_object(black_box(&obj), black_box(&variables)))
    });
}

fn bench_build_request(c: &mut Criterion) {
    let variables = generate_variables(50);
    let body = json!({"client_id": "${clientId}", "client_secret": "${clientSecret}"});
    let json_config = RefreshConfig::new(HttpMethod::POST, "${baseUrl}/token")
        .with_header("X-Client", "${clientId}")
        .with_body(RefreshBody::Structured(body.as_object().cloned().unwrap_or_default()));
    let form_config = json_config
        .clone()
        .with_header("Content-Type", "application/x-www-form-urlencoded");

    let mut group = c.benchmark_group("build_request");
    group.bench_function("json_body", |b| {
        b.iter(|| build_refresh_request(black_box(&json_config), black_box(&variables)))
    });
    group.bench_function("form_body", |b| {
        b.iter(|| build_refresh_request(black_box(&form_config), black_box(&variables)))
    });
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let response = json!({
        "token_type": "Bearer",
        "access_token": "abc.def.ghi",
        "expires_in": 3600,
        "data": {"user": {"id": 7, "roles": ["admin"]}}
    });

    let mut group = c.benchmark_group("transform_response");
    for (name, transform) in [
        ("whole", None),
        ("dot_path", Some("data.user.id")),
        ("template", Some("{token_type} ${access_token}")),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| transform_response(black_box(&response), black_box(transform)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_substitute_simple,
    bench_substitute_large_list,
    bench_substitute_no_placeholders,
    bench_substitute_object,
    bench_build_request,
    bench_transform,
);
criterion_main!(benches);
