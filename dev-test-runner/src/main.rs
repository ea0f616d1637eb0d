use anyhow::{ensure, Result};
use json_shape::emit::emit_model;
use json_shape::seed::seeds_from_values;
use json_shape::{reduce, upgrade, MergeError};
use serde_json::{json, Value};

/// Realistic API payload samples for one entity:
/// - keys that come and go between samples
/// - numbers that are sometimes fractional
/// - URLs and both date formats hiding in strings
/// - nested records inside arrays
fn realistic_samples() -> Vec<Value> {
    vec![
        json!({
            "id": 1001,
            "login": "ada",
            "avatar_url": "https://avatars.example.com/u/1001?v=4",
            "created_at": "2017-04-03T10:01:22.123456+0000",
            "birthday": "1815-12-10",
            "rating": 4,
            "is_admin": false,
            "repos": [
                {"name": "engine", "stars": 12, "homepage": "https://engine.example.com"},
                {"name": "notes", "stars": 3, "homepage": "https://notes.example.com"}
            ],
            "bio": null
        }),
        json!({
            "id": 1002,
            "login": "charles",
            "avatar_url": "https://avatars.example.com/u/1002?v=4",
            "created_at": "2018-11-21T08:45:00.000001+0000",
            "rating": 4.5,
            "is_admin": true,
            "repos": [],
            "bio": "Difference engines."
        }),
        json!({
            "id": 1003,
            "login": "grace",
            "avatar_url": "https://avatars.example.com/u/1003?v=4",
            "created_at": "2019-01-01T00:00:00.000000+0000",
            "birthday": "1906-12-09",
            "rating": 5,
            "is_admin": false,
            "repos": [{"name": "cobol", "stars": 1959, "topics": ["compilers"]}],
            "location": {"city": "Arlington", "geo": {"lat": 38.88, "lng": -77.1}}
        }),
    ]
}

fn run_realistic_samples() -> Result<()> {
    let samples = realistic_samples();
    let merged = reduce(seeds_from_values(&samples, "user"))?;
    let user = upgrade(&merged, "user")?;
    let model = emit_model(&user);
    println!("{}", serde_json::to_string_pretty(&model)?);

    ensure!(model["root"] == "User", "root type: {}", model["root"]);
    let names: Vec<&str> = model["types"]
        .as_array()
        .map(|types| types.iter().filter_map(|t| t["name"].as_str()).collect())
        .unwrap_or_default();
    ensure!(names == ["User", "Repo", "Location", "Geo"], "types: {names:?}");
    Ok(())
}

fn run_mismatched_samples() -> Result<()> {
    let samples = vec![json!({"id": 1}), json!({"id": "one"})];
    match reduce(seeds_from_values(&samples, "user")) {
        Err(error @ MergeError::UnsupportedMerge { .. }) => {
            eprintln!("✅ rejected as expected: {error}");
            Ok(())
        }
        other => anyhow::bail!("expected an unsupported merge, got {other:?}"),
    }
}

fn main() -> Result<()> {
    run_realistic_samples()?;
    run_mismatched_samples()?;
    Ok(())
}
