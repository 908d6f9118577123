//! CLI integration tests covering the three subcommands in mock mode and
//! their validation failures.

mod common;

use common::TestContext;
use predicates::prelude::*;

// ---------------------------------------------------------------------------
// outline
// ---------------------------------------------------------------------------

#[test]
fn outline_mock_emits_structure_summing_to_duration() {
    let ctx = TestContext::new();

    let output = ctx
        .cli()
        .args(["outline", "--mock", "--topic", "ocean plastic", "--duration", "15"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("stdout should be JSON");
    let sections = value["suggested_structure"]["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 3);
    let total: u64 = sections.iter().map(|s| s["duration"].as_u64().unwrap()).sum();
    assert_eq!(total, 15);
    assert_eq!(sections[0]["type"], "opening");
    assert!(!value["research"].as_str().unwrap().is_empty());
    assert!(!value["hooks"].as_str().unwrap().is_empty());
}

#[test]
fn outline_rejects_short_duration() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["outline", "--mock", "--topic", "t", "--duration", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 9 minutes"));
}

#[test]
fn outline_without_api_key_fails_in_real_mode() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["outline", "--topic", "t", "--duration", "15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PODGEN_API_KEY"));
}

// ---------------------------------------------------------------------------
// prompts
// ---------------------------------------------------------------------------

#[test]
fn prompts_mock_emits_six_field_bundle() {
    let ctx = TestContext::new();

    let output = ctx
        .cli()
        .args(["prompts", "--mock", "--topic", "ocean plastic", "--duration", "15"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("stdout should be JSON");
    assert_eq!(value["source"], "generated");
    let bundle = &value["bundle"];
    for field in
        ["researchPrompt", "structurePrompt", "introPrompt", "factCheckPrompt", "conclusionPrompt"]
    {
        assert!(bundle[field].is_string(), "{field} should be present");
    }
    assert!(bundle["segmentPrompts"].is_array());
}

#[test]
fn prompts_requires_topic() {
    let ctx = TestContext::new();

    ctx.cli().args(["prompts", "--mock", "--duration", "15"]).assert().failure();
}

// ---------------------------------------------------------------------------
// script
// ---------------------------------------------------------------------------

#[test]
fn script_mock_generates_rated_script() {
    let ctx = TestContext::new();
    let bundle = ctx.write_prompt_bundle();

    let output = ctx
        .cli()
        .args([
            "script",
            "--mock",
            "--prompts",
            bundle.to_str().unwrap(),
            "--topic",
            "ocean plastic",
            "--duration",
            "15",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("stdout should be JSON");
    assert_eq!(value["variant"], "segmented");
    assert_eq!(value["target_word_count"], 2700);
    assert_eq!(value["script"]["segments"].as_array().unwrap().len(), 2);
    assert!(value["word_count"].as_u64().unwrap() > 0);

    let overall = value["rating"]["overall"].as_f64().unwrap();
    assert!((0.0..=5.0).contains(&overall));
}

#[test]
fn script_short_form_variant_has_one_segment() {
    let ctx = TestContext::new();
    let bundle = ctx.write_prompt_bundle();

    let output = ctx
        .cli()
        .args([
            "script",
            "--mock",
            "--prompts",
            bundle.to_str().unwrap(),
            "--topic",
            "ocean plastic",
            "--duration",
            "15",
            "--variant",
            "short-form",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("stdout should be JSON");
    assert_eq!(value["variant"], "short-form");
    assert_eq!(value["script"]["segments"].as_array().unwrap().len(), 1);
}

#[test]
fn script_rejects_bundle_missing_fields() {
    let ctx = TestContext::new();
    let path = ctx.write_prompts_file(r#"{"researchPrompt": "only one field"}"#);

    ctx.cli()
        .args([
            "script",
            "--mock",
            "--prompts",
            path.to_str().unwrap(),
            "--topic",
            "t",
            "--duration",
            "15",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("structurePrompt"));
}

#[test]
fn script_rejects_missing_prompts_file() {
    let ctx = TestContext::new();

    ctx.cli()
        .args([
            "script",
            "--mock",
            "--prompts",
            "does-not-exist.json",
            "--topic",
            "t",
            "--duration",
            "15",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// configuration
// ---------------------------------------------------------------------------

#[test]
fn invalid_config_is_rejected() {
    let ctx = TestContext::new();
    ctx.write_config("[api]\ntimeout_secs = 0\n");

    ctx.cli()
        .args(["outline", "--mock", "--topic", "t", "--duration", "15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn config_word_rate_changes_target() {
    let ctx = TestContext::new();
    ctx.write_config("[length]\nwords_per_minute = 100\nmargin = 1.0\n");
    let bundle = ctx.write_prompt_bundle();

    let output = ctx
        .cli()
        .args([
            "script",
            "--mock",
            "--prompts",
            bundle.to_str().unwrap(),
            "--topic",
            "t",
            "--duration",
            "10",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("stdout should be JSON");
    assert_eq!(value["target_word_count"], 1000);
}
