//! End-to-end runs of the `check-sourcemaps` binary.
use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::TestContext;

fn check_sourcemaps(ctx: &TestContext) -> Command {
    let mut cmd = Command::cargo_bin("check-sourcemaps").expect("Failed to find binary");
    cmd.current_dir(ctx.root()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_nobuild_passes_for_valid_maps() {
    let ctx = TestContext::valid_tree();
    check_sourcemaps(&ctx)
        .args(["--nobuild", "--root"])
        .arg(ctx.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS classic"))
        .stdout(predicate::str::contains("PASS module"))
        .stdout(predicate::str::contains("2/2 source map(s) verified"))
        .stdout(predicate::str::contains("All source maps are valid"));
}

#[test]
fn test_quiet_mode_prints_nothing_on_success() {
    let ctx = TestContext::valid_tree();
    check_sourcemaps(&ctx)
        .args(["--nobuild", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_map_fails() {
    let ctx = TestContext::new();
    check_sourcemaps(&ctx)
        .arg("--nobuild")
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL classic"))
        .stdout(predicate::str::contains("[load]"))
        .stderr(predicate::str::contains("missing_artifact"));
}

#[test]
fn test_map_without_mappings_fails_at_load() {
    let ctx = TestContext::valid_tree();
    let mut map = crate::common::classic_map();
    map.as_object_mut()
        .expect("map is an object")
        .remove("mappings");
    ctx.write_map("dist/v0.js.map", &map);

    check_sourcemaps(&ctx)
        .arg("--nobuild")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[load]"))
        .stderr(predicate::str::contains("malformed_artifact"));
}

#[test]
fn test_keep_going_reports_both_targets() {
    let ctx = TestContext::valid_tree();
    let mut map = crate::common::classic_map();
    map["sourceRoot"] = serde_json::json!("https://raw.githubusercontent.com/ampproject/amphtml/123/");
    ctx.write_map("dist/v0.js.map", &map);

    check_sourcemaps(&ctx)
        .args(["--nobuild", "--keep-going"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL classic"))
        .stdout(predicate::str::contains("[origin]"))
        .stdout(predicate::str::contains("PASS module"))
        .stdout(predicate::str::contains("1/2 source map(s) verified"))
        .stderr(predicate::str::contains("malformed_origin_url"));
}

#[test]
fn test_keep_going_prints_every_failure_message() {
    let ctx = TestContext::valid_tree();
    let mut map = crate::common::classic_map();
    map["sourceRoot"] = serde_json::json!("https://raw.githubusercontent.com/ampproject/amphtml/123/");
    ctx.write_map("dist/v0.js.map", &map);
    ctx.write_file("src/polyfills/abort-controller.js", "class AbortSignal {\n}\n");

    check_sourcemaps(&ctx)
        .args(["--nobuild", "--keep-going"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[origin]"))
        .stdout(predicate::str::contains("Badly formatted sourceRoot"))
        .stdout(predicate::str::contains("[sentinel]"))
        .stdout(predicate::str::contains("do not match the first line of code"))
        .stdout(predicate::str::contains("\"class AbortSignal {\""))
        .stdout(predicate::str::contains("0/2 source map(s) verified"));
}

#[test]
fn test_sentinel_mismatch_fails() {
    let ctx = TestContext::valid_tree();
    ctx.write_file(
        "src/polyfills/abort-controller.js",
        "export class AbortController {\n}\n",
    );

    check_sourcemaps(&ctx)
        .arg("--nobuild")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[sentinel]"))
        .stderr(predicate::str::contains("sentinel_mismatch"));
}

#[test]
fn test_config_file_overrides_sentinel() {
    let ctx = TestContext::valid_tree();
    ctx.write_file("src/polyfills/abort-controller.js", "'use strict';\n");
    let config = ctx.write_file(
        "sourcemaps.toml",
        "[sentinel]\nfile = \"src/polyfills/abort-controller.js\"\ncode = \"'use strict';\"\n",
    );

    check_sourcemaps(&ctx)
        .arg("--nobuild")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_invalid_explicit_config_fails() {
    let ctx = TestContext::valid_tree();
    let config = ctx.write_file("broken.toml", "[sentinel\n");

    check_sourcemaps(&ctx)
        .arg("--nobuild")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_config"));
}

#[cfg(unix)]
#[test]
fn test_build_failure_aborts_run() {
    let ctx = TestContext::valid_tree();
    let config = ctx.write_file("build.toml", "[build]\ncommand = \"false\"\nargs = []\n");

    check_sourcemaps(&ctx)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Building runtime: false"))
        .stdout(predicate::str::contains("PASS").not())
        .stderr(predicate::str::contains("build_failed"));
}

#[cfg(unix)]
#[test]
fn test_successful_build_then_verify() {
    let ctx = TestContext::valid_tree();
    let config = ctx.write_file("build.toml", "[build]\ncommand = \"true\"\nargs = []\n");

    check_sourcemaps(&ctx)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("All source maps are valid"));
}
