use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn gitfolio() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gitfolio"));
    // Isolate from the developer's real environment
    cmd.env_remove("GITFOLIO_CONFIG")
        .env_remove("GITFOLIO_FORMAT")
        .env_remove("GITFOLIO_PROJECTS_DIR")
        .env_remove("GITFOLIO_API_HOST")
        .env_remove("GITFOLIO_NO_CACHE")
        .env_remove("GITHUB_TOKEN");
    cmd
}

fn write_config(dir: &Path, projects_dir: Option<&Path>) -> PathBuf {
    let path = dir.join("config.yaml");
    let mut contents = String::from("github_token: test-token\n");
    if let Some(projects_dir) = projects_dir {
        contents.push_str(&format!("projects_dir: {}\n", projects_dir.display()));
    }
    contents.push_str("preferences:\n  refresh_minutes: 60\n");
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn write_project(dir: &Path, file: &str, title: &str, repo: Option<&str>) {
    let mut contents = format!(
        "# {}\n## Description\nA demo project.\n## Role\nAuthor\n## Features\n- One\n- Two\n",
        title
    );
    if let Some(repo) = repo {
        contents.push_str(&format!("## Repository\nhttps://github.com/{}\n", repo));
    }
    fs::write(dir.join(file), contents).expect("failed to write project");
}

#[test]
fn status_reports_missing_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("nope.yaml");

    gitfolio()
        .args(["status", "--config"])
        .arg(&missing)
        .env("GITFOLIO_CACHE_DIR", temp.path().join("cache"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration file found"));

    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let projects = temp.path().join("projects");
    fs::create_dir(&projects)?;
    let config_path = write_config(temp.path(), Some(&projects));

    let assert = gitfolio()
        .args(["status", "--config"])
        .arg(&config_path)
        .env("GITFOLIO_CACHE_DIR", temp.path().join("cache"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("GitHub token configured"));
    assert!(stdout.contains("Projects directory"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn cache_status_empty_store() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    gitfolio()
        .args(["cache", "status", "--config", "/nonexistent/gitfolio.yaml"])
        .env("GITFOLIO_CACHE_DIR", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries:       0"));

    Ok(())
}

#[test]
fn cache_status_json_for_unknown_repo() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    let assert = gitfolio()
        .args(["cache", "status", "octocat/demo", "--format", "json"])
        .args(["--config", "/nonexistent/gitfolio.yaml"])
        .env("GITFOLIO_CACHE_DIR", temp.path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["repository"], "octocat/demo");
    assert_eq!(value["cached"], false);
    assert_eq!(value["valid"], false);

    Ok(())
}

#[test]
fn cache_clear_on_empty_store() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    gitfolio()
        .args(["cache", "clear", "--config", "/nonexistent/gitfolio.yaml"])
        .env("GITFOLIO_CACHE_DIR", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache was already empty"));

    Ok(())
}

#[test]
fn cache_path_honors_cache_dir_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    let assert = gitfolio()
        .args(["cache", "path"])
        .env("GITFOLIO_CACHE_DIR", temp.path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&temp.path().to_string_lossy().to_string()));
    assert!(stdout.contains("repo_cache.json"));

    Ok(())
}

#[test]
fn show_with_empty_projects_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let projects = temp.path().join("projects");
    fs::create_dir(&projects)?;

    gitfolio()
        .arg("show")
        .arg("--projects-dir")
        .arg(&projects)
        .args(["--config", "/nonexistent/gitfolio.yaml", "--no-cache"])
        .env("GITFOLIO_CACHE_DIR", temp.path().join("cache"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No project files found"));

    Ok(())
}

#[test]
fn show_without_projects_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
    gitfolio()
        .arg("show")
        .args(["--config", "/nonexistent/gitfolio.yaml", "--no-cache"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Projects directory not configured"));

    Ok(())
}

#[test]
fn langs_rejects_malformed_repo_spec() -> Result<(), Box<dyn std::error::Error>> {
    gitfolio()
        .args(["langs", "not-a-repo", "--config", "/nonexistent/gitfolio.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a GitHub repository"));

    Ok(())
}

// ============================================================================
// HTTP-backed tests (mockito), opt-in via the http-tests feature
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn langs_renders_breakdown_from_api() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _languages = server
        .mock("GET", "/repos/octocat/demo/languages")
        .with_status(200)
        .with_body(r#"{"Rust": 3000, "Shell": 1000}"#)
        .create();
    let _info = server
        .mock("GET", "/repos/octocat/demo")
        .with_status(200)
        .with_body(r#"{"updated_at": "2024-03-01T12:00:00Z"}"#)
        .create();
    let _previews = server
        .mock("GET", "/repos/octocat/demo/contents/repo_Previews")
        .with_status(404)
        .create();

    let temp = tempdir()?;
    let assert = gitfolio()
        .args(["langs", "octocat/demo", "--no-cache"])
        .args(["--config", "/nonexistent/gitfolio.yaml"])
        .arg("--api-host")
        .arg(server.url())
        .env("GITFOLIO_CACHE_DIR", temp.path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Rust"));
    assert!(stdout.contains("75.0%"));
    assert!(stdout.contains("Shell"));
    assert!(stdout.contains("25.0%"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn chart_writes_svg_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _info = server
        .mock("GET", "/repos/octocat/demo")
        .with_status(200)
        .with_body(r#"{"updated_at": "2024-03-01T12:00:00Z"}"#)
        .create();
    let _languages = server
        .mock("GET", "/repos/octocat/demo/languages")
        .with_status(200)
        .with_body(r#"{"Rust": 3000}"#)
        .create();
    let _previews = server
        .mock("GET", "/repos/octocat/demo/contents/repo_Previews")
        .with_status(404)
        .create();

    let temp = tempdir()?;
    let out = temp.path().join("chart.svg");

    gitfolio()
        .args(["chart", "octocat/demo", "--no-cache", "-o"])
        .arg(&out)
        .args(["--config", "/nonexistent/gitfolio.yaml"])
        .arg("--api-host")
        .arg(server.url())
        .env("GITFOLIO_CACHE_DIR", temp.path())
        .assert()
        .success();

    let svg = fs::read_to_string(&out)?;
    assert!(svg.contains("<svg"));
    assert!(svg.contains("#dea584"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn show_renders_portfolio_table() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _info = server
        .mock("GET", "/repos/octocat/demo")
        .with_status(200)
        .with_body(r#"{"updated_at": "2024-03-01T12:00:00Z"}"#)
        .create();
    let _languages = server
        .mock("GET", "/repos/octocat/demo/languages")
        .with_status(200)
        .with_body(r#"{"Rust": 3000}"#)
        .create();
    let _previews = server
        .mock("GET", "/repos/octocat/demo/contents/repo_Previews")
        .with_status(200)
        .with_body(r#"[{"type": "file", "name": "a.png", "download_url": "https://raw.example/a.png"}]"#)
        .create();

    let temp = tempdir()?;
    let projects = temp.path().join("projects");
    fs::create_dir(&projects)?;
    write_project(&projects, "demo.md", "Demo Project", Some("octocat/demo"));
    write_project(&projects, "plain.md", "Plain Project", None);

    let assert = gitfolio()
        .arg("show")
        .arg("--projects-dir")
        .arg(&projects)
        .args(["--config", "/nonexistent/gitfolio.yaml"])
        .arg("--api-host")
        .arg(server.url())
        .env("GITFOLIO_CACHE_DIR", temp.path().join("cache"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Demo Project"));
    assert!(stdout.contains("Plain Project"));
    assert!(stdout.contains("2024-03-01"));
    assert!(stdout.contains("Rust 100.0%"));
    assert!(stdout.contains("fresh"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn show_survives_api_outage() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _info = server
        .mock("GET", "/repos/octocat/demo")
        .with_status(500)
        .with_body("upstream exploded")
        .create();

    let temp = tempdir()?;
    let projects = temp.path().join("projects");
    fs::create_dir(&projects)?;
    write_project(&projects, "demo.md", "Demo Project", Some("octocat/demo"));

    // Nothing cached, API failing: the command still succeeds and renders
    // the project with placeholder data
    let assert = gitfolio()
        .arg("show")
        .arg("--projects-dir")
        .arg(&projects)
        .args(["--config", "/nonexistent/gitfolio.yaml"])
        .arg("--api-host")
        .arg(server.url())
        .env("GITFOLIO_CACHE_DIR", temp.path().join("cache"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Demo Project"));
    assert!(stdout.contains("placeholder"));

    Ok(())
}
