use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const MOVEEZ_ENV: &[&str] = &[
    "MOVEEZ_CONFIG",
    "MOVEEZ_FORMAT",
    "MOVEEZ_REGION",
    "MOVEEZ_TMDB_KEY",
    "MOVEEZ_OMDB_KEY",
    "MOVEEZ_TMDB_HOST",
    "MOVEEZ_OMDB_HOST",
    "MOVEEZ_NO_CACHE",
    "MOVEEZ_DEBUG",
];

/// The binary with a clean moveez environment.
fn moveez() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("moveez"));
    for var in MOVEEZ_ENV {
        cmd.env_remove(var);
    }
    cmd
}

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).expect("failed to write config");
    path
}

#[test]
fn version_prints_package_version() {
    moveez()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "tmdb_api_key: test-key\nregion: GB\n");

    let assert = moveez()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("TMDB API key configured"));
    assert!(stdout.contains("OMDb API key not configured"));
    assert!(stdout.contains("Region: GB"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_without_config_file_shows_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("missing.yaml");

    moveez()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("not created yet"))
        .stdout(predicate::str::contains("Region: US"));

    Ok(())
}

#[test]
fn lowercase_region_in_config_file_is_normalised() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "tmdb_api_key: test-key\nregion: gb\n");

    moveez()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Region: GB"));

    Ok(())
}

#[test]
fn catalogue_commands_require_tmdb_key() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("missing.yaml");

    moveez()
        .arg("popular")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key not set"));

    Ok(())
}

#[test]
fn invalid_region_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "tmdb_api_key: test-key\n");

    moveez()
        .args(["browse", "--region", "usa", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("two-letter country code"));

    Ok(())
}

#[test]
fn page_zero_is_a_usage_error() {
    moveez()
        .args(["popular", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--page"));
}

#[test]
fn completion_generates_script() {
    moveez()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moveez"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn search_uses_custom_tmdb_host() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _search = server
        .mock("GET", "/search/movie")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("api_key".into(), "test-key".into()),
            mockito::Matcher::UrlEncoded("query".into(), "fight club".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"page": 1, "total_pages": 1, "total_results": 1, "results": [
                {"id": 550, "title": "Fight Club", "release_date": "1999-10-15", "vote_average": 8.4}
            ]}"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "tmdb_api_key: test-key\n");

    let assert = moveez()
        .args(["search", "fight club", "--format", "table", "--config"])
        .arg(&config_path)
        .env("MOVEEZ_TMDB_HOST", server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Fight Club"));
    assert!(stdout.contains("1999"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn upstream_error_message_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _popular = server
        .mock("GET", "/movie/popular")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(r#"{"status_code": 7, "status_message": "Invalid API key: You must be granted a valid key."}"#)
        .create();

    moveez()
        .args(["popular", "--tmdb-key", "bad-key", "--tmdb-host"])
        .arg(server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("401"))
        .stderr(predicate::str::contains("Invalid API key"))
        .stderr(predicate::str::contains("moveez status"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn details_renders_when_side_lookups_fail() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _details = server
        .mock("GET", "/movie/550")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"id": 550, "title": "Fight Club", "release_date": "1999-10-15",
                "runtime": 139, "external_ids": {"imdb_id": "tt0137523"}}"#,
        )
        .create();
    let _providers = server
        .mock("GET", "/movie/550/watch/providers")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .create();
    // The IMDb id already arrives with the details payload
    let external = server
        .mock("GET", "/movie/550/external_ids")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .expect(0)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "tmdb_api_key: test-key\n");

    let assert = moveez()
        .args(["details", "550", "--format", "json", "--config"])
        .arg(&config_path)
        .env("MOVEEZ_TMDB_HOST", server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(json["data"]["details"]["title"], "Fight Club");
    assert!(json["data"]["ratings"].is_null());
    assert!(
        json["data"]["warnings"][0]
            .as_str()
            .unwrap_or_default()
            .contains("Providers unavailable")
    );
    external.assert();

    Ok(())
}
