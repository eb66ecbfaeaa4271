use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn feedscout_cmd() -> Command {
    Command::cargo_bin("feedscout").unwrap()
}

const STATE: &str = r#"{
  "http://daily.example": {
    "name": "Daily",
    "url": "http://daily.example",
    "status": "parsed",
    "rss": [
      {"category": "Economy", "url": "http://daily.example/rss/economy.xml"},
      {"category": null, "url": "http://daily.example/rss/all.xml"}
    ],
    "extra": {"mediamap": {"area": "Seoul"}},
    "from": "http://catalog.example/view?id=1",
    "site": {"/": {"ok": true, "text": "", "parsed": true}}
  },
  "http://down.example": {
    "name": "Down",
    "url": "http://down.example",
    "status": "unable",
    "rss": [],
    "extra": {},
    "from": "http://catalog.example/view?id=2",
    "site": {}
  }
}"#;

#[test]
fn test_help_lists_commands() {
    feedscout_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("step"))
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_step_help_shows_delay_and_state() {
    feedscout_cmd()
        .arg("step")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--delay"))
        .stdout(predicate::str::contains("--state"));
}

#[test]
fn test_status_on_missing_state() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("state.json");

    feedscout_cmd()
        .arg("status")
        .arg("--state")
        .arg(&state_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No publishers crawled yet."));
}

#[test]
fn test_status_counts_publishers() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("state.json");
    std::fs::write(&state_path, STATE).unwrap();

    feedscout_cmd()
        .arg("status")
        .env("FEEDSCOUT_STATE_PATH", state_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Publishers: 2"))
        .stdout(predicate::str::contains("unable: 1"))
        .stdout(predicate::str::contains("Feeds: 2"));
}

#[test]
fn test_export_writes_opml() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("state.json");
    let output = temp_dir.path().join("feeds.opml");
    std::fs::write(&state_path, STATE).unwrap();

    feedscout_cmd()
        .arg("export")
        .arg("--state")
        .arg(&state_path)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported feeds to"));

    let opml = std::fs::read_to_string(&output).unwrap();
    assert!(opml.contains("http://daily.example/rss/economy.xml"));
    assert!(!opml.contains("down.example"));
}

#[test]
fn test_invalid_pause_env_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("state.json");

    feedscout_cmd()
        .arg("status")
        .arg("--state")
        .arg(&state_path)
        .env("FEEDSCOUT_PAUSE_SECS", "later")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FEEDSCOUT_PAUSE_SECS"));
}
