use assert_cmd::prelude::*;

use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::process::Command;

/// Command for the `campus` binary, isolated from any user config.
/// `HOME` and `XDG_CONFIG_HOME` point at an empty directory so the user
/// config dir lookup finds nothing.
fn campus_cmd() -> Command {
  let home = std::env::temp_dir().join(format!("campus-cli-home-{}", std::process::id()));
  std::fs::create_dir_all(&home).unwrap();

  let mut cmd = Command::cargo_bin("campus").expect("binary exists");
  cmd
    .env_remove("CAMPUS_CONFIG")
    .env("NO_COLOR", "1")
    .env("HOME", &home)
    .env("XDG_CONFIG_HOME", home.join(".config"));
  cmd.current_dir(&home);
  cmd
}

fn json_output(args: &[&str]) -> Value {
  let output = campus_cmd().args(args).args(["--format", "json"]).output().unwrap();
  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
  serde_json::from_slice(&output.stdout).unwrap()
}

fn item_ids(value: &Value) -> Vec<String> {
  value["items"].as_array().unwrap().iter().map(|item| item["id"].as_str().unwrap().to_string()).collect()
}

#[test]
fn test_available_rooms_in_bloque_38() {
  let value = json_output(&["classrooms", "--building", "Bloque 38", "--status", "available"]);
  assert_eq!(value["collection"], "classrooms");
  assert_eq!(value["total"], 2);
  assert_eq!(item_ids(&value), vec!["a1", "a3"]);
}

#[test]
fn test_capacity_buckets() {
  assert_eq!(json_output(&["classrooms", "--capacity", "<30"])["total"], 1);
  assert_eq!(json_output(&["classrooms", "--capacity", "30-50"])["total"], 7);
  assert_eq!(json_output(&["classrooms", "--capacity", ">50"])["total"], 2);
}

#[test]
fn test_invalid_bucket_is_rejected() {
  campus_cmd()
    .args(["classrooms", "--capacity", "lots"])
    .assert()
    .failure()
    .stderr(contains("Invalid numeric bucket"));
}

#[test]
fn test_pretty_classrooms_show_counts() {
  campus_cmd()
    .args(["classrooms", "--search", "38"])
    .assert()
    .success()
    .stdout(contains("38-101").and(contains("38-405")).and(contains("2 disponibles · 2 ocupadas · 4 total")));
}

#[test]
fn test_events_sorted_by_date() {
  let value = json_output(&["events"]);
  assert_eq!(item_ids(&value), vec!["e2", "e3", "e5", "e1", "e4"]);

  let workshops = json_output(&["events", "--type", "workshop"]);
  assert_eq!(item_ids(&workshops), vec!["e2"]);
}

#[test]
fn test_accent_insensitive_search() {
  campus_cmd()
    .args(["restaurants", "-s", "cafeteria"])
    .assert()
    .success()
    .stdout(contains("Cafetería Central"));
}

#[test]
fn test_restaurants_open_summary() {
  campus_cmd().args(["restaurants"]).assert().success().stdout(contains("4 abiertos de 5"));
  campus_cmd()
    .args(["restaurants", "-t", "Restaurante"])
    .assert()
    .success()
    .stdout(contains("Restaurante de Posgrados").and(contains("0 abiertos de 1")));
}

#[test]
fn test_ratings_keep_their_decimal_value() {
  let value = json_output(&["restaurants"]);
  let ratings: Vec<f64> = value["items"].as_array().unwrap().iter().map(|r| r["rating"].as_f64().unwrap()).collect();
  assert_eq!(ratings, vec![4.5, 4.3, 4.7, 4.1, 4.4]);
}

#[test]
fn test_empty_result() {
  campus_cmd().args(["directory", "-s", "zzz"]).assert().success().stdout(contains("No matches found"));

  let value = json_output(&["directory", "-s", "zzz"]);
  assert_eq!(value["total"], 0);
  assert_eq!(value["items"], Value::Array(vec![]));
}

#[test]
fn test_group_toggles() {
  let value = json_output(&["groups", "--toggle", "3", "--toggle", "5", "--toggle", "5"]);
  let interested: Vec<bool> =
    value["items"].as_array().unwrap().iter().map(|group| group["interested"].as_bool().unwrap()).collect();
  assert_eq!(interested, vec![false, false, true, false, false, false, false, false]);
}

#[test]
fn test_unknown_group_toggle_fails() {
  campus_cmd()
    .args(["groups", "--toggle", "99"])
    .assert()
    .failure()
    .stderr(contains("No record with id '99' in groups"));
}

#[test]
fn test_categories() {
  campus_cmd()
    .args(["categories", "calendar"])
    .assert()
    .success()
    .stdout(contains("evento").and(contains("matricula")).and(contains("examen")));
}

#[test]
fn test_sources_summary() {
  campus_cmd().args(["sources"]).assert().success().stdout(contains("3 de 4 fuentes verificadas"));
}

#[test]
fn test_ask() {
  campus_cmd()
    .args(["ask", "horario", "de", "la", "biblioteca"])
    .assert()
    .success()
    .stdout(contains("Carlos Gaviria Díaz").and(contains("Salas de estudio")));

  let value = json_output(&["ask", "qué", "hay", "de", "comer?"]);
  assert!(value["text"].as_str().unwrap().starts_with("Entiendo tu consulta"));
}

#[test]
fn test_chat_session_over_stdin() {
  assert_cmd::Command::from_std(campus_cmd())
    .args(["chat", "--name", "Ana", "--no-delay"])
    .write_stdin("¿dónde queda el bloque 38?\n3\nsalir\nhorario de la biblioteca\n")
    .assert()
    .success()
    .stdout(
      contains("¡Hola Ana!")
        .and(contains("El Bloque 38 se encuentra en la zona norte"))
        .and(contains("Entiendo tu consulta"))
        .and(contains("Salas de estudio").not()),
    );
}

#[test]
fn test_chat_number_without_suggestion_is_sent_as_text() {
  assert_cmd::Command::from_std(campus_cmd())
    .args(["chat", "--name", "Ana", "--no-delay", "--format", "json"])
    .write_stdin("2026\n")
    .assert()
    .success()
    .stdout(contains("Entiendo tu consulta"));
}

#[test]
fn test_login() {
  campus_cmd()
    .args(["login", "--email", "ana@eafit.edu.co", "--password", "x", "--format", "json"])
    .assert()
    .success()
    .stdout(contains("\"role\": \"student\"").and(contains("\"name\": \"ana\"")));

  campus_cmd().args(["login", "--guest"]).assert().success().stdout(contains("Invitado"));

  campus_cmd()
    .args(["login", "--email", " ", "--password", "x"])
    .assert()
    .failure()
    .stderr(contains("Email must not be empty"));
}

#[test]
fn test_settings_toggles() {
  let output = campus_cmd()
    .args(["settings", "--toggle", "dark-mode", "--toggle", "general-notifications", "--format", "json"])
    .output()
    .unwrap();
  let value: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(value["dark_mode"], true);
  assert_eq!(value["notifications"]["general"], false);
  assert_eq!(value["notifications"]["events"], true);
}

#[test]
fn test_custom_data_file() {
  let temp = assert_fs::TempDir::new().unwrap();
  let data = temp.path().join("data.yaml");
  std::fs::write(
    &data,
    "classrooms:\n  - { id: x1, name: Sala Única, building: Bloque 1, capacity: 12, available: true, floor: 1 }\n",
  )
  .unwrap();
  let config = temp.path().join("campus.json");
  std::fs::write(&config, serde_json::json!({ "data_path": data }).to_string()).unwrap();

  let output = campus_cmd()
    .args(["classrooms", "--format", "json", "--config"])
    .arg(&config)
    .output()
    .unwrap();
  let value: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(item_ids(&value), vec!["x1"]);

  temp.close().unwrap();
}

#[test]
fn test_duplicate_ids_in_data_file_fail() {
  let temp = assert_fs::TempDir::new().unwrap();
  let data = temp.path().join("data.yaml");
  std::fs::write(
    &data,
    "map:\n  - { id: m, name: A, kind: building, x: 1, y: 1, description: a }\n  - { id: m, name: B, kind: library, x: 2, y: 2, description: b }\n",
  )
  .unwrap();
  let config = temp.path().join("campus.json");
  std::fs::write(&config, serde_json::json!({ "data_path": data }).to_string()).unwrap();

  campus_cmd()
    .args(["map", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(contains("Failed to load campus data").and(contains("Duplicate id 'm' in map")));

  temp.close().unwrap();
}
