use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn physlog(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("physlog").unwrap();
    cmd.env_remove("PHYSLOG_REGISTRY_DB")
        .env_remove("PHYSLOG_MEASUREMENT_DB")
        .env_remove("PHYSLOG_STRICT")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("physlog").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Athlete physical-test dashboard"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("physlog").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_registry_add_then_list() {
    let dir = TempDir::new().unwrap();
    physlog(&dir)
        .args(["registry", "add", "Taro", "Taro Sato", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("新しいIDが追加されました"));

    physlog(&dir)
        .args(["registry", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Taro Sato")
                .and(predicate::str::contains("\"identifier\": \"7\"")),
        );

    assert!(dir.path().join("id_database.db").exists());
}

#[test]
fn test_registry_rejects_non_integer_identifier() {
    let dir = TempDir::new().unwrap();
    physlog(&dir)
        .args(["registry", "add", "Taro", "Taro Sato", "seven"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IDは整数で入力してください"));
}

#[test]
fn test_measurement_for_unknown_subject_fails() {
    let dir = TempDir::new().unwrap();
    physlog(&dir)
        .args(["measurements", "add", "Nobody", "2024-01-01", "P", "Sprint", "5.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("入力された名前はIDリストに存在しません"));
}

#[test]
fn test_measurements_feed_chart() {
    let dir = TempDir::new().unwrap();
    physlog(&dir).args(["registry", "add", "Taro", "Taro Sato", "7"]).assert().success();
    for (date, result) in [("2024-01-01", "10.0"), ("2024-01-31", "20.0")] {
        physlog(&dir)
            .args(["measurements", "add", "Taro", date, "P", "Sprint", result])
            .assert()
            .success()
            .stdout(predicate::str::contains("P_Taro"));
    }

    physlog(&dir)
        .args(["chart", "Taro", "Sprint"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"status\": \"data\"")
                .and(predicate::str::contains("predicted")),
        );

    physlog(&dir)
        .args(["chart", "Taro", "Jump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("該当データがありません"));
}

#[test]
fn test_delete_last_on_empty_table() {
    let dir = TempDir::new().unwrap();
    physlog(&dir)
        .args(["measurements", "delete-last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("削除する行がありません"));
}
