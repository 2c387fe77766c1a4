use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn qrsnap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qrsnap").unwrap();
    cmd.current_dir(dir.path());
    cmd.env("QRSNAP_DATA_DIR", dir.path());
    cmd
}

#[test]
fn generate_writes_a_png_and_records_history() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["generate", "--type", "url", "--out", "code.png", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved code.png"));

    let png = std::fs::read(dir.path().join("code.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    qrsnap(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("url"))
        .stdout(predicate::str::contains("1 of 1 entries"));
}

#[test]
fn empty_input_fails_without_side_effects() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["generate", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));

    qrsnap(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history is empty"));
}

#[test]
fn no_history_flag_skips_recording() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["generate", "--no-history", "--out", "code.png", "hello"])
        .assert()
        .success();

    qrsnap(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("history is empty"));
}

#[test]
fn history_favorite_delete_and_clear() {
    let dir = TempDir::new().unwrap();

    for content in ["one", "two"] {
        qrsnap(&dir)
            .args(["generate", "--out", "code.png", content])
            .assert()
            .success();
    }

    qrsnap(&dir)
        .args(["history", "favorite", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toggled favorite on entry 1"));

    qrsnap(&dir)
        .args(["history", "list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one"))
        .stdout(predicate::str::contains("two").not())
        .stdout(predicate::str::contains("1 of 2 entries"));

    qrsnap(&dir)
        .args(["history", "favorite", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no entry with id 999"));

    qrsnap(&dir)
        .args(["history", "delete", "2"])
        .assert()
        .success();

    qrsnap(&dir)
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared 1 entries"));
}

#[test]
fn export_then_import_restores_entries() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["generate", "--type", "email", "--out", "code.png", "a@b.com"])
        .assert()
        .success();

    qrsnap(&dir)
        .args(["history", "export", "backup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 1 entries"));

    qrsnap(&dir)
        .args(["history", "clear"])
        .assert()
        .success();

    qrsnap(&dir)
        .args(["history", "import", "backup.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 1 entries"));

    qrsnap(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a@b.com"));
}

#[test]
fn malformed_import_document_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

    qrsnap(&dir)
        .args(["generate", "--out", "code.png", "keep me"])
        .assert()
        .success();

    qrsnap(&dir)
        .args(["history", "import", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid json"));

    qrsnap(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me"));
}

#[test]
fn history_save_rewrites_the_stored_png() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["generate", "--out", "code.png", "hello"])
        .assert()
        .success();

    qrsnap(&dir)
        .args(["history", "save", "1", "--out", "again.png"])
        .assert()
        .success();

    let original = std::fs::read(dir.path().join("code.png")).unwrap();
    let saved = std::fs::read(dir.path().join("again.png")).unwrap();
    assert_eq!(original, saved);
}

#[test]
fn templates_list_and_use() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wifi-network"))
        .stdout(predicate::str::contains("business-card"));

    qrsnap(&dir)
        .args([
            "templates",
            "use",
            "wifi-network",
            "--set",
            "NETWORK_NAME=HomeNet",
            "--set",
            "PASSWORD=hunter2",
            "--out",
            "wifi.png",
        ])
        .assert()
        .success();

    assert!(dir.path().join("wifi.png").exists());

    qrsnap(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HomeNet"));
}

#[test]
fn generate_rejects_unknown_preset() {
    let dir = TempDir::new().unwrap();

    qrsnap(&dir)
        .args(["generate", "--preset", "neon", "--out", "code.png", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color preset"));
}
