use assert_cmd::Command;
use predicates::prelude::*;

fn verger(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("verger").unwrap();
    cmd.env("HOME", home);
    cmd
}

#[test]
fn full_workflow_from_init_to_reports() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("parish-data");

    verger(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized verger"));

    verger(home.path())
        .args(["subparish", "add", "Musha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added sub-parish: Musha"));

    verger(home.path())
        .args(["bec", "add", "St. Paul", "--subparish", "Musha"])
        .assert()
        .success();

    verger(home.path())
        .args([
            "faithful", "add", "Jean Bosco",
            "--subparish", "Musha",
            "--bec", "St. Paul",
            "--contact", "0788000001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jean Bosco"));

    verger(home.path())
        .args([
            "contribution", "add",
            "--faithful", "1",
            "--amount", "1000",
            "--date", "2023-04-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("year 2023"));

    verger(home.path())
        .args([
            "contribution", "add",
            "--faithful", "1",
            "--amount", "500",
            "--date", "2024-04-10",
        ])
        .assert()
        .success();

    verger(home.path())
        .args(["report", "matrix"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Jean Bosco")
                .and(predicate::str::contains("2023"))
                .and(predicate::str::contains("2024"))
                .and(predicate::str::contains("1,500.00")),
        );

    verger(home.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Musha").and(predicate::str::contains("1,500.00")));

    verger(home.path())
        .args(["report", "total", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,000.00"));

    verger(home.path())
        .args(["report", "years"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024").and(predicate::str::contains("2023")));

    verger(home.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sub-parishes:   1")
                .and(predicate::str::contains("Contributions:  2")),
        );
}

#[test]
fn bec_filter_without_subparish_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("parish-data");

    verger(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    verger(home.path())
        .args(["report", "matrix", "--bec", "St. Paul"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --subparish"));
}

#[test]
fn unknown_subparish_reported_as_error() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("parish-data");

    verger(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    verger(home.path())
        .args(["report", "summary", "--subparish", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sub-parish"));
}

#[test]
fn demo_then_matrix_shows_all_subparishes() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("parish-data");

    verger(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success();

    verger(home.path())
        .args(["demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded!"));

    // Second run must not duplicate anything.
    verger(home.path())
        .args(["demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already loaded"));

    verger(home.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Musha")
                .and(predicate::str::contains("Nyakariro"))
                .and(predicate::str::contains("Rugarama")),
        );
}
