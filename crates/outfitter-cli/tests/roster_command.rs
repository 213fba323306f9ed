use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_outfitter_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("outfitter")
}

const ROSTER: &str = "\
Reservation #,Guest Name,Address,Country,Sex,T-Shirt,Shorts,Sport Cut Jersey,Womens Racerback Jersey,Socks,Virtuoso
100,John Smith,1 Main St,USA,Men,Mens XX-Large,,,,Yes,
100,Mary Smith,1 Main St,USA,Women,,,,Small,Yes,Anniversary trip
,,,,,,,,,,
300,Sam Lee,4 Oak Ave,USA,Men,,Mens Large,,,,
400,Sam Lee,8 Pine Ct,USA,Men,,,,,,";

const CONFIG: &str = r#"{
    "DISCOUNT_CODE": "TOUR10",
    "BILLING_ADDR": {
        "FIRST_NAME": "Ops", "LAST_NAME": "Desk", "COMPANY": "Tours Inc",
        "ADDRESS": "5 Office Park", "CITY": "Boulder", "STATE": "CO", "ZIP_CODE": "80301"
    },
    "PRODUCT_PAGES": {
        "Men Shirt": "https://shop.example.com/mens-tee",
        "Socks": "https://shop.example.com/socks"
    },
    "RES_PAGE": "https://res.example.com/r/"
}"#;

fn write_fixtures() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("gear.csv");
    let config = dir.path().join("secrets.json");
    fs::write(&roster, ROSTER).unwrap();
    fs::write(&config, CONFIG).unwrap();
    (dir, roster, config)
}

#[test]
fn test_roster_pretty_output() {
    let (_dir, roster, _) = write_fixtures();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster").arg(&roster);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Guest Roster"))
        .stdout(predicate::str::contains("shirt 2XL, socks LG/XL"))
        .stdout(predicate::str::contains("racerback SM, socks SM/MD"))
        .stdout(predicate::str::contains("Anniversary trip"))
        .stdout(predicate::str::contains("4 guests"))
        .stdout(predicate::str::contains("Sam Lee"));
}

#[test]
fn test_roster_json_output() {
    let (_dir, roster, _) = write_fixtures();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster").arg(&roster).arg("--format").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let guests = report["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 4);
    assert_eq!(guests[0]["name"], "John Smith");
    assert_eq!(guests[0]["items"][0]["page_key"], "Men Shirt");
    assert_eq!(guests[0]["items"][0]["size_code"], "2XL");
    assert_eq!(guests[2]["items"][0]["size_code"], "LG");
    assert_eq!(report["duplicate_names"], serde_json::json!(["Sam Lee"]));
    assert_eq!(report["missing_pages"], serde_json::json!([]));
}

#[test]
fn test_roster_check_pages_lists_missing() {
    let (_dir, roster, config) = write_fixtures();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster")
        .arg(&roster)
        .arg("--check-pages")
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(
        report["missing_pages"],
        serde_json::json!(["Men Short", "Racerback"])
    );
}

#[test]
fn test_roster_single_guest() {
    let (_dir, roster, _) = write_fixtures();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster").arg(&roster).arg("--guest").arg("Mary Smith");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Mary Smith"))
        .stdout(predicate::str::contains("John Smith").not())
        .stdout(predicate::str::contains("1 guests"));
}

#[test]
fn test_roster_unknown_guest_fails() {
    let (_dir, roster, _) = write_fixtures();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster").arg(&roster).arg("--guest").arg("Nobody");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Name not found"));
}

#[test]
fn test_roster_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("bad.csv");
    fs::write(&roster, "Reservation #,Guest Name\n1,A B\n").unwrap();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster").arg(&roster);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Address"));
}

#[test]
fn test_roster_unsupported_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let roster = dir.path().join("gear.txt");
    fs::write(&roster, ROSTER).unwrap();

    let mut cmd = Command::new(get_outfitter_bin());
    cmd.arg("roster").arg(&roster);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported roster format"));
}
