use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_menu_lists_catalog() {
    let output = Command::new(cargo_bin!("tuckshop"))
        .arg("menu")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 4);
    assert_eq!(json["data"][0]["name"], "California Roll");
    assert_eq!(json["data"][0]["price"], "2.50");
}

#[test]
fn test_orders_lists_demo_orders() {
    let output = Command::new(cargo_bin!("tuckshop"))
        .arg("orders")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["student_name"], "Tim Serrano");
    assert_eq!(json["data"][1]["school"], "Equippers School");
}

#[test]
fn test_production_json() {
    let output = Command::new(cargo_bin!("tuckshop"))
        .arg("production")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["item"], "Prawn Rice and Seaweed ball No Prawns");
    assert_eq!(json["data"][0]["quantity"], 1);
    assert_eq!(
        json["data"][1]["item"],
        "Salmon Sushi Mix Platter Extra Kewpie Mayo Sauce"
    );
    assert_eq!(json["data"][1]["quantity"], 3);
}

#[test]
fn test_production_csv() {
    let mut cmd = Command::new(cargo_bin!("tuckshop"));
    cmd.args(["production", "--format", "csv"]);

    cmd.assert().success().stdout(
        "item,quantity\n\
         Prawn Rice and Seaweed ball No Prawns,1\n\
         Salmon Sushi Mix Platter Extra Kewpie Mayo Sauce,3\n",
    );
}

#[test]
fn test_missing_orders_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let mut cmd = Command::new(cargo_bin!("tuckshop"));
    cmd.arg("production").arg("--orders").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn test_corrupt_orders_file_is_reported() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "{ not json").unwrap();

    let mut cmd = Command::new(cargo_bin!("tuckshop"));
    cmd.arg("orders").arg("--orders").arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}
