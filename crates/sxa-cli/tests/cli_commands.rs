//! Integration tests for the sxa CLI commands.
#![allow(deprecated)] // Command::cargo_bin: macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small three-planet world.
fn test_world() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("locations.txt"),
        "earth\nHome world.\nmars\nThe red planet.\nvenus\nCloud-wrapped furnace.\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("connections.txt"),
        "earth\n2\nmars\nvenus\n---\nmars\n1\nearth\n---\nvenus\n1\nearth\n---\n",
    )
    .unwrap();
    fs::write(dir.path().join("enemies.txt"), "mars\nWarrior\n90\n16\n").unwrap();
    fs::write(
        dir.path().join("properties.txt"),
        "# test properties\nmars atmosphere=thin\nvenus atmosphere=toxic\nearth atmosphere=breathable\n",
    )
    .unwrap();
    dir
}

fn bundled_world() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../worlds/default")
}

fn sxa() -> Command {
    Command::cargo_bin("sxa").unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_bundled_world() {
    sxa()
        .args(["check", "-d"])
        .arg(bundled_world())
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("11 locations, 20 connections"))
        .stdout(predicate::str::contains("10 enemies"));
}

#[test]
fn check_small_world_warns_about_missions() {
    let dir = test_world();
    sxa()
        .args(["check", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("3 locations, 4 connections"))
        .stdout(predicate::str::contains("1 enemies"));
}

#[test]
fn check_missing_directory() {
    sxa()
        .args(["check", "-d", "/nonexistent/world"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("locations.txt"));
}

#[test]
fn check_reports_bad_line() {
    let dir = test_world();
    fs::write(dir.path().join("connections.txt"), "earth\ntwo\nmars\n").unwrap();
    sxa()
        .args(["check", "-d"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("connections.txt:2"));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_finds_matches() {
    let dir = test_world();
    sxa()
        .args(["search", "atmosphere", "toxic", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 locations with atmosphere"))
        .stdout(predicate::str::contains("venus"));
}

#[test]
fn search_no_matches() {
    let dir = test_world();
    sxa()
        .args(["search", "atmosphere", "plasma", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No locations"));
}

#[test]
fn search_from_unknown_location() {
    let dir = test_world();
    sxa()
        .args(["search", "atmosphere", "thin", "--from", "pluto", "-d"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location 'pluto'"));
}

#[test]
fn search_bundled_world() {
    sxa()
        .args(["search", "habitable", "yes", "-d"])
        .arg(bundled_world())
        .assert()
        .success()
        .stdout(predicate::str::contains("kepler_186f"))
        .stdout(predicate::str::contains("proxima_centauri_b"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

fn play(dir: &TempDir) -> Command {
    let mut cmd = sxa();
    cmd.args(["play", "--seed", "7", "-d"])
        .arg(dir.path())
        .arg("--save")
        .arg(dir.path().join("saves").join("game.json"));
    cmd
}

#[test]
fn play_starts_and_quits() {
    let dir = test_world();
    play(&dir)
        .write_stdin("look\nmoves\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting exploration at earth"))
        .stdout(predicate::str::contains("New Mission Acquired!"))
        .stdout(predicate::str::contains("Possible moves: mars, venus"))
        .stdout(predicate::str::contains("Safe travels"));
}

#[test]
fn play_move_and_status() {
    let dir = test_world();
    play(&dir)
        .write_stdin("move mars\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Arrived at mars"))
        .stdout(predicate::str::contains("Warning: Enemies detected!"))
        .stdout(predicate::str::contains("Health: 90/90, Attack: 16"))
        .stdout(predicate::str::contains("Energy: 90"))
        .stdout(predicate::str::contains("Current Mission:"))
        .stdout(predicate::str::contains("Possible moves: earth"));
}

#[test]
fn play_reports_invalid_input() {
    let dir = test_world();
    fs::write(
        dir.path().join("connections.txt"),
        "earth\n1\nmars\n---\nmars\n1\nearth\n",
    )
    .unwrap();
    play(&dir)
        .write_stdin("move venus\ndance\nfight\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot move to venus from earth."))
        .stdout(predicate::str::contains("Unknown command: dance"))
        .stdout(predicate::str::contains("usage: fight <enemy name>"));
}

#[test]
fn play_search_costs_energy() {
    let dir = test_world();
    play(&dir)
        .write_stdin("search atmosphere toxic\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("atmosphere = toxic: venus"))
        .stdout(predicate::str::contains("Energy: 95"));
}

#[test]
fn play_save_and_load() {
    let dir = test_world();
    play(&dir)
        .write_stdin("save\nmove mars\nload\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved to"))
        .stdout(predicate::str::contains("Game loaded from"))
        .stdout(predicate::str::contains("Location: earth"));
    assert!(dir.path().join("saves").join("game.json").exists());
}

#[test]
fn play_unknown_start_location() {
    let dir = test_world();
    play(&dir)
        .args(["--start", "pluto"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to start session"));
}
