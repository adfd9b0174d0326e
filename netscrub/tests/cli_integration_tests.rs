// netscrub/tests/cli_integration_tests.rs
//! Command-line integration tests for the `netscrub` binary.
//!
//! Each test builds a small zip bundle in a temporary directory, runs the
//! binary on it through `assert_cmd` and inspects both the printed summary and
//! the anonymized archive.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_log::test;
use zip::write::{FileOptions, ZipWriter};
use zip::ZipArchive;

use netscrub_core::engines::codeword_engine::{pseudonym_hostname, pseudonym_ip, derive_key};

/// Writes a zip at `dir/name` with the given `(entry name, bytes)` pairs.
fn build_bundle(dir: &TempDir, name: &str, entries: &[(&str, &[u8])]) -> Result<PathBuf> {
    let path = dir.path().join(name);
    let mut zip = ZipWriter::new(File::create(&path)?);
    let options: FileOptions<'_, ()> = FileOptions::default();
    for (entry, data) in entries {
        zip.start_file(*entry, options)?;
        zip.write_all(data)?;
    }
    zip.finish()?;
    Ok(path)
}

fn read_entry(archive: &Path, name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(archive)?)?;
    let mut data = Vec::new();
    archive.by_name(name)?.read_to_end(&mut data)?;
    Ok(data)
}

fn netscrub() -> Command {
    let mut cmd = Command::cargo_bin("netscrub").unwrap();
    cmd.env_remove("NETSCRUB_CODEWORD");
    cmd.env("RUST_LOG", "debug");
    cmd
}

#[test]
fn test_anonymizes_text_entry_and_prints_summary() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(
        &dir,
        "bundle.zip",
        &[("logs/agent.log", b"peer 10.1.2.3 via fileserver at abc.test\n")],
    )?;
    let expected_output = dir.path().join("bundle_anonymized.zip");

    netscrub()
        .args(["-i", input.to_str().unwrap(), "-c", "1", "-H", "fileserver", "-d", "test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Substitutions made:"))
        .stdout(predicate::str::contains("10.1.2.3"))
        .stdout(predicate::str::contains("(1 time)"))
        .stdout(predicate::str::contains(format!("Output file: {}", expected_output.display())));

    let text = String::from_utf8(read_entry(&expected_output, "logs/agent.log")?)?;
    let expected = format!(
        "peer {} via {} at Dk7fzqdsb.test\n",
        pseudonym_ip(&derive_key("1"), "10.1.2.3").unwrap(),
        pseudonym_hostname("1", "fileserver")
    );
    assert_eq!(text, expected);
    Ok(())
}

#[test]
fn test_unused_hostname_listed_with_zero_count() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"nothing to see")])?;

    netscrub()
        .args(["-i", input.to_str().unwrap(), "-c", "1", "-H", "printer07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("printer07 ->  (0 times)"));
    Ok(())
}

#[test]
fn test_codeword_required_for_default_strategy() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"10.0.0.1")])?;

    netscrub()
        .args(["-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a codeword"));
    assert!(!dir.path().join("b_anonymized.zip").exists());
    Ok(())
}

#[test]
fn test_codeword_from_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"10.1.2.3")])?;

    netscrub()
        .env("NETSCRUB_CODEWORD", "1")
        .args(["-i", input.to_str().unwrap()])
        .assert()
        .success();

    let out = read_entry(&dir.path().join("b_anonymized.zip"), "a.txt")?;
    assert_eq!(String::from_utf8(out)?, "10.135.176.112");
    Ok(())
}

#[test]
fn test_random_strategy_keeps_address_class() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"10.1.2.3 10.1.2.3 8.8.8.8")])?;

    netscrub()
        .args(["-i", input.to_str().unwrap(), "--strategy", "random"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 times)"));

    let out = String::from_utf8(read_entry(&dir.path().join("b_anonymized.zip"), "a.txt")?)?;
    let parts: Vec<&str> = out.split(' ').collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[0].starts_with("10."));
    assert_eq!(parts[0], parts[1]);
    assert_eq!(parts[2], "8.8.8.8");
    Ok(())
}

#[test]
fn test_binary_entry_copied_verbatim() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let blob: &[u8] = &[0xde, 0xad, 0xbe, 0xef, 0xff, b'1', b'0', b'.', b'0', b'.', b'0', b'.', b'1'];
    let input = build_bundle(&dir, "b.zip", &[("core.bin", blob)])?;

    netscrub().args(["-i", input.to_str().unwrap(), "-c", "1"]).assert().success();

    assert_eq!(read_entry(&dir.path().join("b_anonymized.zip"), "core.bin")?, blob);
    Ok(())
}

#[test]
fn test_sqlite_entry_is_scrubbed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("agent.db");
    {
        let conn = Connection::open(&db_path)?;
        conn.execute_batch(
            "CREATE TABLE peers (name TEXT, addr TEXT);
             INSERT INTO peers VALUES ('fileserver', '192.168.0.1');
             INSERT INTO peers VALUES ('public', '8.8.4.4');",
        )?;
    }
    let db_bytes = fs::read(&db_path)?;
    let input = build_bundle(&dir, "b.zip", &[("data/agent.db", &db_bytes)])?;

    netscrub()
        .args(["-i", input.to_str().unwrap(), "-c", "1", "-H", "fileserver"])
        .assert()
        .success();

    let scrubbed = dir.path().join("scrubbed.db");
    fs::write(&scrubbed, read_entry(&dir.path().join("b_anonymized.zip"), "data/agent.db")?)?;
    let conn = Connection::open(&scrubbed)?;
    let rows: Vec<(String, String)> = conn
        .prepare("SELECT name, addr FROM peers ORDER BY rowid")?
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
        .collect::<rusqlite::Result<_>>()?;
    assert_eq!(
        rows,
        vec![
            (pseudonym_hostname("1", "fileserver"), "192.168.178.114".to_string()),
            ("public".to_string(), "8.8.4.4".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn test_report_json_and_explicit_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"10.1.2.3 and 10.1.2.3")])?;
    let output = dir.path().join("clean.zip");
    let report = dir.path().join("report.json");

    netscrub()
        .args([
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-c",
            "1",
            "--report-json",
            report.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Output file: {}", output.display())));

    assert!(output.exists());
    assert!(!dir.path().join("b_anonymized.zip").exists());
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
    assert_eq!(json["10.1.2.3"]["count"], 2);
    assert_eq!(json["10.1.2.3"]["replacement"], "10.135.176.112");
    Ok(())
}

#[test]
fn test_config_file_supplies_lists() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"www.domain.com")])?;
    let config = dir.path().join("netscrub.yaml");
    fs::write(&config, "codeword: \"1\"\ndomains:\n  - domain.com\n")?;

    netscrub()
        .args(["-i", input.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("www.domain.com -> Ddrebczzf.domain.com (1 time)"));
    Ok(())
}

#[test]
fn test_quiet_suppresses_status_lines() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = build_bundle(&dir, "b.zip", &[("a.txt", b"x")])?;

    netscrub()
        .args(["-q", "-i", input.to_str().unwrap(), "-c", "1"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Substitutions made:"));
    Ok(())
}

#[test]
fn test_missing_input_fails_with_context() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("absent.zip");

    netscrub()
        .args(["-i", missing.to_str().unwrap(), "-c", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open zip file"));
    Ok(())
}
