//! End-to-end tests for the pkgit CLI
//!
//! These tests verify:
//! - Manifest bootstrapping and presence checks
//! - Exit codes for success and failure
//! - get/install against a local fixture server

mod common;

use assert_cmd::Command;
use common::hello_world_server;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn pkgit(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pkgit").unwrap();
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn read_manifest(cwd: &Path) -> serde_json::Value {
    let content = fs::read_to_string(cwd.join("pkgit.req")).unwrap();
    serde_json::from_str(&content).unwrap()
}

mod bootstrap {
    use super::*;

    #[test]
    fn test_init_default_target() {
        let dir = tempfile::tempdir().unwrap();

        pkgit(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created pkgit.req"));

        let manifest = read_manifest(dir.path());
        assert_eq!(manifest["targetDir"], "pkgit");
        assert_eq!(manifest["dependencies"], serde_json::json!([]));
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).args(["init", "vendor"]).assert().success();

        pkgit(dir.path())
            .args(["init", "other"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        assert_eq!(read_manifest(dir.path())["targetDir"], "vendor");
    }

    #[test]
    fn test_custom_manifest_path() {
        let dir = tempfile::tempdir().unwrap();

        pkgit(dir.path())
            .args(["init", "vendor", "--manifest", "deps.req"])
            .assert()
            .success();

        assert!(dir.path().join("deps.req").is_file());
        assert!(!dir.path().join("pkgit.req").exists());
    }

    #[test]
    fn test_get_without_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();

        pkgit(dir.path())
            .args(["get", "octocat/Hello-World"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("manifest file not found"));
    }

    #[test]
    fn test_install_without_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();

        pkgit(dir.path())
            .arg("install")
            .assert()
            .failure()
            .stderr(predicate::str::contains("pkgit init"));
    }

    #[test]
    fn test_install_with_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).arg("init").assert().success();

        pkgit(dir.path())
            .arg("install")
            .assert()
            .success()
            .stdout(predicate::str::contains("No dependencies recorded."));
    }

    #[test]
    fn test_invalid_spec_fails_without_network() {
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).arg("init").assert().success();

        pkgit(dir.path())
            .args(["get", "onlyoneseg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid dependency spec"));

        pkgit(dir.path())
            .args(["get", "a/b@1@2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("too many '@'"));
    }

    #[test]
    fn test_missing_command_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).assert().failure();
    }
}

mod fetch {
    use super::*;

    #[test]
    fn test_get_then_install() {
        let server = hello_world_server();
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).args(["init", "proj"]).assert().success();

        pkgit(dir.path())
            .args(["get", "octocat/Hello-World@1.0.0", "--api-url", &server.base_url])
            .assert()
            .success()
            .stdout(predicate::str::contains("octocat/Hello-World@1.0.0"));

        let manifest = read_manifest(dir.path());
        let deps = manifest["dependencies"].as_array().unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0]["Repo"], "octocat/Hello-World@1.0.0");
        assert_eq!(deps[0]["Semver"], "1.0.0");
        assert_eq!(deps[0]["Hash"], "1111111111111111111111111111111111111111");
        assert!(dir
            .path()
            .join("proj/octocat-Hello-World-1111111/README")
            .is_file());

        fs::remove_dir_all(dir.path().join("proj")).unwrap();

        pkgit(dir.path())
            .args(["install", "--api-url", &server.base_url])
            .assert()
            .success();

        assert_eq!(read_manifest(dir.path())["dependencies"].as_array().unwrap().len(), 1);
        assert!(dir
            .path()
            .join("proj/octocat-Hello-World-1111111/README")
            .is_file());
    }

    #[test]
    fn test_get_json_output() {
        let server = hello_world_server();
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).args(["init", "proj"]).assert().success();

        let output = pkgit(dir.path())
            .args(["get", "octocat/Hello-World", "--json", "--api-url", &server.base_url])
            .output()
            .unwrap();

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["command"], "fetch");
        assert_eq!(value["dependencies"][0]["tag"], "v2.0.0");
        assert_eq!(value["dependencies"][0]["dependency"]["Semver"], "2.0.0");
    }

    #[test]
    fn test_get_no_match_leaves_manifest_empty() {
        let server = hello_world_server();
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).args(["init", "proj"]).assert().success();

        pkgit(dir.path())
            .args(["get", "octocat/Hello-World@9.9.9", "--api-url", &server.base_url])
            .assert()
            .failure()
            .stderr(predicate::str::contains("9.9.9"));

        assert_eq!(read_manifest(dir.path())["dependencies"], serde_json::json!([]));
    }

    #[test]
    fn test_zip_slip_is_reported() {
        let server = hello_world_server();
        let dir = tempfile::tempdir().unwrap();
        pkgit(dir.path()).args(["init", "proj"]).assert().success();

        pkgit(dir.path())
            .args(["get", "acme/evil", "--api-url", &server.base_url])
            .assert()
            .failure()
            .stderr(predicate::str::contains("escapes target directory"));
    }
}
