//! CLI tests for nxconverge
//!
//! Runs the binary against manifests and device snapshots written to a
//! temporary directory and checks exit codes, output and the saved snapshot.

mod common;

use assert_cmd::Command;
use common::LAB_SNAPSHOT;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const SITE_MANIFEST: &str = r#"
resources:
  - type: cisco_bgp
    title: 42
    router_id: 10.0.0.2
  - type: cisco_route_map
    title: rm1 10 permit
    set_metric_bandwidth: 44
    set_metric_delay: 55
  - type: cisco_vtp
    title: default
    domain: lab
"#;

const INVALID_MANIFEST: &str = r#"
resources:
  - type: cisco_aaa_authentication_login
    title: default
    chap: true
    mschap: true
  - type: cisco_vtp
    title: default
    domain: lab
  - type: cisco_unknown
    title: x
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("nxconverge").unwrap();
        cmd.current_dir(self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("NXCONVERGE_CONFIG")
            .env_remove("NXCONVERGE_DEVICE")
            .env_remove("NXCONVERGE_CHECK")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.dir.path().join("absent.toml"));
        cmd
    }
}

// ============================================================================
// kinds
// ============================================================================

#[test]
fn test_kinds_lists_builtin_kinds() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("cisco_bgp_neighbor"))
        .stdout(predicate::str::contains("cisco_aaa_authentication_login"));
}

#[test]
fn test_kinds_describes_composite_setters() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["kinds", "cisco_route_map"])
        .assert()
        .success()
        .stdout(predicate::str::contains("set_metric_set"));
}

#[test]
fn test_kinds_json_output() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["kinds", "cisco_bgp", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let detail: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(detail["name"], "cisco_bgp");
    assert_eq!(detail["keys"][1]["default"], "default");
}

#[test]
fn test_unknown_kind_exit_code() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["kinds", "cisco_nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown resource kind"));
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_valid_manifest() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    ws.cmd()
        .arg("validate")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 resource(s), 0 invalid"));
}

#[test]
fn test_validate_reports_every_invalid_resource() {
    let ws = Workspace::new();
    let manifest = ws.write("bad.yaml", INVALID_MANIFEST);
    ws.cmd()
        .arg("validate")
        .arg(&manifest)
        .assert()
        .code(4)
        .stdout(predicate::str::contains("mutually exclusive"))
        .stdout(predicate::str::contains("cisco_unknown"))
        .stdout(predicate::str::contains("2 invalid"));
}

#[test]
fn test_validate_platform_gate() {
    let ws = Workspace::new();
    let manifest = ws.write(
        "intf.yaml",
        "resources:\n  - type: cisco_interface\n    title: Ethernet1/1\n    negotiate_auto: true\n",
    );
    ws.cmd().arg("validate").arg(&manifest).assert().success();
    ws.cmd()
        .arg("validate")
        .arg(&manifest)
        .args(["--platform", "n3k"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("not supported on platform 'n3k'"));
}

#[test]
fn test_validate_missing_manifest() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["validate", "nowhere.yaml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to load manifest"));
}

// ============================================================================
// apply / check
// ============================================================================

#[test]
fn test_apply_converges_and_saves_snapshot() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);

    ws.cmd()
        .arg("apply")
        .arg(&manifest)
        .arg("--device")
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("changed: [cisco_route_map[rm1 10 permit]]"))
        .stdout(predicate::str::contains("changed=3"));

    let saved = ws.read(&device);
    assert!(saved.contains("10.0.0.2"));
    assert!(saved.contains("set_metric_delay: 55"));
    assert!(saved.contains("cisco_vtp"));

    ws.cmd()
        .arg("apply")
        .arg(&manifest)
        .arg("--device")
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("changed=0"));
}

#[test]
fn test_check_leaves_snapshot_untouched() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);

    ws.cmd()
        .arg("check")
        .arg(&manifest)
        .arg("--device")
        .arg(&device)
        .arg("--diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("(check mode)"))
        .stdout(predicate::str::contains("-router_id: 10.0.0.1"))
        .stdout(predicate::str::contains("+router_id: 10.0.0.2"));

    assert_eq!(ws.read(&device), LAB_SNAPSHOT);
}

#[test]
fn test_apply_json_summary() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);

    let output = ws
        .cmd()
        .args(["--output", "json", "--check", "apply"])
        .arg(&manifest)
        .arg("--device")
        .arg(&device)
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["changed"], 3);
    assert_eq!(summary["check_mode"], true);
    assert_eq!(summary["outcomes"][0]["status"], "ok");
}

#[test]
fn test_device_fault_exit_code() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    let snapshot = format!("{}faults:\n  set_metric_set: \"% Invalid command\"\n", LAB_SNAPSHOT);
    let device = ws.write("leaf1.yaml", &snapshot);

    ws.cmd()
        .arg("apply")
        .arg(&manifest)
        .arg("--device")
        .arg(&device)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("failed: [cisco_route_map[rm1 10 permit]]"))
        .stdout(predicate::str::contains("% Invalid command"))
        .stdout(predicate::str::contains("failed=1"));

    // the resources that succeeded are still saved
    assert!(ws.read(&device).contains("10.0.0.2"));
}

#[test]
fn test_invalid_manifest_applies_nothing() {
    let ws = Workspace::new();
    let manifest = ws.write("bad.yaml", INVALID_MANIFEST);
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);

    ws.cmd()
        .arg("apply")
        .arg(&manifest)
        .arg("--device")
        .arg(&device)
        .assert()
        .code(4);
    assert_eq!(ws.read(&device), LAB_SNAPSHOT);
}

#[test]
fn test_apply_without_device() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    ws.cmd()
        .arg("apply")
        .arg(&manifest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No device given"));
}

#[test]
fn test_device_from_config_file() {
    let ws = Workspace::new();
    let manifest = ws.write("site.yaml", SITE_MANIFEST);
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);
    let config = ws.write(
        "nxconverge.toml",
        &format!("[defaults]\ndevice = {:?}\n", device.display().to_string()),
    );

    let mut cmd = Command::cargo_bin("nxconverge").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("NXCONVERGE_DEVICE")
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&manifest)
        .assert()
        .success();
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_lists_instances() {
    let ws = Workspace::new();
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);
    ws.cmd()
        .args(["show", "cisco_bgp", "--device"])
        .arg(&device)
        .assert()
        .success()
        .stdout(predicate::str::contains("cisco_bgp[42 default]"))
        .stdout(predicate::str::contains("10.0.0.1"));
}

#[test]
fn test_show_yaml_output() {
    let ws = Workspace::new();
    let device = ws.write("leaf1.yaml", LAB_SNAPSHOT);
    let output = ws
        .cmd()
        .args(["show", "cisco_route_map", "--output", "yaml", "--device"])
        .arg(&device)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("rmname: rm1"));
    assert!(stdout.contains("set_metric_bandwidth: 10"));
}
