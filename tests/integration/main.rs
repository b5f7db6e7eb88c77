//! Integration tests for sensord

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::io::Write;

    fn sensord() -> Command {
        cargo_bin_cmd!("sensord")
    }

    /// Config file pointing the classic producer at a command that does not
    /// exist, so checks are fast and deterministic on any machine.
    fn hermetic_config() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cache]\ninterval_secs = 2\n\n[sensors]\ncommand = \"sensord-test-no-such-tool\"\n"
        )
        .unwrap();
        file
    }

    #[test]
    fn help_displays() {
        sensord()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Hardware sensor telemetry"));
    }

    #[test]
    fn version_displays() {
        sensord()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("sensord"));
    }

    #[test]
    fn config_path() {
        sensord()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        sensord()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[server]"));
    }

    #[test]
    fn config_show_honors_config_flag() {
        let file = hermetic_config();
        sensord()
            .args(["config", "show"])
            .arg("--config")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("sensord-test-no-such-tool"));
    }

    #[test]
    fn check_reports_both_sources() {
        let file = hermetic_config();
        sensord()
            .arg("check")
            .arg("--config")
            .arg(file.path())
            .assert()
            .success()
            .stdout(
                predicate::str::contains("csensors").and(predicate::str::contains("unavailable")),
            );
    }

    #[test]
    fn serve_rejects_invalid_listen_address() {
        let file = hermetic_config();
        sensord()
            .args(["serve", "--listen", "not-an-address"])
            .arg("--config")
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid listen address"));
    }
}
