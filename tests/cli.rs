use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cacstat").expect("binary built");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).expect("utf8 stdout")
}

#[test]
fn default_run_prints_report_and_writes_charts() {
    let tmp = TempDir::new().expect("create temp dir");
    let out_dir = tmp.path().join("out");

    let stdout = stdout_of(
        cmd(tmp.path())
            .arg("--no-history")
            .arg("--output-dir")
            .arg(&out_dir),
    );

    assert!(stdout.contains("FINANCIAL SERVICES CAC ANALYSIS - 2024"));
    assert!(stdout.contains("Verification - Average CAC: $230.88"));
    assert!(stdout.contains("Mean CAC...................... $230.88"));
    assert!(stdout.contains("Range......................... $9.11"));
    assert!(stdout.contains("1. Average CAC of $230.88 is $80.88 above industry target"));
    assert!(stdout.contains("3. Company is paying 53.9% premium over industry benchmark"));
    assert!(stdout.contains("8. Negotiate better rates with marketing partners"));
    assert!(stdout.contains("- Potential Savings: $80.88 per customer acquisition"));
    assert!(stdout.contains("Generated Files:"));

    for name in [
        "cac_trend_analysis.html",
        "cac_gap_analysis.html",
        "cac_performance_dashboard.html",
    ] {
        let html = fs::read_to_string(out_dir.join(name)).expect("chart written");
        assert!(html.contains("Plotly.newPlot"));
    }
}

#[test]
fn no_charts_writes_nothing() {
    let tmp = TempDir::new().expect("create temp dir");
    let out_dir = tmp.path().join("out");

    let stdout = stdout_of(
        cmd(tmp.path())
            .args(["--no-history", "--no-charts", "--output-dir"])
            .arg(&out_dir),
    );

    assert!(!stdout.contains("Generated Files:"));
    assert!(!out_dir.exists());
}

#[test]
fn dataset_file_and_target_override() {
    let tmp = TempDir::new().expect("create temp dir");
    let data = tmp.path().join("data.json");
    fs::write(
        &data,
        r#"{"name": "Retail CAC Review", "observations": [
            {"label": "H1 2023", "value": 120.0},
            {"label": "H2 2023", "value": 100.0}
        ]}"#,
    )
    .expect("write dataset");

    let stdout = stdout_of(
        cmd(tmp.path())
            .args(["--no-history", "--no-charts", "--target", "125", "--file"])
            .arg(&data),
    );

    assert!(stdout.contains("Starting Retail CAC Review..."));
    assert!(stdout.contains("Target CAC: $125"));
    assert!(stdout.contains("Average CAC of $110.00 is $15.00 below industry target"));
    assert!(stdout.contains("Consistent downward trend from H1 ($120) to H2 ($100)"));
}

#[test]
fn invalid_inputs_fail() {
    let tmp = TempDir::new().expect("create temp dir");
    let data = tmp.path().join("empty.json");
    fs::write(&data, r#"{"observations": []}"#).expect("write dataset");

    cmd(tmp.path())
        .args(["--no-history", "--no-charts", "--file"])
        .arg(&data)
        .assert()
        .failure();

    cmd(tmp.path())
        .args(["--no-history", "--no-charts", "--target", "0"])
        .assert()
        .failure();
}

#[cfg(target_os = "linux")]
#[test]
fn history_is_appended() {
    let tmp = TempDir::new().expect("create temp dir");

    for _ in 0..2 {
        cmd(tmp.path()).arg("--no-charts").assert().success();
    }

    let log = fs::read_to_string(tmp.path().join(".config").join("cacstat").join("log.csv"))
        .expect("history written");
    let lines = log.lines().collect::<Vec<&str>>();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("date,name,observations"));
}

#[test]
fn log_file_receives_info_lines() {
    let tmp = TempDir::new().expect("create temp dir");
    let log_path = tmp.path().join("cacstat.log");

    cmd(tmp.path())
        .args(["--no-history", "--no-charts", "--log-file"])
        .arg(&log_path)
        .assert()
        .success();

    let log = fs::read_to_string(&log_path).expect("log written");
    assert!(log.contains("loaded 4 observations, target 150"));
}
