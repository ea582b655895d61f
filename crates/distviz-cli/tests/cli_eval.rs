use std::{
    path::PathBuf,
    process::{Command, Output},
    time::{SystemTime, UNIX_EPOCH},
};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_distviz"))
}

fn tmp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("distviz_cli_{}_{nanos}_{name}", std::process::id()))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {args:?}: {e}", bin_path()))
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let out = run(args);
    assert!(
        out.status.success(),
        "distviz {args:?} should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout should be JSON")
}

#[test]
fn eval_normal_defaults() {
    let report = run_json(&["eval", "normal"]);
    assert_eq!(report["family"], "normal");
    assert_eq!(report["parameters"]["mean"], 0.0);
    assert_eq!(report["parameters"]["std_dev"], 1.0);
    assert_eq!(report["summary"]["mean"], 0.0);
    assert_eq!(report["summary"]["stdDev"], 1.0);
    let range = report["range"].as_array().unwrap();
    assert_eq!(range.len(), 500);
    assert_eq!(range[0], -4.0);
    assert_eq!(range[499], 4.0);
    for curve in ["pdf", "cdf", "reliability", "hazard"] {
        assert_eq!(report["curves"][curve].as_array().unwrap().len(), 500, "{curve}");
    }
    assert!(report.get("likelihood").is_none());
}

#[test]
fn eval_with_likelihood_is_reproducible() {
    let seed = "0123456789abcdef0123456789abcdef";
    let args = ["eval", "exponential", "--rate", "2", "--samples", "100", "--seed", seed];
    let a = run_json(&args);
    let b = run_json(&args);
    assert_eq!(a, b);
    let panel = &a["likelihood"];
    assert_eq!(panel["seed"], seed);
    assert_eq!(panel["sampleCount"], 100);
    let grid = panel["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 1000);
    assert_eq!(grid[0][0], 0.1);
    assert_eq!(grid[999][0], 10.0);
    assert!(grid[0][1].is_f64());
    assert!(panel["mle"].as_f64().unwrap() > 0.0);
}

#[test]
fn eval_undefined_statistics() {
    let report = run_json(&["eval", "cauchy", "-p", "scale=2"]);
    assert_eq!(report["summary"]["mean"], "undefined");
    assert_eq!(report["summary"]["skewness"], "undefined");
    assert!(report.get("markers").is_none());
}

#[test]
fn eval_text_format() {
    let out = run(&["eval", "beta", "-p", "alpha=2", "-p", "beta=5", "--format", "text"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Family:     Beta"));
    assert!(stdout.contains("Mean:       0.29"));
    assert!(stdout.contains("reliability"));
}

#[test]
fn eval_request_file_and_output_file() {
    let request = tmp_path("request.json");
    let output = tmp_path("report.json");
    std::fs::write(
        &request,
        r#"{ "family": "Chi-Square", "parameters": { "df": 4 } }"#,
    )
    .unwrap();

    let out = run(&[
        "eval",
        "--request",
        request.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(
        out.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(report["family"], "chi-square");
    assert_eq!(report["summary"]["mean"], 4.0);

    let _ = std::fs::remove_file(&request);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn eval_sliders_snap_parameters() {
    let report = run_json(&["eval", "weibull", "-p", "shape=1.234", "--input-method", "sliders"]);
    assert_eq!(report["parameters"]["shape"], 1.2);
    assert_eq!(report["parameters"]["scale"], 1.0);
}

#[test]
fn eval_rejects_bad_input() {
    let out = run(&["eval", "triangular"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown distribution family"));

    let out = run(&["eval", "gamma", "-p", "shape=-1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid parameters for Gamma"));

    let out = run(&["eval", "normal", "-p", "location=1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected parameter 'location'"));

    let out = run(&["eval", "normal", "--seed", "xyz", "--samples", "10"]);
    assert!(!out.status.success());

    let out = run(&["eval", "ncx2", "-p", "noncentrality=1e12"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("noncentrality must be in [0, 10000]"));

    let out = run(&["eval", "normal", "--samples", "100001"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("sample count must be between 1 and 100000"));
}
