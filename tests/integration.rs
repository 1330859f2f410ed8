use std::{env, fs, path::Path, path::PathBuf, process::Command};

fn write_config(test_dir: &Path, herd: f64) -> PathBuf {
    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[model]\n"
        + "s_on = 0.02\n"
        + "s_off = 0.03\n"
        + &format!("herd = {herd:?}\n")
        + "\n"
        + "[init]\n"
        + "n_agt = 8\n"
        + "state = [ 1, -1, 1, -1, 1, -1, 1, -1,]\n"
        + "seed = 17\n"
        + "\n"
        + "[noise]\n"
        + "p_on = 0.9\n"
        + "p_off = 0.2\n"
        + "\n"
        + "[output]\n"
        + "n_points = 25\n"
        + "warmup = 10\n";

    fs::write(&config_path, config_contents).expect("failed to write config file");
    config_path
}

fn run_bin(args: &[&str]) -> String {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_herding"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    stdout_str.to_string()
}

fn parse_rows(stdout: &str) -> Vec<Vec<i8>> {
    stdout
        .lines()
        .map(|line| {
            line.split(' ')
                .map(|val| val.parse().expect("failed to parse value"))
                .collect()
        })
        .collect()
}

fn test_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(&test_dir).expect("failed to create test directory");
    test_dir
}

#[test]
fn basic_workflow() {
    let test_dir = test_dir("basic_workflow");
    let config_path = write_config(&test_dir, 0.001);
    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let verdict = run_bin(&["--config", config_str, "validate"]);
    assert_eq!(verdict.trim(), "valid");

    let raw = parse_rows(&run_bin(&["--config", config_str, "simulate"]));
    assert_eq!(raw.len(), 25);
    assert!(raw.iter().all(|row| row.len() == 8));
    assert!(raw.iter().flatten().all(|&val| val == 1 || val == -1));

    let raw_again = parse_rows(&run_bin(&["--config", config_str, "simulate"]));
    assert_eq!(raw, raw_again);

    let noisy = parse_rows(&run_bin(&["--config", config_str, "simulate", "--noisy"]));
    assert_eq!(noisy.len(), 25);
    assert!(noisy.iter().all(|row| row.len() == 8));
    assert!(noisy.iter().flatten().all(|&val| val == 0 || val == 1));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn unsafe_parameters_are_advisory() {
    let test_dir = test_dir("unsafe_parameters_are_advisory");
    let config_path = write_config(&test_dir, 0.5);
    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let verdict = run_bin(&["--config", config_str, "validate"]);
    assert_eq!(verdict.trim(), "invalid");

    let raw = parse_rows(&run_bin(&["--config", config_str, "simulate"]));
    assert_eq!(raw.len(), 25);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn rejects_bad_config() {
    let test_dir = test_dir("rejects_bad_config");
    let config_path = write_config(&test_dir, 0.001);
    let contents = fs::read_to_string(&config_path).expect("failed to read config file");
    fs::write(&config_path, contents.replace("n_agt = 8", "n_agt = 9"))
        .expect("failed to write config file");

    let output = Command::new(env!("CARGO_BIN_EXE_herding"))
        .args(["--config", config_path.to_str().unwrap(), "simulate"])
        .output()
        .expect("failed to execute command");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    fs::remove_dir_all(&test_dir).ok();
}
