use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

#[test]
fn missing_atom_argument_prints_usage_and_fails() {
    let output = run_ksviz(&[]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("USER.CLI_USAGE"), "stderr: {stderr}");
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn help_exits_successfully() {
    let output = run_ksviz(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--export-data"), "stdout: {stdout}");
}

#[test]
fn unknown_atom_reports_no_orbital_files() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());

    let output = run_ksviz(&[
        "Xx",
        "density",
        "--data-dir",
        path_arg(temp.path()),
        "--no-render",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [USER.NO_ORBITAL_FILES] no orbital files found for atom Xx"),
        "stderr: {stderr}"
    );
}

#[test]
fn density_export_writes_orbital_and_total_columns() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());
    let output_dir = temp.path().join("plots");

    let output = run_ksviz(&[
        "He",
        "plot-density",
        "--data-dir",
        path_arg(temp.path()),
        "--output-dir",
        path_arg(&output_dir),
        "--export-data",
        "--no-render",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 2 wavefunction files for He"), "stdout: {stdout}");
    assert!(stdout.contains("Saved: "), "stdout: {stdout}");

    let table = fs::read_to_string(output_dir.join("He_charge_density.txt"))
        .expect("density export should exist");
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("# He Atom - Radial Charge Density"));
    assert_eq!(lines.next(), Some("r 1s 2s Total"));
    assert_eq!(lines.count(), GRID_POINTS);
    assert!(!output_dir.join("He_charge_density.png").exists());
}

#[test]
fn density_mode_renders_svg_figure() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());
    let output_dir = temp.path().join("plots");

    let output = run_ksviz(&[
        "He",
        "density",
        "--data-dir",
        path_arg(temp.path()),
        "--output-dir",
        path_arg(&output_dir),
        "--format",
        "svg",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let figure_path = output_dir.join("He_charge_density.svg");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("He_charge_density.svg"), "stdout: {stdout}");
    let metadata = fs::metadata(&figure_path).expect("svg figure should exist");
    assert!(metadata.len() > 0);
}

#[test]
fn all_mode_export_has_one_block_per_orbital() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());

    let output = run_ksviz(&[
        "He",
        "--data-dir",
        path_arg(temp.path()),
        "--output-dir",
        path_arg(temp.path()),
        "--export-data",
        "--no-render",
    ]);

    assert!(output.status.success());
    let table = fs::read_to_string(temp.path().join("He_all_wavefunctions.txt"))
        .expect("wavefunction export should exist");
    let blocks: Vec<&str> = table
        .lines()
        .filter(|line| line.starts_with("# "))
        .collect();
    assert_eq!(blocks, ["# 1s orbital", "# 2s orbital"]);
}

#[test]
fn single_mode_resolves_file_in_data_dir() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());

    let output = run_ksviz(&[
        "He",
        "single",
        "He_n2l0_nodes1.dat",
        "--data-dir",
        path_arg(temp.path()),
        "--output-dir",
        path_arg(temp.path()),
        "--export-data",
        "--no-render",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let table = fs::read_to_string(temp.path().join("He_2s_wavefunction.txt"))
        .expect("single export should exist");
    assert!(table.lines().any(|line| line == "r He_2s"));
}

#[test]
fn single_mode_without_file_is_a_usage_error() {
    let output = run_ksviz(&["He", "single"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("requires an orbital FILE"), "stderr: {stderr}");
}

#[test]
fn single_mode_missing_file_is_not_found() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_ksviz(&[
        "He",
        "single",
        "He_n1l0_nodes0.dat",
        "--data-dir",
        path_arg(temp.path()),
        "--no-render",
    ]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NOT_FOUND.ORBITAL_SAMPLE"), "stderr: {stderr}");
}

#[test]
fn malformed_file_name_is_a_format_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("He_1s.dat"), "0.1 0.2\n");

    let output = run_ksviz(&[
        "He",
        "single",
        "He_1s.dat",
        "--data-dir",
        path_arg(temp.path()),
        "--no-render",
    ]);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FORMAT.ORBITAL_FILE_NAME"), "stderr: {stderr}");
}

#[test]
fn mismatched_grids_fail_density_aggregation() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());
    write_file(
        &temp.path().join("He_n2l1_nodes0.dat"),
        "0.1 0.01\n0.2 0.02\n",
    );

    let output = run_ksviz(&[
        "He",
        "density",
        "--data-dir",
        path_arg(temp.path()),
        "--no-render",
    ]);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FORMAT.RADIAL_GRID_MISMATCH"), "stderr: {stderr}");
}

#[test]
fn settings_file_and_flags_are_combined() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());
    let config_path = temp.path().join("ksviz.json");
    write_file(
        &config_path,
        r#"
        {
          "imageFormat": "svg",
          "singularityPolicy": "nearest-finite"
        }
        "#,
    );

    let output = run_ksviz(&[
        "He",
        "density",
        "--data-dir",
        path_arg(temp.path()),
        "--output-dir",
        path_arg(temp.path()),
        "--config",
        path_arg(&config_path),
        "--occupancy",
        "2s=0",
        "--export-data",
        "--no-render",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let table = fs::read_to_string(temp.path().join("He_charge_density.txt"))
        .expect("export should follow the svg artifact stem");
    let first_row: Vec<&str> = table
        .lines()
        .nth(2)
        .expect("first data row")
        .split_whitespace()
        .collect();
    assert_eq!(first_row.len(), 4);
    assert!(
        first_row.iter().all(|value| !value.contains("NaN") && !value.contains("inf")),
        "nearest-finite should remove the r = 0 singularity: {first_row:?}"
    );
    assert_eq!(first_row[2].parse::<f64>().expect("2s column"), 0.0);
}

#[test]
fn invalid_settings_are_reported_with_their_category() {
    let temp = TempDir::new().expect("tempdir should be created");
    stage_helium(temp.path());
    let config_path = temp.path().join("ksviz.json");
    write_file(&config_path, r#"{ "densityWindowBohr": 0.0 }"#);

    let output = run_ksviz(&[
        "He",
        "density",
        "--data-dir",
        path_arg(temp.path()),
        "--config",
        path_arg(&config_path),
        "--no-render",
    ]);
    assert_eq!(output.status.code(), Some(5));

    let output = run_ksviz(&[
        "He",
        "density",
        "--data-dir",
        path_arg(temp.path()),
        "--occupancy",
        "2s",
        "--no-render",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("USER.OCCUPANCY_FLAG"));
}

const GRID_POINTS: usize = 41;

/// Hydrogen-like 1s and 2s radial functions for Z = 2 on `r = 0, 0.25, ..., 10`.
fn stage_helium(dir: &Path) {
    let z: f64 = 2.0;
    let mut one_s = String::new();
    let mut two_s = String::new();
    for index in 0..GRID_POINTS {
        let r = index as f64 * 0.25;
        let u_1s = 2.0 * z.powf(1.5) * r * (-z * r).exp();
        let u_2s = z.powf(1.5) / 8.0_f64.sqrt() * r * (2.0 - z * r) * (-z * r / 2.0).exp();
        one_s.push_str(&format!("{:.8e} {:.8e}\n", r, u_1s));
        two_s.push_str(&format!("{:.8e} {:.8e}\n", r, u_2s));
    }
    write_file(&dir.join("He_n1l0_nodes0.dat"), &one_s);
    write_file(&dir.join("He_n2l0_nodes1.dat"), &two_s);
}

fn run_ksviz(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_ksviz");

    Command::new(binary_path)
        .args(args)
        .env_remove("KSVIZ_LOG")
        .output()
        .expect("ksviz should run")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths should be UTF-8")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}
