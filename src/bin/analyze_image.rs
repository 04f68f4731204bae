use herd_analyzer::health::vitals::{Species, Vitals};
use herd_analyzer::identify::ManualIdentifiers;
use herd_analyzer::image::io::{load_rgb_image, write_json_file};
use herd_analyzer::{AnalysisInput, Analyzer, AnalyzerParams};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AnalyzeToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub species: Species,
    #[serde(default)]
    pub vitals: Option<Vitals>,
    #[serde(default)]
    pub identifiers: ManualIdentifiers,
    pub output: AnalyzeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<AnalyzeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;

    let analyzer = Analyzer::new(AnalyzerParams::default())
        .map_err(|e| format!("Invalid analyzer parameters: {e}"))?;
    let input = AnalysisInput {
        vitals: config.vitals,
        identifiers: config.identifiers,
        species: config.species,
    };
    let report = analyzer
        .process(rgb.as_view(), &input)
        .map_err(|e| format!("Analysis failed: {e}"))?;

    write_json_file(&config.output.report_json, &report)?;

    println!(
        "Analyzed {} ({}x{}): status '{}' score {} in {:.2} ms",
        config.input.display(),
        rgb.width(),
        rgb.height(),
        report.health.label,
        report.health.health_score,
        report.latency_ms
    );
    println!("Saved report to {}", config.output.report_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: analyze_image <config.json>".to_string()
}
