//! Runtime configuration for the `clef_shift` command.
//!
//! Values come from an optional JSON file (`--config`) and are then overridden
//! by individual flags, in that order regardless of where the flags appear.
//!
//! ```json
//! {
//!   "params": { "minStaffWidthFraction": 0.6, "blackThreshold": 64, "direction": "trebleToBass" },
//!   "dpi": 100,
//!   "reportDir": "reports"
//! }
//! ```
use crate::detector::ClefParams;
use crate::document::DEFAULT_DPI;
use crate::staff::Direction;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub params: ClefParams,
    /// Resolution for rasterizing input pages and sizing output pages.
    pub dpi: u32,
    /// When set, a JSON report per document is written here.
    pub report_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            params: ClefParams::default(),
            dpi: DEFAULT_DPI,
            report_dir: None,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.dpi == 0 {
            return Err("dpi must be positive".to_string());
        }
        self.params.validate().map_err(|e| e.to_string())
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum CliCommand {
    Help,
    Run {
        inputs: Vec<PathBuf>,
        config: RuntimeConfig,
    },
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS] <input.pdf>...\n\
         \n\
         Writes <input>.bass.pdf (or <input>.treble.pdf) next to each input.\n\
         \n\
         Options:\n  \
           --config <file.json>        load settings from a JSON file\n  \
           --direction <dir>           treble-to-bass (default) or bass-to-treble\n  \
           --min-staff-width <frac>    fraction of page width a staff line spans (0..1)\n  \
           --black-threshold <0-255>   intensity below which a pixel is black\n  \
           --dpi <n>                   rasterization and output resolution\n  \
           --report-dir <dir>          write a JSON detection report per document\n  \
           -h, --help                  print this help"
    )
}

#[derive(Default)]
struct Overrides {
    direction: Option<Direction>,
    min_staff_width: Option<f64>,
    black_threshold: Option<u8>,
    dpi: Option<u32>,
    report_dir: Option<PathBuf>,
}

/// Parse arguments (excluding the program name).
pub fn parse_cli<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config_path: Option<PathBuf> = None;
    let mut overrides = Overrides::default();
    let mut inputs = Vec::new();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "--config" => config_path = Some(PathBuf::from(value(&arg)?)),
            "--direction" => overrides.direction = Some(value(&arg)?.parse()?),
            "--min-staff-width" => {
                overrides.min_staff_width = Some(parse_number(&arg, &value(&arg)?)?)
            }
            "--black-threshold" => {
                overrides.black_threshold = Some(parse_number(&arg, &value(&arg)?)?)
            }
            "--dpi" => overrides.dpi = Some(parse_number(&arg, &value(&arg)?)?),
            "--report-dir" => overrides.report_dir = Some(PathBuf::from(value(&arg)?)),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ => inputs.push(PathBuf::from(arg)),
        }
    }

    if inputs.is_empty() {
        return Err("no input PDF given".to_string());
    }

    let mut config = match &config_path {
        Some(path) => load_config(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(direction) = overrides.direction {
        config.params.direction = direction;
    }
    if let Some(w) = overrides.min_staff_width {
        config.params.min_staff_width = w;
    }
    if let Some(t) = overrides.black_threshold {
        config.params.black_threshold = t;
    }
    if let Some(dpi) = overrides.dpi {
        config.dpi = dpi;
    }
    if overrides.report_dir.is_some() {
        config.report_dir = overrides.report_dir;
    }
    config.validate()?;

    Ok(CliCommand::Run { inputs, config })
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| format!("invalid value '{raw}' for {flag}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positional_inputs_use_defaults() {
        let cmd = parse_cli(args(&["a.pdf", "b.pdf"])).unwrap();
        assert_eq!(
            cmd,
            CliCommand::Run {
                inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
                config: RuntimeConfig::default(),
            }
        );
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(
            &path,
            r#"{"params":{"blackThreshold":100,"direction":"bassToTreble"},"dpi":150}"#,
        )
        .unwrap();
        let cmd = parse_cli(args(&[
            "--dpi",
            "200",
            "score.pdf",
            "--config",
            path.to_str().unwrap(),
        ]))
        .unwrap();
        let CliCommand::Run { config, .. } = cmd else {
            panic!("expected run command");
        };
        assert_eq!(config.dpi, 200);
        assert_eq!(config.params.black_threshold, 100);
        assert_eq!(config.params.direction, Direction::BassToTreble);
        assert_eq!(config.params.min_staff_width, 0.6);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse_cli(args(&[])).is_err());
        assert!(parse_cli(args(&["--dpi"])).is_err());
        assert!(parse_cli(args(&["--black-threshold", "300", "a.pdf"])).is_err());
        assert!(parse_cli(args(&["--min-staff-width", "1.2", "a.pdf"])).is_err());
        assert!(parse_cli(args(&["--direction", "up", "a.pdf"])).is_err());
        assert!(parse_cli(args(&["--verbose", "a.pdf"])).is_err());
        assert_eq!(parse_cli(args(&["a.pdf", "--help"])), Ok(CliCommand::Help));
    }
}
