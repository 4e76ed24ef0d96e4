use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// A finite chain described in TOML.
///
/// ```toml
/// seed = 42
/// steps = 20
/// start = "sun"
///
/// [transitions]
/// sun = { sun = 0.8, rain = 0.2 }
/// rain = { sun = 0.4, rain = 0.6 }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainToml {
    /// RNG seed; drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of states to print, start state included.
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Start state; defaults to the first source state in sorted order.
    #[serde(default)]
    pub start: Option<String>,

    /// Absolute tolerance on each row's probability sum.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// `state -> { next_state = probability }` rows.
    pub transitions: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_steps() -> usize {
    20
}
fn default_tolerance() -> f64 {
    stochos_distribution::DEFAULT_TOLERANCE
}

impl ChainToml {
    /// Reads and parses a chain file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const WEATHER: &str = r#"
seed = 42
start = "rain"

[transitions]
sun = { sun = 0.8, rain = 0.2 }
rain = { sun = 0.4, rain = 0.6 }
"#;

    #[test]
    fn parses_chain_with_defaults() {
        let chain: ChainToml = toml::from_str(WEATHER).unwrap();
        assert_eq!(chain.seed, Some(42));
        assert_eq!(chain.steps, 20);
        assert_eq!(chain.start.as_deref(), Some("rain"));
        assert_eq!(chain.tolerance, 1e-9);
        assert_eq!(chain.transitions.len(), 2);
        assert_eq!(chain.transitions["sun"]["rain"], 0.2);
    }

    #[test]
    fn rejects_unknown_keys() {
        let text = format!("{WEATHER}\n[extra]\nx = 1\n");
        assert!(toml::from_str::<ChainToml>(&text).is_err());
    }

    #[test]
    fn transitions_are_required() {
        assert!(toml::from_str::<ChainToml>("seed = 1\n").is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WEATHER.as_bytes()).unwrap();
        let chain = ChainToml::load(file.path()).unwrap();
        assert_eq!(chain.transitions["rain"]["rain"], 0.6);
    }

    #[test]
    fn load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = ChainToml::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }
}
