//! Configuration management for `bench_compare`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`BENCH_COMPARE_*`)
//! 3. Project config (`./.bench-compare.yaml`, or the `--config` file)
//! 4. User config (`~/.config/bench-compare/config.yaml`)
//! 5. Defaults
//!
//! Every layer is a flat key/value map. Nested YAML mappings are flattened
//! with `.` and sequences are joined with `,`.

use crate::compare::{CompareSettings, DEFAULT_IGNORED_CONTEXT_KEYS};
use crate::error::{CompareError, Result, ResultExt};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Project-local configuration filename.
pub const PROJECT_CONFIG_FILE: &str = ".bench-compare.yaml";
/// Directory under `~/.config` holding the user configuration.
pub const USER_CONFIG_DIR: &str = "bench-compare";
/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "BENCH_COMPARE_";

pub const P_VALUE_THRESHOLD_KEY: &str = "p-value-threshold";
pub const MIN_ITERATIONS_KEY: &str = "min-iterations";
pub const MIN_RUNTIME_NS_KEY: &str = "min-runtime-ns";
pub const NEUTRAL_BAND_KEY: &str = "neutral-band";
pub const IGNORE_CONTEXT_KEYS_KEY: &str = "ignore-context-keys";

/// A single configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Set a value, normalizing the key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(&normalize_key(key))
    }

    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)
            .map_err(|source| CompareError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        let mut flat = HashMap::new();
        flatten_yaml(&value, "", &mut flat);

        let mut layer = Self::default();
        for (key, value) in flat {
            layer.set(&key, value);
        }
        debug!(path = %path.display(), keys = layer.values.len(), "Loaded config file");
        Ok(layer)
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    /// Build a layer from `BENCH_COMPARE_*` variables of an environment.
    #[must_use]
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.set(stripped, value);
            }
        }
        layer
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Replaces the project config file.
    pub config_file: Option<PathBuf>,
    /// Appended to the configured ignore list.
    pub ignore_context_keys: Vec<String>,
    pub p_value_threshold: Option<f64>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        if let Some(threshold) = self.p_value_threshold {
            layer.set(P_VALUE_THRESHOLD_KEY, threshold.to_string());
        }
        layer
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let defaults = CompareSettings::default();
    let mut layer = ConfigLayer::default();
    layer.set(P_VALUE_THRESHOLD_KEY, defaults.p_value_threshold.to_string());
    layer.set(MIN_ITERATIONS_KEY, defaults.min_iterations.to_string());
    layer.set(MIN_RUNTIME_NS_KEY, defaults.min_runtime_ns.to_string());
    layer.set(NEUTRAL_BAND_KEY, defaults.neutral_band.to_string());
    layer.set(IGNORE_CONTEXT_KEYS_KEY, DEFAULT_IGNORED_CONTEXT_KEYS.join(","));
    layer
}

/// Load user config (`~/.config/bench-compare/config.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join(USER_CONFIG_DIR)
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Load project config (`.bench-compare.yaml` in `dir`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&dir.join(PROJECT_CONFIG_FILE))
}

/// Load configuration with the documented precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed, or an
/// explicitly requested config file does not exist.
pub fn load_config(project_dir: &Path, cli: &CliOverrides) -> Result<ConfigLayer> {
    let project = match &cli.config_file {
        Some(path) if !path.exists() => {
            return Err(CompareError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Some(path) => ConfigLayer::from_yaml(path)?,
        None => load_project_config(project_dir)?,
    };

    let mut merged = ConfigLayer::merge_layers(&[
        default_config_layer(),
        load_user_config()?,
        project,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]);

    if !cli.ignore_context_keys.is_empty() {
        let mut keys = split_list(merged.get(IGNORE_CONTEXT_KEYS_KEY).map_or("", String::as_str));
        keys.extend(cli.ignore_context_keys.iter().cloned());
        merged.set(IGNORE_CONTEXT_KEYS_KEY, keys.join(","));
    }

    Ok(merged)
}

/// Resolve comparison settings from a merged layer.
///
/// Keys absent from the layer fall back to their defaults.
///
/// # Errors
///
/// Returns `CompareError::InvalidConfigValue` naming the first key whose
/// value cannot be parsed or is out of range.
pub fn settings_from_layer(layer: &ConfigLayer) -> Result<CompareSettings> {
    let defaults = CompareSettings::default();

    let p_value_threshold = parse_value(layer, P_VALUE_THRESHOLD_KEY, |p: &f64| {
        *p > 0.0 && *p <= 1.0
    })?
    .unwrap_or(defaults.p_value_threshold);
    let min_iterations = parse_value(layer, MIN_ITERATIONS_KEY, |n: &usize| *n >= 2)?
        .unwrap_or(defaults.min_iterations);
    let min_runtime_ns = parse_value(layer, MIN_RUNTIME_NS_KEY, |ns: &f64| {
        ns.is_finite() && *ns >= 0.0
    })?
    .unwrap_or(defaults.min_runtime_ns);
    let neutral_band = parse_value(layer, NEUTRAL_BAND_KEY, |band: &f64| {
        (0.0..1.0).contains(band)
    })?
    .unwrap_or(defaults.neutral_band);
    let ignored_context_keys = layer
        .get(IGNORE_CONTEXT_KEYS_KEY)
        .map_or(defaults.ignored_context_keys, |value| split_list(value));

    Ok(CompareSettings {
        p_value_threshold,
        min_iterations,
        min_runtime_ns,
        neutral_band,
        ignored_context_keys,
    })
}

fn parse_value<T, F>(layer: &ConfigLayer, key: &str, valid: F) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    let Some(raw) = layer.get(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Ok(Some(value)),
        _ => Err(CompareError::invalid_config(key, raw.as_str())),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
