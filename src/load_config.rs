/// `load_config` module: reads the YAML batch configuration and applies environment overrides.
///
/// This is the only place where untrusted YAML is parsed. Sources use the same
/// tagged representation as [`SourceSpec`](repo_docgen_core::contract::SourceSpec):
///
/// ```yaml
/// output_dir: ./docs-out
/// format: pdf
/// skip_tests: false
/// sources:
///   - type: git
///     repo_url: https://github.com/owner/project.git
///     reference: main
///   - type: local
///     path: ../some/checkout
/// ```
///
/// `DOCGEN_OUTPUT_DIR` and `DOCGEN_FORMAT` override the file when set.
use crate::config::{DocgenConfig, OutputFormat};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const OUTPUT_DIR_ENV: &str = "DOCGEN_OUTPUT_DIR";
pub const FORMAT_ENV: &str = "DOCGEN_FORMAT";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DocgenConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let mut config: DocgenConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    apply_env_overrides(&mut config)?;
    config.trace_loaded();
    Ok(config)
}

/// Applies `DOCGEN_OUTPUT_DIR` and `DOCGEN_FORMAT` on top of `config`.
pub fn apply_env_overrides(config: &mut DocgenConfig) -> Result<()> {
    if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
        if !dir.trim().is_empty() {
            info!(output_dir = %dir, "Output directory overridden from environment");
            config.output_dir = PathBuf::from(dir);
        }
    }

    if let Ok(value) = std::env::var(FORMAT_ENV) {
        match value.parse::<OutputFormat>() {
            Ok(format) => {
                info!(%format, "Output format overridden from environment");
                config.format = format;
            }
            Err(e) => {
                error!(error = %e, var = FORMAT_ENV, "Invalid output format in environment");
                return Err(anyhow::anyhow!("{FORMAT_ENV} is invalid: {e}"));
            }
        }
    }
    Ok(())
}
