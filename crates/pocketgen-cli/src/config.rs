use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pocketgen_core::{CompileOptions, EmptyListPolicy};
use pocketgen_introspect::IntrospectOptions;

use crate::error::{CliError, CliResult};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pocketgen.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub introspect: IntrospectSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    pub empty_list: EmptyListPolicy,
    /// Liquid template replacing the built-in one.
    pub template: Option<PathBuf>,
}

impl GenerateSettings {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            empty_list: self.empty_list,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectSettings {
    pub include_system_collections: bool,
    pub include_id_field: bool,
}

impl IntrospectSettings {
    /// Options with command line values taking precedence over the file.
    pub fn options_with(
        &self,
        include_system_collections: Option<bool>,
        include_id_field: Option<bool>,
    ) -> IntrospectOptions {
        IntrospectOptions {
            include_system_collections: include_system_collections
                .unwrap_or(self.include_system_collections),
            include_id_field: include_id_field.unwrap_or(self.include_id_field),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

/// Load an explicit config file, or `pocketgen.toml` from the working
/// directory when present, or defaults.
pub fn load_settings(explicit: Option<&Path>) -> CliResult<Settings> {
    if let Some(path) = explicit {
        return load_settings_from(path);
    }

    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() {
        return load_settings_from(path);
    }

    Ok(Settings::default())
}

pub fn load_settings_from(path: &Path) -> CliResult<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}
