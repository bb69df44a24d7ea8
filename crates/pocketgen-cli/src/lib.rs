//! Building blocks of the `pocketgen` command line tool.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;

pub use config::{
    DEFAULT_CONFIG_FILE, GenerateSettings, IntrospectSettings, LogFormat, LoggingSettings,
    Settings, load_settings, load_settings_from,
};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use output::{write_bytes_atomic, write_text_atomic};
pub use pipeline::{
    CheckReport, GenerateReport, GenerateRequest, SourceKind, bundle, check, generate,
    load_schema, write_json_schema,
};
