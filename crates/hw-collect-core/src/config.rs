use crate::error::Error;
use crate::report::DEFAULT_REPORT_FILE_NAME;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub roster_path: String,
    pub id_column: String,
    pub name_column: String,
    pub report_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: "roster.csv".to_string(),
            id_column: "ID".to_string(),
            name_column: "Name".to_string(),
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
        }
    }
}

/// Defaults, then an optional `HwCollect.{toml,yaml,json,...}` in the working
/// directory, then `HW_COLLECT_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, Error> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("roster_path", defaults.roster_path)?
        .set_default("id_column", defaults.id_column)?
        .set_default("name_column", defaults.name_column)?
        .set_default("report_file_name", defaults.report_file_name)?
        .add_source(ConfigFile::with_name("HwCollect").required(false))
        .add_source(Environment::with_prefix("HW_COLLECT"))
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}
