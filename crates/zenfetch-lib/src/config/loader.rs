use super::Config;
use crate::error::ZenfetchError;
use config::Config as ConfigBuilder;
use config::{Environment, File, FileFormat};
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("default.yaml");

pub const ENV_PREFIX: &str = "ZENFETCH";

pub fn load_config(config_path: Option<&Path>) -> Result<Config, ZenfetchError> {
    let mut builder =
        ConfigBuilder::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml));

    if let Some(config_path) = config_path {
        builder = builder.add_source(File::from(config_path));
    }

    let app_config: Config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    app_config.validate()?;
    Ok(app_config)
}
