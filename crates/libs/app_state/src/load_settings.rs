use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yaml";

/// Load settings from a yaml file, overridden by `APP__SECTION__KEY` environment variables.
///
/// A `.env` file in the working directory is loaded first, so the api key can live there.
pub fn load_app_settings(config_path: &Path) -> Result<AppSettings> {
    dotenv::from_path(".env").ok();
    let config_path = config_path.canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}
