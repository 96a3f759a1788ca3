use super::Config;
use crate::error::{ConfigError, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or(ConfigError::NoHomeDir)?;
        let noticeboard_dir = home.join(".noticeboard");
        let config_path = noticeboard_dir.join("config.toml");

        if !noticeboard_dir.exists() {
            fs::create_dir_all(&noticeboard_dir).map_err(io_error(&noticeboard_dir))?;
        }

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let mut config = Self {
                config_path,
                data_dir: noticeboard_dir,
                ..Self::default()
            };
            config.save()?;
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load an explicit config file. The data directory is the file's parent.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(io_error(path))?;
        let mut config: Config = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.config_path = path.to_path_buf();
        config.data_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        fs::write(&self.config_path, toml_str).map_err(io_error(&self.config_path))?;
        Ok(())
    }
}
