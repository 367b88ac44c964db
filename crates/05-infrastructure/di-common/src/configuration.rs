//! 容器配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// 自动装配条目的默认标识符
pub const DEFAULT_AUTOWIRE_ID: &str = "Autowire";

/// 默认配置文件（不含扩展名）
pub const DEFAULT_CONFIG_FILE: &str = "config/container";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DI";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// 自动装配条目的标识符
    pub autowire_id: String,
    /// 是否对类型名形式的标识符执行类型断言
    pub assert_types: bool,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            autowire_id: DEFAULT_AUTOWIRE_ID.to_string(),
            assert_types: true,
        }
    }
}

impl ContainerSettings {
    /// 从默认配置文件和环境变量加载
    ///
    /// 配置文件不存在时使用默认值，环境变量 `DI__AUTOWIRE_ID` 等优先。
    pub fn load() -> ConfigResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false));

        Self::build(builder)
    }

    /// 从指定配置文件和环境变量加载
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("加载容器配置文件: {}", path.display());
        let builder = config::Config::builder().add_source(config::File::from(path));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ConfigResult<Self> {
        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| {
                error!("容器配置加载失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.autowire_id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "autowire_id 不能为空".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = ContainerSettings::default();
        assert_eq!(settings.autowire_id, "Autowire");
        assert!(settings.assert_types);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "autowire_id = \"autowire.reflection\"").unwrap();
        writeln!(file, "assert_types = false").unwrap();

        let settings = ContainerSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.autowire_id, "autowire.reflection");
        assert!(!settings.assert_types);
    }

    #[test]
    fn test_load_from_partial_file_keeps_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "assert_types = false").unwrap();

        let settings = ContainerSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.autowire_id, DEFAULT_AUTOWIRE_ID);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = ContainerSettings::load_from("/nonexistent/container.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_autowire_id_is_rejected() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "autowire_id = \"  \"").unwrap();

        let result = ContainerSettings::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
