use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::MAX_CUPS;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 目标咖啡杯数
    pub target_cups: u32,
    /// 每个冲泡任务的杯数
    pub cups_per_brew: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 执行 trace 输出文件，为空则不写文件
    pub trace_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_cups: 20,
            cups_per_brew: 4,
            verbose_logging: false,
            trace_file: "trace.log".to_string(),
        }
    }
}

impl Config {
    /// 加载配置
    ///
    /// 先读 `COFFEE_CONFIG` 指向的 TOML 文件（未设置则用默认值），
    /// 再用环境变量覆盖。
    pub fn load() -> Result<Self> {
        let base = match std::env::var("COFFEE_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            target_cups: std::env::var("TARGET_CUPS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.target_cups),
            cups_per_brew: std::env::var("CUPS_PER_BREW").ok().and_then(|v| v.parse().ok()).unwrap_or(self.cups_per_brew),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            trace_file: std::env::var("TRACE_FILE").unwrap_or(self.trace_file),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cups_per_brew == 0 {
            anyhow::bail!("cups_per_brew 必须大于 0");
        }
        if self.target_cups > MAX_CUPS {
            anyhow::bail!("target_cups 不能超过 {}，实际为 {}", MAX_CUPS, self.target_cups);
        }
        if self.cups_per_brew > MAX_CUPS {
            anyhow::bail!("cups_per_brew 不能超过 {}，实际为 {}", MAX_CUPS, self.cups_per_brew);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target_cups, 20);
        assert_eq!(config.cups_per_brew, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str("target_cups = 8\n").unwrap();
        assert_eq!(config.target_cups, 8);
        assert_eq!(config.cups_per_brew, 4);
        assert_eq!(config.trace_file, "trace.log");
    }

    #[test]
    fn test_zero_cups_per_brew_rejected() {
        let config = Config::from_toml_str("cups_per_brew = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    /// 配方换算会溢出的杯数在加载时就被拒绝
    #[test]
    fn test_target_cups_capped_at_max() {
        let at_bound = Config {
            target_cups: MAX_CUPS,
            ..Config::default()
        };
        assert!(at_bound.validate().is_ok());

        let over_bound = Config {
            target_cups: MAX_CUPS + 1,
            ..Config::default()
        };
        assert!(over_bound.validate().is_err());

        let config = Config::from_toml_str("target_cups = 30000000\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cups_per_brew_capped_at_max() {
        let config = Config {
            cups_per_brew: MAX_CUPS + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("target_cups = \"many\"").is_err());
    }
}
