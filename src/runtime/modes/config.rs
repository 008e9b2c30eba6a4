//! Config mode
//!
//! Writes a sample configuration file built from `StaticConfig` defaults.

use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config::StaticConfig;

/// 默认输出路径
pub const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

/// 生成示例配置文件
///
/// 目标文件已存在且未指定 `force` 时拒绝覆盖。
pub fn run_config_generate(output_path: Option<String>, force: bool) -> Result<String> {
    let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());

    if !force && Path::new(&path).exists() {
        bail!("File already exists: {} (use --force to overwrite)", path);
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Environment variables (AS__SECTION__KEY) override file values".dimmed()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_writes_parseable_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.toml");
        let path_str = path.to_str().unwrap().to_string();

        let written = run_config_generate(Some(path_str.clone()), false).unwrap();
        assert_eq!(written, path_str);

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: StaticConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed.activity.increment_max_retries, 3);
    }

    #[test]
    fn test_generate_refuses_overwrite_without_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("existing.toml");
        std::fs::write(&path, "# keep me").unwrap();
        let path_str = path.to_str().unwrap().to_string();

        assert!(run_config_generate(Some(path_str.clone()), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# keep me");

        run_config_generate(Some(path_str), true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[server]"));
    }
}
