//! 配置管理命令
//!
//! 读写 TOML 配置文件（动作节奏、安全限制）

use anyhow::{Context, Result};
use clap::Subcommand;
use sesame_choreo::choreography;
use sesame_protocol::{Angle, Command, ServoName};
use sesame_tools::{SesameConfig, ServoRange};
use std::path::{Path, PathBuf};

/// 默认配置文件路径
pub fn default_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;

    path.push("sesame");
    path.push("config.toml");
    Ok(path)
}

/// 解析 `R1=45:180`
pub fn parse_limit(s: &str) -> Result<(ServoName, ServoRange), String> {
    let (name, range) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SERVO=MIN:MAX, got {:?}", s))?;
    let servo: ServoName = name.trim().parse().map_err(|e| format!("{}", e))?;
    let (min, max) = range
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got {:?}", range))?;
    let min: u8 = min.trim().parse().map_err(|_| format!("invalid min: {:?}", min))?;
    let max: u8 = max.trim().parse().map_err(|_| format!("invalid max: {:?}", max))?;
    if min > max || max > Angle::MAX {
        return Err(format!("invalid range {}-{} (expected min <= max <= 180)", min, max));
    }
    Ok((servo, ServoRange { min, max }))
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 设置配置项
    Set {
        /// 协作式检查间隔（毫秒）
        #[arg(long)]
        frame_delay_ms: Option<u64>,

        /// 步态循环次数
        #[arg(long)]
        gait_cycles: Option<u32>,

        /// 是否在回放帧脚本前检查角度
        #[arg(long)]
        safety: Option<bool>,

        /// 舵机角度范围，如 R1=45:180（可重复）
        #[arg(long = "limit", value_parser = parse_limit)]
        limits: Vec<(ServoName, ServoRange)>,
    },

    /// 获取配置项
    Get {
        /// 配置项名称（frame_delay_ms, gait_cycles, safety, limits, all）
        #[arg(default_value = "all")]
        key: String,
    },

    /// 检查配置
    Check,

    /// 恢复默认配置
    Reset,
}

impl ConfigCommand {
    pub fn execute(self, path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Set {
                frame_delay_ms,
                gait_cycles,
                safety,
                limits,
            } => Self::set_(path, frame_delay_ms, gait_cycles, safety, limits),

            ConfigCommand::Get { key } => Self::get_(path, &key),

            ConfigCommand::Check => Self::check_(path),

            ConfigCommand::Reset => {
                SesameConfig::default().save_to_file(path)?;
                println!("✅ 已恢复默认配置: {}", path.display());
                Ok(())
            },
        }
    }

    fn set_(
        path: &Path,
        frame_delay_ms: Option<u64>,
        gait_cycles: Option<u32>,
        safety: Option<bool>,
        limits: Vec<(ServoName, ServoRange)>,
    ) -> Result<()> {
        let mut config = SesameConfig::load_or_default(path)?;

        if let Some(ms) = frame_delay_ms {
            config.motion.frame_delay_ms = ms;
            println!("✅ 设置检查间隔: {} ms", ms);
        }

        if let Some(cycles) = gait_cycles {
            config.motion.gait_cycles = cycles;
            println!("✅ 设置步态循环次数: {}", cycles);
        }

        if let Some(enabled) = safety {
            config.safety.enabled = enabled;
            println!("✅ 安全检查: {}", if enabled { "开启" } else { "关闭" });
        }

        for (servo, range) in limits {
            config.safety.limits.0.set(servo, range);
            println!("✅ 设置 {} 范围: {} - {}", servo, range.min, range.max);
        }

        config.motion.validate().context("配置无效")?;
        config.save_to_file(path)?;
        Ok(())
    }

    fn get_(path: &Path, key: &str) -> Result<()> {
        let config = SesameConfig::load_or_default(path)?;

        match key {
            "frame_delay_ms" => println!("{}", config.motion.frame_delay_ms),

            "gait_cycles" => println!("{}", config.motion.gait_cycles),

            "safety" => println!("{}", config.safety.enabled),

            "limits" => {
                for servo in ServoName::ALL {
                    let range = config.safety.limits.range(servo);
                    println!("{}: {} - {}", servo, range.min, range.max);
                }
            },

            "all" => print!("{}", config.to_toml_string()?),

            _ => anyhow::bail!("未知配置项: {}", key),
        }

        Ok(())
    }

    fn check_(path: &Path) -> Result<()> {
        println!("配置文件: {}", path.display());
        let config = if path.exists() {
            SesameConfig::load_from_file(path)?
        } else {
            println!("  (不存在，使用默认配置)");
            SesameConfig::default()
        };

        println!("  检查间隔: {} ms", config.motion.frame_delay_ms);
        println!("  步态循环: {}", config.motion.gait_cycles);
        println!(
            "  安全检查: {}",
            if config.safety.enabled { "开启" } else { "关闭" }
        );

        // 内置动作表超出配置范围时提示
        let mut warnings = 0;
        for command in Command::ALL {
            for step in choreography(command).steps() {
                for a in step.set {
                    if let Err(e) = config.safety.limits.check_assignment(a) {
                        println!("⚠️  {}: {} (角度 {})", command, e, a.angle);
                        warnings += 1;
                    }
                }
            }
        }

        if warnings == 0 {
            println!("✅ 配置有效");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(
            parse_limit("R1=45:180").unwrap(),
            (ServoName::R1, ServoRange { min: 45, max: 180 })
        );
        assert_eq!(
            parse_limit("L3 = 10 : 170").unwrap(),
            (ServoName::L3, ServoRange { min: 10, max: 170 })
        );
        assert!(parse_limit("R1").is_err());
        assert!(parse_limit("X1=0:10").is_err());
        assert!(parse_limit("R1=90:45").is_err());
        assert!(parse_limit("R1=0:200").is_err());
    }

    #[test]
    fn test_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        ConfigCommand::Set {
            frame_delay_ms: Some(80),
            gait_cycles: None,
            safety: Some(false),
            limits: vec![(ServoName::R2, ServoRange { min: 10, max: 120 })],
        }
        .execute(&path)
        .unwrap();

        let config = SesameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.motion.frame_delay_ms, 80);
        assert_eq!(config.motion.gait_cycles, 10);
        assert!(!config.safety.enabled);
        assert_eq!(
            config.safety.limits.range(ServoName::R2),
            ServoRange { min: 10, max: 120 }
        );
    }

    #[test]
    fn test_set_rejects_zero_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let result = ConfigCommand::Set {
            frame_delay_ms: None,
            gait_cycles: Some(0),
            safety: None,
            limits: Vec::new(),
        }
        .execute(&path);
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_get_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(ConfigCommand::Get { key: "nope".to_string() }.execute(&path).is_err());
    }
}
