//! # 配置文件
//!
//! TOML 格式，所有字段都有默认值，缺省的段落按默认值补齐：
//!
//! ```toml
//! [motion]
//! frame_delay_ms = 100
//! gait_cycles = 10
//!
//! [safety]
//! enabled = true
//!
//! [safety.limits]
//! R1 = { min = 45, max = 180 }
//! ```

use crate::safety::SafetyConfig;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 动作节奏配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// 步态每一步的协作式检查超时（毫秒）
    pub frame_delay_ms: u64,

    /// 步态外层循环次数（四种步态共用）
    pub gait_cycles: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 100,
            gait_cycles: 10,
        }
    }
}

impl MotionConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_delay_ms == 0 {
            bail!("frame_delay_ms must be > 0");
        }
        if self.gait_cycles == 0 {
            bail!("gait_cycles must be > 0");
        }
        Ok(())
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SesameConfig {
    pub motion: MotionConfig,
    pub safety: SafetyConfig,
}

impl SesameConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SesameConfig = toml::from_str(content).context("解析 TOML 配置失败")?;
        config.motion.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化 TOML 配置失败")
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// 文件不存在时返回默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// 保存配置到文件（自动创建父目录）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("创建配置目录失败")?;
        }
        fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))
    }
}
