//! play 命令
//!
//! 在仿真机器人上回放帧脚本

use anyhow::Result;
use clap::Args;
use sesame_tools::{FrameScript, SesameConfig};
use std::path::{Path, PathBuf};

use crate::modes::oneshot::OneShotMode;

/// 脚本回放参数
#[derive(Args, Debug)]
pub struct PlayCommand {
    /// 脚本文件路径
    #[arg(short, long)]
    pub script: PathBuf,

    /// 跳过安全范围检查
    #[arg(long)]
    pub no_safety: bool,

    /// 打印每一次 I/O 调用
    #[arg(long)]
    pub trace: bool,

    /// 不真实等待
    #[arg(long)]
    pub fast: bool,
}

impl PlayCommand {
    pub async fn execute(&self, config_path: &Path) -> Result<()> {
        let config = SesameConfig::load_or_default(config_path)?;
        let mut safety = config.safety.clone();
        if self.no_safety {
            safety.enabled = false;
        }

        println!("📜 加载脚本: {}", self.script.display());
        let script = FrameScript::load(&self.script)?;

        println!("📋 脚本: {}", script.name);
        if !script.description.is_empty() {
            println!("    {}", script.description);
        }
        println!(
            "    {} 帧，共 {} ms",
            script.frames.len(),
            script.total_delay_ms()
        );
        if !safety.enabled {
            println!("⚠️  安全检查已关闭");
        }

        let report = OneShotMode::new(config)
            .realtime(!self.fast)
            .trace(self.trace)
            .play(script, safety)
            .await?;
        report.print();
        Ok(())
    }
}
