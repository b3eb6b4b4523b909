//! run 命令
//!
//! 在仿真机器人上执行单个姿态或步态

use anyhow::Result;
use clap::Args;
use sesame_protocol::Command;
use sesame_tools::SesameConfig;
use std::path::Path;
use std::time::Duration;

use crate::modes::oneshot::OneShotMode;

/// 指令执行参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 指令名称（如 wave、forward）
    pub command: Command,

    /// 步态按住时长（毫秒），默认按住直到 Ctrl+C
    #[arg(long)]
    pub hold_ms: Option<u64>,

    /// 打印每一次 I/O 调用
    #[arg(long)]
    pub trace: bool,

    /// 步态循环次数（覆盖配置）
    #[arg(long)]
    pub cycles: Option<u32>,

    /// 协作式检查间隔（毫秒，覆盖配置）
    #[arg(long)]
    pub frame_delay_ms: Option<u64>,

    /// 不真实等待
    #[arg(long)]
    pub fast: bool,
}

impl RunCommand {
    /// 命令行参数覆盖配置文件
    pub fn apply_overrides(&self, config: &mut SesameConfig) {
        if let Some(cycles) = self.cycles {
            config.motion.gait_cycles = cycles;
        }
        if let Some(frame_delay_ms) = self.frame_delay_ms {
            config.motion.frame_delay_ms = frame_delay_ms;
        }
    }

    pub async fn execute(&self, config_path: &Path) -> Result<()> {
        let mut config = SesameConfig::load_or_default(config_path)?;
        self.apply_overrides(&mut config);

        println!("🤖 执行: {} ({:?})", self.command, self.command.kind());
        if self.command.is_gait() {
            match self.hold_ms {
                Some(ms) => println!("   按住 {} ms", ms),
                None => println!("   按住中，Ctrl+C 松开"),
            }
        }

        let report = OneShotMode::new(config)
            .realtime(!self.fast)
            .trace(self.trace)
            .run(self.command, self.hold_ms.map(Duration::from_millis))
            .await?;
        report.print();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let cmd = RunCommand {
            command: Command::Left,
            hold_ms: None,
            trace: false,
            cycles: Some(2),
            frame_delay_ms: None,
            fast: true,
        };
        let mut config = SesameConfig::default();
        cmd.apply_overrides(&mut config);
        assert_eq!(config.motion.gait_cycles, 2);
        assert_eq!(config.motion.frame_delay_ms, 100);
    }
}
