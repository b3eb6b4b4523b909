//! 帧脚本编辑命令
//!
//! 每次 `add` 以上一帧为起点（新脚本从全 90 度开始），只修改指定的舵机。

use anyhow::{Context, Result};
use clap::Subcommand;
use sesame_protocol::ServoName;
use sesame_tools::{Frame, FrameScript, STUDIO_ORDER, SesameConfig, render_frames};
use std::fs;
use std::path::{Path, PathBuf};

/// 解析 `R1=135`
pub fn parse_assignment(s: &str) -> Result<(ServoName, i32), String> {
    let (name, angle) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SERVO=ANGLE, got {:?}", s))?;
    let servo: ServoName = name.trim().parse().map_err(|e| format!("{}", e))?;
    let angle: i32 = angle
        .trim()
        .parse()
        .map_err(|_| format!("invalid angle: {:?}", angle))?;
    Ok((servo, angle))
}

/// 帧脚本命令
#[derive(Subcommand, Debug)]
pub enum FrameCommand {
    /// 追加一帧
    Add {
        /// 脚本文件路径（不存在时创建）
        #[arg(short, long)]
        script: PathBuf,

        /// 新脚本名称（默认取文件名）
        #[arg(long)]
        name: Option<String>,

        /// 舵机角度，如 R1=100,L2=60
        #[arg(long, value_delimiter = ',', value_parser = parse_assignment)]
        angles: Vec<(ServoName, i32)>,

        /// 帧后延时（毫秒）
        #[arg(long, default_value_t = 200)]
        delay_ms: u64,
    },

    /// 删除一帧（从 1 开始）
    Remove {
        #[arg(short, long)]
        script: PathBuf,

        #[arg(long)]
        index: usize,
    },

    /// 列出所有帧
    List {
        #[arg(short, long)]
        script: PathBuf,
    },

    /// 导出为动作表条目
    Export {
        #[arg(short, long)]
        script: PathBuf,

        /// 输出文件（默认打印到标准输出）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl FrameCommand {
    pub fn execute(&self, config_path: &Path) -> Result<()> {
        match self {
            FrameCommand::Add {
                script,
                name,
                angles,
                delay_ms,
            } => {
                let config = SesameConfig::load_or_default(config_path)?;
                let mut frames = open_or_create(script, name.as_deref())?;

                let mut frame = frames.frames.last().copied().unwrap_or_default();
                for &(servo, angle) in angles {
                    frame.angles.set(servo, angle);
                }
                frame.delay_ms = *delay_ms;

                if config.safety.enabled {
                    frames
                        .add_frame(frame, &config.safety.limits)
                        .with_context(|| format!("Frame {}", frames.frames.len() + 1))?;
                } else {
                    frames.frames.push(frame);
                }
                frames.save(script)?;

                println!("✅ 添加第 {} 帧", frames.frames.len());
                println!("  {}", format_frame(&frame));
                Ok(())
            },

            FrameCommand::Remove { script, index } => {
                let mut frames = FrameScript::load(script)?;
                if *index == 0 || *index > frames.frames.len() {
                    anyhow::bail!(
                        "帧序号超出范围: {}（共 {} 帧）",
                        index,
                        frames.frames.len()
                    );
                }
                frames.frames.remove(index - 1);
                frames.save(script)?;
                println!("✅ 删除第 {} 帧，剩余 {} 帧", index, frames.frames.len());
                Ok(())
            },

            FrameCommand::List { script } => {
                let frames = FrameScript::load(script)?;
                println!("📋 {}（{} 帧）", frames.name, frames.frames.len());
                for (i, frame) in frames.frames.iter().enumerate() {
                    println!("  {:>3}. {}", i + 1, format_frame(frame));
                }
                Ok(())
            },

            FrameCommand::Export { script, output } => {
                let frames = FrameScript::load(script)?;
                let code = render_frames(&frames.frames);
                match output {
                    Some(path) => {
                        fs::write(path, code).context("写入导出文件失败")?;
                        println!("✅ 导出 {} 帧到 {}", frames.frames.len(), path.display());
                    },
                    None => print!("{}", code),
                }
                Ok(())
            },
        }
    }
}

fn open_or_create(path: &Path, name: Option<&str>) -> Result<FrameScript> {
    if path.exists() {
        return FrameScript::load(path);
    }

    let name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string()),
    };
    Ok(FrameScript::new(name))
}

fn format_frame(frame: &Frame) -> String {
    let angles: Vec<String> = STUDIO_ORDER
        .iter()
        .map(|&servo| format!("{}={}", servo, frame.angles.get(servo)))
        .collect();
    format!("{} | {} ms", angles.join(" "), frame.delay_ms)
}
