//! # Sesame CLI
//!
//! 在仿真机器人上运行 Sesame 的姿态与步态，编辑帧脚本，管理配置。
//!
//! ## One-shot 模式
//!
//! ```bash
//! # 查看所有指令
//! sesame-cli list
//!
//! # 执行姿态；步态会一直按住，直到 Ctrl+C 或 --hold-ms 到期
//! sesame-cli run wave
//! sesame-cli run forward --hold-ms 3000 --trace
//!
//! # 逐帧编辑脚本并导出为动作表条目
//! sesame-cli frame add --script wiggle.json --angles R1=100,L2=100 --delay-ms 300
//! sesame-cli frame export --script wiggle.json
//! ```
//!
//! ## REPL 模式
//!
//! ```bash
//! $ sesame-cli shell
//! sesame> wave
//! sesame> forward      # Ctrl+C 松开
//! sesame> exit
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod modes;

use commands::{ConfigCommand, FrameCommand, PlayCommand, RunCommand, ShowCommand};
use modes::repl::run_repl;

/// Sesame CLI - 四足机器人动作工具
#[derive(Parser, Debug)]
#[command(name = "sesame-cli")]
#[command(about = "Command-line interface for the Sesame quadruped pose sequencer", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 <config_dir>/sesame/config.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 列出所有指令
    List,

    /// 显示指令的编排表
    Show {
        #[command(flatten)]
        args: ShowCommand,
    },

    /// 在仿真机器人上执行指令
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 回放帧脚本
    Play {
        #[command(flatten)]
        args: PlayCommand,
    },

    /// 帧脚本编辑
    #[command(subcommand)]
    Frame(FrameCommand),

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 启动交互式 Shell（REPL 模式）
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sesame_cli=info".parse()?)
                .add_directive("sesame_choreo=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => commands::config::default_config_path()?,
    };

    match cli.command {
        Commands::List => {
            commands::list::print_list();
            Ok(())
        },

        Commands::Show { args } => {
            args.execute();
            Ok(())
        },

        Commands::Run { args } => args.execute(&config_path).await,

        Commands::Play { args } => args.execute(&config_path).await,

        Commands::Frame(cmd) => cmd.execute(&config_path),

        Commands::Config(cmd) => cmd.execute(&config_path),

        Commands::Shell => run_repl(&config_path).await,
    }
}
