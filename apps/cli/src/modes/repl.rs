//! REPL 模式（交互式 Shell）
//!
//! 专用输入线程 + crossbeam 通道，保留历史记录，不阻塞 tokio。
//!
//! 输入线程直接持有仿真机器人的 [`InputHandle`]：动作执行期间主任务在等待，
//! Ctrl+C 或 `stop` 由输入线程立即松开输入，正在执行的步态在下一次检查时停止。

use anyhow::Result;
use crossbeam_channel::{Receiver, bounded};
use rustyline::Editor;
use sesame_choreo::{Dispatcher, Outcome, Sequencer, choreography};
use sesame_driver::{InputHandle, Observer, SimConfig, SimulatedRobot};
use sesame_protocol::{Command, ServoName};
use sesame_tools::SesameConfig;
use std::path::Path;
use std::thread;

use crate::commands::list::{describe, print_list};

/// Ctrl+C 在通道中的标记
const SIGINT: &str = "SIGINT";

/// REPL 会话（保持仿真机器人）
pub struct ReplSession {
    /// 执行期间移入阻塞线程
    dispatcher: Option<Dispatcher<SimulatedRobot>>,
    input: InputHandle,
    observer: Observer,
}

impl ReplSession {
    pub fn new(config: &SesameConfig) -> Result<Self> {
        let (robot, input) = SimulatedRobot::new(SimConfig::default())?;
        let observer = robot.observer();
        let sequencer = Sequencer::new(robot, config.motion.clone())?;

        Ok(Self {
            dispatcher: Some(Dispatcher::new(sequencer)),
            input,
            observer,
        })
    }

    pub fn input(&self) -> &InputHandle {
        &self.input
    }

    fn dispatcher(&self) -> Result<&Dispatcher<SimulatedRobot>> {
        self.dispatcher
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("上一个动作仍在执行"))
    }

    /// 提交并执行指令
    ///
    /// 步态完成一轮后若输入仍按住则继续执行，直到松开。
    pub async fn perform(&mut self, command: Command) -> Result<Outcome> {
        if command.is_gait() {
            self.input.press(command)?;
            println!("⏳ {}（Ctrl+C 或 stop 松开）", command);
        } else {
            println!("⏳ {}", command);
        }

        let mut dispatcher = self
            .dispatcher
            .take()
            .ok_or_else(|| anyhow::anyhow!("上一个动作仍在执行"))?;
        dispatcher.submit(command);

        let (dispatcher, outcome) = tokio::task::spawn_blocking(move || {
            let mut outcome = Outcome::Completed;
            while let Some(next) = dispatcher.run_active() {
                outcome = next;
                let held = dispatcher.sequencer().io().asserted() == Some(command);
                if !(command.is_gait() && outcome.is_completed() && held) {
                    break;
                }
            }
            // 松开后不再重复步态
            if command.is_gait() {
                dispatcher.clear();
            }
            (dispatcher, outcome)
        })
        .await?;

        self.dispatcher = Some(dispatcher);
        Ok(outcome)
    }

    /// 当前激活指令与舵机角度
    pub fn print_status(&self) -> Result<()> {
        let dispatcher = self.dispatcher()?;
        let state = self.observer.snapshot();

        match dispatcher.active() {
            Some(command) => println!("📊 激活指令: {}", command),
            None => println!("📊 激活指令: -"),
        }
        if let Some(face) = state.face {
            println!("  表情: {} ({})", face, state.mode);
        }
        println!("  空闲: {}", if state.idle { "是" } else { "否" });
        for servo in ServoName::ALL {
            match state.angle(servo) {
                Some(angle) => println!("  {}: {}", servo, angle),
                None => println!("  {}: -", servo),
            }
        }
        Ok(())
    }
}

/// REPL 输入（专用输入线程）
pub struct ReplInput {
    command_rx: Receiver<String>,
    _input_thread: thread::JoinHandle<Result<()>>,
}

impl ReplInput {
    /// 创建专用输入线程（保留历史记录）
    pub fn new(input: InputHandle) -> Self {
        let (command_tx, command_rx) = bounded::<String>(10);

        // Editor 在输入线程内创建，生命周期 = REPL 会话
        let input_thread = thread::spawn(move || {
            use rustyline::history::DefaultHistory;

            let mut rl = Editor::<(), DefaultHistory>::new()
                .map_err(|e| anyhow::anyhow!("Failed to initialize readline: {}", e))?;

            let history_path = ".sesame_history";
            rl.load_history(history_path).ok(); // 首次运行没有历史文件

            println!("Sesame CLI v{} - 交互式 Shell", env!("CARGO_PKG_VERSION"));
            println!("输入 'help' 查看帮助，'exit' 退出");
            println!();

            loop {
                match rl.readline("sesame> ") {
                    Ok(line) => {
                        let line: String = line.trim().to_string();

                        if line.is_empty() {
                            continue;
                        }

                        if line == "exit" || line == "quit" {
                            rl.save_history(history_path).ok();
                            let _ = command_tx.send(line);
                            break;
                        }

                        let _ = rl.add_history_entry(line.clone());

                        // 不经过主任务，执行中的步态也能立即停下
                        if line == "stop" {
                            let _ = input.release();
                        }

                        if command_tx.send(line).is_err() {
                            break; // 主任务已退出
                        }
                    },

                    Err(rustyline::error::ReadlineError::Interrupted) => {
                        println!("^C");
                        let _ = input.release();
                        let _ = command_tx.send(SIGINT.to_string());
                    },

                    Err(rustyline::error::ReadlineError::Eof) => {
                        rl.save_history(history_path).ok();
                        let _ = command_tx.send("exit".to_string());
                        break;
                    },

                    Err(err) => {
                        eprintln!("Error: {:?}", err);
                        break;
                    },
                }
            }

            Ok(())
        });

        Self {
            command_rx,
            _input_thread: input_thread,
        }
    }

    /// 等待用户输入（在 tokio 任务中使用）
    pub async fn recv_command(&self) -> Option<String> {
        let rx = self.command_rx.clone();
        tokio::task::spawn_blocking(move || rx.recv())
            .await
            .ok()
            .and_then(|result| result.ok())
    }
}

/// 运行 REPL 模式
pub async fn run_repl(config_path: &Path) -> Result<()> {
    let config = SesameConfig::load_or_default(config_path)?;
    let mut session = ReplSession::new(&config)?;
    let input = ReplInput::new(session.input().clone());

    println!();
    println!("💡 提示: 输入指令名执行动作，例如 'wave' 或 'forward'");
    println!();

    while let Some(line) = input.recv_command().await {
        if line == SIGINT {
            println!("🛑 已松开输入");
            continue;
        }

        match line.as_str() {
            "exit" | "quit" => {
                println!("👋 再见！");
                break;
            },

            "help" => print_help(),

            _ => {
                if let Err(err) = handle_command(&line, &mut session).await {
                    eprintln!("❌ Error: {}", err);
                    print_help_hint(&line);
                }
            },
        }
    }

    Ok(())
}

/// 处理命令
async fn handle_command(line: &str, session: &mut ReplSession) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Ok(());
    }

    match parts[0] {
        "status" => session.print_status()?,

        "list" => print_list(),

        "show" => {
            let name = parts.get(1).ok_or_else(|| anyhow::anyhow!("缺少指令名"))?;
            let command: Command = name.parse()?;
            for line in describe(choreography(command)) {
                println!("{}", line);
            }
        },

        "stop" => {
            // 输入已由输入线程松开
            println!("🛑 已停止");
        },

        name => {
            let command: Command = name.parse()?;
            let outcome = session.perform(command).await?;
            match outcome {
                Outcome::Completed => println!("✅ {}", outcome),
                Outcome::Aborted { .. } => println!("🛑 {}", outcome),
            }
        },
    }

    Ok(())
}

/// 打印帮助信息
fn print_help() {
    println!("可用命令:");
    println!("  <指令>                        执行姿态或步态（如 wave, forward）");
    println!("  list                          列出所有指令");
    println!("  show <指令>                   显示编排表");
    println!("  status                        显示激活指令与舵机角度");
    println!("  stop                          松开输入，停止步态");
    println!("  help                          显示帮助");
    println!("  exit / quit                   退出");
    println!();
    println!("快捷键:");
    println!("  Ctrl+C                        松开输入");
    println!("  Ctrl+D                        退出");
    println!();
}

/// 提供基于错误的帮助提示
fn print_help_hint(command: &str) {
    if command.starts_with("show") {
        eprintln!("💡 提示: 使用 'show dance' 查看编排表");
    } else {
        eprintln!("💡 提示: 输入 'help' 查看帮助，'list' 查看所有指令");
    }
}
