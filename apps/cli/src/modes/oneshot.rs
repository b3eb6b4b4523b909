//! One-shot 模式
//!
//! 每个命令独立执行：
//! 1. 读取配置
//! 2. 创建仿真机器人（可选跟踪输出）
//! 3. 执行指令或帧脚本
//! 4. 打印结果与最终舵机角度

use anyhow::Result;
use sesame_choreo::{Outcome, Sequencer};
use sesame_driver::{
    ChannelHook, InputHandle, IoEvent, RobotState, SimConfig, SimulatedRobot,
};
use sesame_protocol::{Command, ServoName};
use sesame_tools::{FrameScript, SafetyConfig, SesameConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// 跟踪通道容量
const TRACE_CAPACITY: usize = 1024;

/// 执行结果
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: Outcome,
    pub state: RobotState,
    pub elapsed: Duration,
}

impl Report {
    pub fn print(&self) {
        println!();
        println!("📊 结果: {}", self.outcome);
        println!("  耗时: {:.2} 秒", self.elapsed.as_secs_f64());
        if let Some(face) = self.state.face {
            println!("  表情: {} ({}, 帧 {})", face, self.state.mode, self.state.face_frame);
        }
        println!("  空闲: {}", if self.state.idle { "是" } else { "否" });
        println!("  舵机:");
        for servo in ServoName::ALL {
            match self.state.angle(servo) {
                Some(angle) => println!("    {}: {}", servo, angle),
                None => println!("    {}: -", servo),
            }
        }
    }
}

/// One-shot 模式
pub struct OneShotMode {
    config: SesameConfig,
    sim: SimConfig,
    trace: bool,
}

impl OneShotMode {
    pub fn new(config: SesameConfig) -> Self {
        Self {
            config,
            sim: SimConfig::default(),
            trace: false,
        }
    }

    /// 是否真实等待
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.sim.realtime = realtime;
        self
    }

    /// 是否打印每一次 I/O 调用
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// 执行指令
    ///
    /// 步态的输入在开始前按下，Ctrl+C 或 `hold` 到期时松开。
    pub async fn run(self, command: Command, hold: Option<Duration>) -> Result<Report> {
        debug!("motion config: {:?}", self.config.motion);
        let session = Session::open(&self.sim, self.trace)?;

        if command.is_gait() {
            session.input.press(command)?;

            let input = session.input.clone();
            ctrlc::set_handler(move || {
                eprintln!("\n🛑 收到 Ctrl+C，松开输入");
                let _ = input.release();
            })?;

            if let Some(hold) = hold {
                let input = session.input.clone();
                thread::spawn(move || {
                    thread::sleep(hold);
                    let _ = input.release();
                });
            }
        }

        let motion = self.config.motion.clone();
        session
            .execute(move |robot| {
                let mut sequencer = Sequencer::new(robot, motion)?;
                Ok(sequencer.run(command))
            })
            .await
    }

    /// 回放帧脚本
    pub async fn play(self, script: FrameScript, safety: SafetyConfig) -> Result<Report> {
        let session = Session::open(&self.sim, self.trace)?;
        let motion = self.config.motion.clone();
        session
            .execute(move |robot| {
                let mut sequencer = Sequencer::new(robot, motion)?;
                Ok(sequencer.play_script(&script, &safety)?)
            })
            .await
    }
}

/// 一次执行所需的仿真资源
struct Session {
    robot: SimulatedRobot,
    input: InputHandle,
    tracer: Option<Tracer>,
}

struct Tracer {
    thread: thread::JoinHandle<()>,
    dropped: Arc<AtomicU64>,
}

impl Session {
    fn open(sim: &SimConfig, trace: bool) -> Result<Self> {
        let (mut robot, input) = SimulatedRobot::new(sim.clone())?;

        let tracer = if trace {
            let (hook, rx) = ChannelHook::new(TRACE_CAPACITY);
            let dropped = hook.dropped_events().clone();
            robot.add_hook(Arc::new(hook));

            // 机器人 drop 后通道关闭，线程退出
            let thread = thread::spawn(move || {
                for event in rx.iter() {
                    print_event(&event);
                }
            });
            Some(Tracer { thread, dropped })
        } else {
            None
        };

        Ok(Self {
            robot,
            input,
            tracer,
        })
    }

    /// 在阻塞线程中执行，返回结果与最终状态
    async fn execute<F>(self, f: F) -> Result<Report>
    where
        F: FnOnce(SimulatedRobot) -> Result<Outcome> + Send + 'static,
    {
        let observer = self.robot.observer();
        let robot = self.robot;
        let start = std::time::Instant::now();

        let outcome = tokio::task::spawn_blocking(move || f(robot)).await??;
        let elapsed = start.elapsed();

        if let Some(tracer) = self.tracer {
            let _ = tracer.thread.join();
            let dropped = tracer.dropped.load(Ordering::Relaxed);
            if dropped > 0 {
                warn!("trace output dropped {} events", dropped);
            }
        }
        drop(self.input);

        Ok(Report {
            outcome,
            state: observer.snapshot(),
            elapsed,
        })
    }
}

fn print_event(event: &IoEvent) {
    match event {
        IoEvent::Delay(_) | IoEvent::PressingCheck { .. } => println!("  ⏱  {}", event),
        _ => println!("  ·  {}", event),
    }
}
