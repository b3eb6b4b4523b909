//! 钩子系统（Hook System）
//!
//! 在每次 I/O 调用时触发自定义回调，用于 CLI 跟踪输出、调试和录制。
//!
//! # 设计原则
//!
//! - **非阻塞**: 回调不得阻塞动作执行，推荐使用 Channel 异步处理
//! - **类型安全**: 使用 `dyn IoHook` trait object，支持多种回调类型
//!
//! # 使用示例
//!
//! ```rust
//! use sesame_driver::hooks::{ChannelHook, HookManager, IoEvent, IoHook};
//! use sesame_protocol::{Angle, ServoName};
//! use std::sync::Arc;
//!
//! let mut hooks = HookManager::new();
//! let (hook, rx) = ChannelHook::new(64);
//! hooks.add_hook(Arc::new(hook));
//!
//! hooks.trigger_all(&IoEvent::ServoAngle { servo: ServoName::R1, angle: Angle(135) });
//! assert_eq!(rx.try_recv().unwrap(), IoEvent::ServoAngle { servo: ServoName::R1, angle: Angle(135) });
//! ```

use crossbeam_channel::{Receiver, Sender, bounded};
use sesame_protocol::{Angle, Command, Face, FaceAnimMode, ServoName};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 一次 I/O 调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoEvent {
    ServoAngle { servo: ServoName, angle: Angle },
    Face(Face),
    FaceMode(FaceAnimMode),
    FaceWithMode { face: Face, mode: FaceAnimMode },
    Delay(Duration),
    Idle,
    PressingCheck { command: Command, timeout: Duration, held: bool },
}

impl fmt::Display for IoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoEvent::ServoAngle { servo, angle } => write!(f, "servo {} -> {}", servo, angle),
            IoEvent::Face(face) => write!(f, "face {}", face),
            IoEvent::FaceMode(mode) => write!(f, "face mode {}", mode),
            IoEvent::FaceWithMode { face, mode } => write!(f, "face {} ({})", face, mode),
            IoEvent::Delay(d) => write!(f, "wait {} ms", d.as_millis()),
            IoEvent::Idle => f.write_str("idle"),
            IoEvent::PressingCheck {
                command,
                timeout,
                held,
            } => write!(
                f,
                "check {} ({} ms): {}",
                command,
                timeout.as_millis(),
                if *held { "held" } else { "released" }
            ),
        }
    }
}

/// I/O 事件回调
///
/// 实现必须是非阻塞的，推荐使用 `try_send`。
pub trait IoHook: Send + Sync {
    fn on_event(&self, event: &IoEvent);
}

/// 钩子管理器
///
/// 回调列表本身不是线程安全的，需要外部同步。
#[derive(Default)]
pub struct HookManager {
    hooks: Vec<Arc<dyn IoHook>>,
}

impl HookManager {
    #[must_use]
    pub const fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn add_hook(&mut self, hook: Arc<dyn IoHook>) {
        self.hooks.push(hook);
    }

    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    pub fn trigger_all(&self, event: &IoEvent) {
        for hook in self.hooks.iter() {
            hook.on_event(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

/// 基于有界 Channel 的事件钩子
///
/// 队列满时丢弃事件并计数，而不是阻塞动作执行。
pub struct ChannelHook {
    tx: Sender<IoEvent>,
    dropped_events: Arc<AtomicU64>,
}

impl ChannelHook {
    /// 创建钩子，返回钩子与接收端
    pub fn new(capacity: usize) -> (Self, Receiver<IoEvent>) {
        let (tx, rx) = bounded(capacity);
        (
            Self {
                tx,
                dropped_events: Arc::new(AtomicU64::new(0)),
            },
            rx,
        )
    }

    /// 丢弃事件计数器
    pub fn dropped_events(&self) -> &Arc<AtomicU64> {
        &self.dropped_events
    }
}

impl IoHook for ChannelHook {
    fn on_event(&self, event: &IoEvent) {
        if self.tx.try_send(event.clone()).is_err() {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
        }
    }
}
