//! 运行模式
//!
//! 支持两种模式：
//! - One-shot 模式：每次命令独立创建仿真机器人
//! - REPL 模式：交互式 Shell，会话内保持机器人状态

pub mod oneshot;
pub mod repl;
