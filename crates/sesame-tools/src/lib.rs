//! # Sesame Tools - 共享配置与数据结构
//!
//! **依赖原则**: 只依赖 `sesame-protocol`，不依赖驱动层和编排层
//!
//! ## 包含模块
//!
//! - `config` - TOML 配置（动作节奏、安全限制）
//! - `safety` - 每个舵机的机械角度范围
//! - `frames` - 帧脚本（JSON）与代码导出
//! - `per_servo` - 按舵机名索引的定长表

pub mod config;
pub mod frames;
pub mod per_servo;
pub mod safety;

// 重新导出常用类型
pub use config::{MotionConfig, SesameConfig};
pub use frames::{Frame, FrameScript, STUDIO_ORDER, render_frames};
pub use per_servo::PerServo;
pub use safety::{SafetyConfig, SafetyLimits, SafetyViolation, ServoRange};
