//! # Sesame Protocol
//!
//! 四足机器人 Sesame 的基础数据定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `servo`: 舵机通道（`R1`…`L4`）、角度、角度赋值
//! - `face`: 表情资源与播放模式
//! - `command`: 指令标识（静态姿态 + 步态）
//!
//! ## 通道编号
//!
//! 通道编号与固件 PWM 板的接线一致，注意 `R4` 在 `R3` 之前：
//!
//! ```text
//! R1=0  R2=1  L1=2  L2=3  R4=4  R3=5  L3=6  L4=7
//! ```

pub mod command;
pub mod face;
pub mod servo;

// 重新导出常用类型
pub use command::{Command, CommandKind};
pub use face::{Face, FaceAnimMode};
pub use servo::{
    Angle, Assignment, SERVO_COUNT, SERVO_NOT_FOUND, ServoName, resolve_servo_index,
};

use thiserror::Error;

/// 协议层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown servo name: {0:?}")]
    UnknownServo(String),

    #[error("Unknown face asset: {0:?}")]
    UnknownFace(String),

    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("Angle out of range: {value} (expected 0..={max})")]
    AngleOutOfRange { value: i32, max: u8 },

    #[error("Invalid value for field {field}: {value}")]
    InvalidValue { field: String, value: u8 },
}
