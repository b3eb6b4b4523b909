//! 驱动层模块
//!
//! 本模块定义动作编排层依赖的外部协作者接口，并提供：
//! - [`RobotIo`] trait：舵机、表情、延时、空闲、输入检查
//! - 钩子系统：将每次 I/O 调用以 [`IoEvent`] 形式分发给回调
//! - 表情动画播放（loop / once / boomerang）
//! - 仿真机器人 [`SimulatedRobot`]：在主机上实时运行动作
//! - Mock 机器人（`mock` feature）：无延时，记录所有调用，用于测试
//!
//! # 使用场景
//!
//! 真实硬件只需实现 [`RobotIo`]。大多数用户应该通过
//! `sesame-choreo` 的 `Sequencer` 间接使用本模块。

mod error;
pub mod face;
pub mod hooks;
pub mod io;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod sim;

pub use error::DriverError;
pub use face::FaceAnimator;
pub use hooks::{ChannelHook, HookManager, IoEvent, IoHook};
pub use io::RobotIo;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRobot;
pub use sim::{InputEvent, InputHandle, Observer, RobotState, SimConfig, SimulatedRobot};
