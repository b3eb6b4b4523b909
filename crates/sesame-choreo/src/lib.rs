//! # Sesame Choreo
//!
//! 姿态与步态的声明式编排，以及执行它们的解释器。
//!
//! ## 结构
//!
//! - `sequence`: 数据模型（段落、单步、等待方式、收尾）与 `step!`/`set!` 宏
//! - `poses`: 15 个静态姿态与 4 个步态的静态表
//! - `executor`: [`Sequencer`]，逐段执行编排表，返回 [`Outcome`]
//! - `dispatcher`: [`Dispatcher`]，持有激活指令并在姿态完成后清除
//!
//! ## 示例
//!
//! ```rust,ignore
//! use sesame_choreo::{Dispatcher, Sequencer};
//! use sesame_driver::{SimConfig, SimulatedRobot};
//! use sesame_protocol::Command;
//! use sesame_tools::MotionConfig;
//!
//! let (robot, input) = SimulatedRobot::new(SimConfig::default())?;
//! let mut dispatcher = Dispatcher::new(Sequencer::new(robot, MotionConfig::default())?);
//!
//! input.press(Command::Forward)?;
//! dispatcher.submit(Command::Forward);
//! let outcome = dispatcher.run_active();
//! ```

mod error;

pub mod dispatcher;
pub mod executor;
pub mod poses;
pub mod sequence;

pub use dispatcher::Dispatcher;
pub use error::ChoreoError;
pub use executor::{Outcome, Sequencer};
pub use poses::{STAND, choreography};
pub use sequence::{Choreography, Finish, Repeat, Segment, Step, Wait};

#[doc(hidden)]
pub mod __private {
    pub use sesame_protocol::{Angle, Assignment, ServoName};
}
