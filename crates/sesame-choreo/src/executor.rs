//! 编排执行器
//!
//! 一个解释器执行所有静态表：逐段写舵机、等待、检查输入。
//! 执行是同步的，只在等待与协作式检查处挂起。

use crate::error::ChoreoError;
use crate::poses::{STAND, choreography};
use crate::sequence::{Choreography, Finish, Repeat, Segment, Step, Wait};
use sesame_driver::RobotIo;
use sesame_protocol::{Command, Face, FaceAnimMode};
use sesame_tools::{FrameScript, MotionConfig, SafetyConfig};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// 执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 全部段落执行完毕（含收尾）
    Completed,
    /// 协作式检查失败，舵机停留在当前位置
    Aborted {
        /// 所在循环，`None` 表示在重复块之外（如起步）
        cycle: Option<u32>,
        /// 块内的步序号
        step: usize,
    },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed => f.write_str("completed"),
            Outcome::Aborted { cycle: None, step } => write!(f, "aborted at lead-in step {}", step),
            Outcome::Aborted {
                cycle: Some(cycle),
                step,
            } => write!(f, "aborted at cycle {} step {}", cycle, step),
        }
    }
}

/// 编排执行器
///
/// ```rust,ignore
/// let mut sequencer = Sequencer::new(robot, MotionConfig::default())?;
/// let outcome = sequencer.run(Command::Wave);
/// assert!(outcome.is_completed());
/// ```
pub struct Sequencer<R: RobotIo> {
    io: R,
    motion: MotionConfig,
}

impl<R: RobotIo> Sequencer<R> {
    pub fn new(io: R, motion: MotionConfig) -> Result<Self, ChoreoError> {
        motion
            .validate()
            .map_err(|e| ChoreoError::InvalidConfig(e.to_string()))?;
        Ok(Self { io, motion })
    }

    pub fn io(&self) -> &R {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut R {
        &mut self.io
    }

    pub fn into_inner(self) -> R {
        self.io
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// 执行指令对应的姿态或步态
    pub fn run(&mut self, command: Command) -> Outcome {
        self.perform(choreography(command))
    }

    /// 执行任意编排表
    pub fn perform(&mut self, choreo: &Choreography<'_>) -> Outcome {
        info!("{}", choreo.label);

        let mut lead_in = 0usize;
        for segment in choreo.segments {
            match segment {
                Segment::Face(face, mode) => self.io.set_face_with_mode(*face, *mode),
                Segment::StandQuiet => self.stand(false),
                Segment::Step(step) => {
                    if !self.step(choreo.command, step) {
                        return self.abort(choreo, None, lead_in);
                    }
                    lead_in += 1;
                },
                Segment::Repeat(repeat, steps) => {
                    let cycles = match repeat {
                        Repeat::Times(n) => *n,
                        Repeat::GaitCycles => self.motion.gait_cycles,
                    };
                    for cycle in 0..cycles {
                        for (i, step) in steps.iter().enumerate() {
                            if !self.step(choreo.command, step) {
                                return self.abort(choreo, Some(cycle), i);
                            }
                        }
                    }
                },
            }
        }

        match choreo.finish {
            Finish::Stand => self.stand(true),
            Finish::Idle => self.io.enter_idle(),
            Finish::Hold => {},
        }
        Outcome::Completed
    }

    /// 站立
    ///
    /// `full` 为 `true` 时先切换到 `stand`/`once` 表情，写入后进入空闲；
    /// 否则只写站立角度（动作内部使用）。
    pub fn stand(&mut self, full: bool) {
        debug!("stand (full: {})", full);
        if full {
            self.io.set_face_with_mode(Face::Stand, FaceAnimMode::Once);
        }
        for a in STAND {
            self.io.set_servo_angle(a.servo, a.angle);
        }
        if full {
            self.io.enter_idle();
        }
    }

    /// 回放帧脚本
    ///
    /// 表情 `stand`/`once`，逐帧写入并延时，结束后保持最后一帧。
    /// 安全检查开启时，任何一帧越界都会在写入舵机之前被拒绝。
    pub fn play_script(
        &mut self,
        script: &FrameScript,
        safety: &SafetyConfig,
    ) -> Result<Outcome, ChoreoError> {
        if safety.enabled {
            script
                .validate(&safety.limits)
                .map_err(|(i, source)| ChoreoError::Safety { frame: i + 1, source })?;
        }

        let sets: Vec<_> = script.frames.iter().map(|f| f.assignments()).collect();
        let mut segments = Vec::with_capacity(sets.len() + 1);
        segments.push(Segment::Face(Face::Stand, FaceAnimMode::Once));
        segments.extend(sets.iter().zip(&script.frames).map(|(set, frame)| {
            Segment::Step(Step {
                set: set.as_slice(),
                wait: Wait::Millis(frame.delay_ms),
            })
        }));

        let choreo = Choreography {
            command: None,
            label: &script.name,
            segments: &segments,
            finish: Finish::Hold,
        };
        Ok(self.perform(&choreo))
    }

    /// 执行单步，返回是否继续
    fn step(&mut self, command: Option<Command>, step: &Step<'_>) -> bool {
        for a in step.set {
            trace!("{} -> {}", a.servo, a.angle);
            self.io.set_servo_angle(a.servo, a.angle);
        }
        match step.wait {
            Wait::None => true,
            Wait::Millis(ms) => {
                self.io.delay_with_face(Duration::from_millis(ms));
                true
            },
            Wait::Check => match command {
                Some(command) => self.io.pressing_check(command, self.motion.frame_delay()),
                None => true,
            },
        }
    }

    fn abort(&self, choreo: &Choreography<'_>, cycle: Option<u32>, step: usize) -> Outcome {
        let outcome = Outcome::Aborted { cycle, step };
        warn!("{}: input released, {}", choreo.label, outcome);
        outcome
    }
}
