//! 动作编排的数据模型
//!
//! 每个姿态或步态都是一张静态表 [`Choreography`]：按顺序排列的段落
//! （表情切换、安静站立、单步、重复块），外加结束方式。
//! 所有表由同一个执行器 [`Sequencer`](crate::Sequencer) 解释执行。
//!
//! 表项使用 [`step!`](crate::step) 与 [`set!`](crate::set) 宏书写：
//!
//! ```rust
//! use sesame_choreo::{Step, Wait, step};
//!
//! static RAISE: Step<'static> = step!(300; R4 => 45, L4 => 135);
//! static PROBE: Step<'static> = step!(check; R3 => 135, L3 => 0);
//!
//! assert_eq!(RAISE.wait, Wait::Millis(300));
//! assert_eq!(PROBE.set.len(), 2);
//! ```

use sesame_protocol::{Assignment, Command, Face, FaceAnimMode};
use std::fmt;

/// 一步结束后的等待方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// 不等待，直接进入下一步
    None,
    /// 固定延时（毫秒），期间推进表情动画
    Millis(u64),
    /// 协作式检查：最多等待一个帧间隔，输入松开则中止
    Check,
}

/// 单步：按顺序写入一组舵机角度，然后等待
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub set: &'a [Assignment],
    pub wait: Wait,
}

/// 重复次数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    /// 使用配置中的步态循环次数
    GaitCycles,
}

/// 编排段落
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 切换表情与播放模式
    Face(Face, FaceAnimMode),
    /// 站立角度，不切换表情也不进入空闲
    StandQuiet,
    Step(Step<'a>),
    Repeat(Repeat, &'a [Step<'a>]),
}

/// 执行完所有段落后的收尾
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// 完整站立：表情 `stand`/`once`，站立角度，进入空闲
    Stand,
    /// 保持最后的姿势
    Hold,
    /// 只进入空闲
    Idle,
}

/// 一个姿态或步态的完整编排
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choreography<'a> {
    /// 所属指令，帧脚本没有对应指令
    pub command: Option<Command>,
    /// 诊断标签，如 `WAVE`、`WALK FWD`
    pub label: &'a str,
    pub segments: &'a [Segment<'a>],
    pub finish: Finish,
}

impl<'a> Choreography<'a> {
    /// 第一个表情指令
    pub fn opening_face(&self) -> Option<(Face, FaceAnimMode)> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Face(face, mode) => Some((*face, *mode)),
            _ => None,
        })
    }

    /// 展开后的全部单步（重复块只出现一次，不含安静站立）
    pub fn steps(&self) -> impl Iterator<Item = &Step<'a>> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| match segment {
                Segment::Step(step) => std::slice::from_ref(step),
                Segment::Repeat(_, steps) => *steps,
                _ => &[],
            })
    }

    /// 是否以站立收尾
    pub fn returns_to_stand(&self) -> bool {
        self.finish == Finish::Stand
    }
}

impl fmt::Display for Wait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wait::None => f.write_str("-"),
            Wait::Millis(ms) => write!(f, "wait {} ms", ms),
            Wait::Check => f.write_str("check"),
        }
    }
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.set.is_empty() {
            f.write_str("(no change)")?;
        }
        for (i, a) in self.set.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", a.servo, a.angle.0)?;
        }
        write!(f, " | {}", self.wait)
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repeat::Times(n) => write!(f, "x{}", n),
            Repeat::GaitCycles => f.write_str("x gait_cycles"),
        }
    }
}

/// 角度赋值列表
///
/// `set![R1 => 135, L2 => 60]` 展开为 `&[Assignment]` 字面量，可用于静态表。
#[macro_export]
macro_rules! set {
    ($($servo:ident => $deg:expr),* $(,)?) => {
        &[$(
            $crate::__private::Assignment {
                servo: $crate::__private::ServoName::$servo,
                angle: $crate::__private::Angle($deg),
            }
        ),*]
    };
}

/// 单步
///
/// - `step!(300; R4 => 45)`：写入后延时 300 ms
/// - `step!(check; R4 => 45)`：写入后做协作式检查
/// - `step!(_; R4 => 45)`：写入后不等待
#[macro_export]
macro_rules! step {
    (check; $($servo:ident => $deg:expr),* $(,)?) => {
        $crate::Step {
            set: $crate::set![$($servo => $deg),*],
            wait: $crate::Wait::Check,
        }
    };
    (_; $($servo:ident => $deg:expr),* $(,)?) => {
        $crate::Step {
            set: $crate::set![$($servo => $deg),*],
            wait: $crate::Wait::None,
        }
    };
    ($ms:expr; $($servo:ident => $deg:expr),* $(,)?) => {
        $crate::Step {
            set: $crate::set![$($servo => $deg),*],
            wait: $crate::Wait::Millis($ms),
        }
    };
}
