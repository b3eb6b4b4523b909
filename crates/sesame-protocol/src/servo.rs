//! 舵机通道与角度
//!
//! 八个舵机按腿部位置命名：`R`/`L` 表示右/左，`1`/`2` 为髋关节（前/后），
//! `3`/`4` 为膝关节（前/后）。

use crate::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// 舵机通道数量
pub const SERVO_COUNT: usize = 8;

/// 名称解析失败时返回的哨兵值
pub const SERVO_NOT_FOUND: i8 = -1;

/// 舵机通道
///
/// 判别值即 PWM 通道编号。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ServoName {
    R1 = 0,
    R2 = 1,
    L1 = 2,
    L2 = 3,
    R4 = 4,
    R3 = 5,
    L3 = 6,
    L4 = 7,
}

impl ServoName {
    /// 按通道编号排列的全部舵机
    pub const ALL: [ServoName; SERVO_COUNT] = [
        ServoName::R1,
        ServoName::R2,
        ServoName::L1,
        ServoName::L2,
        ServoName::R4,
        ServoName::R3,
        ServoName::L3,
        ServoName::L4,
    ];

    /// 通道编号（0-7）
    pub fn index(self) -> usize {
        u8::from(self) as usize
    }

    /// 按通道编号查找
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 名称（区分大小写）
    pub fn as_str(self) -> &'static str {
        match self {
            ServoName::R1 => "R1",
            ServoName::R2 => "R2",
            ServoName::L1 => "L1",
            ServoName::L2 => "L2",
            ServoName::R4 => "R4",
            ServoName::R3 => "R3",
            ServoName::L3 => "L3",
            ServoName::L4 => "L4",
        }
    }

    /// 是否为髋关节（`1`/`2`），否则为膝关节
    pub fn is_hip(self) -> bool {
        matches!(
            self,
            ServoName::R1 | ServoName::R2 | ServoName::L1 | ServoName::L2
        )
    }
}

impl fmt::Display for ServoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServoName {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|servo| servo.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownServo(s.to_string()))
    }
}

/// 名称到通道编号的解析
///
/// 未知名称返回 [`SERVO_NOT_FOUND`]（-1）。名称区分大小写。
///
/// ```rust
/// use sesame_protocol::{resolve_servo_index, SERVO_NOT_FOUND};
///
/// assert_eq!(resolve_servo_index("R3"), 5);
/// assert_eq!(resolve_servo_index("r3"), SERVO_NOT_FOUND);
/// ```
pub fn resolve_servo_index(name: &str) -> i8 {
    match name.parse::<ServoName>() {
        Ok(servo) => u8::from(servo) as i8,
        Err(_) => SERVO_NOT_FOUND,
    }
}

/// 舵机目标角度（度）
///
/// 有效范围 0-180。元组字段公开以便在静态动作表中直接书写，
/// 运行时输入请使用 [`Angle::new`] 校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Angle(pub u8);

impl Angle {
    /// 最大角度
    pub const MAX: u8 = 180;

    /// 中位（90°）
    pub const MID: Angle = Angle(90);

    /// 创建经过范围校验的角度
    pub fn new(degrees: i32) -> Result<Self, ProtocolError> {
        if (0..=Self::MAX as i32).contains(&degrees) {
            Ok(Angle(degrees as u8))
        } else {
            Err(ProtocolError::AngleOutOfRange {
                value: degrees,
                max: Self::MAX,
            })
        }
    }

    /// 角度值
    pub fn degrees(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// 单个舵机的角度赋值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub servo: ServoName,
    pub angle: Angle,
}

impl Assignment {
    pub const fn new(servo: ServoName, angle: Angle) -> Self {
        Self { servo, angle }
    }
}
