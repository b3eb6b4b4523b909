//! # 安全配置
//!
//! 每个舵机的机械角度范围。髋关节受机身遮挡，范围小于膝关节：
//!
//! | 舵机 | 范围 |
//! |------|------|
//! | R1, L2 | 45 - 180 |
//! | R2, L1 | 0 - 135 |
//! | R3, R4, L3, L4 | 0 - 180 |

use crate::per_servo::PerServo;
use serde::{Deserialize, Deserializer, Serialize};
use sesame_protocol::{Angle, Assignment, ServoName};
use thiserror::Error;

/// 角度范围（闭区间，度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoRange {
    pub min: u8,
    pub max: u8,
}

impl ServoRange {
    pub const FULL: ServoRange = ServoRange { min: 0, max: 180 };

    pub fn contains(&self, angle: Angle) -> bool {
        (self.min..=self.max).contains(&angle.0)
    }
}

impl Default for ServoRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// 超出安全范围
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid angle for servo {servo}, range is {min} - {max}", min = .range.min, max = .range.max)]
pub struct SafetyViolation {
    pub servo: ServoName,
    pub angle: i32,
    pub range: ServoRange,
}

/// 安全限制
///
/// 反序列化时缺省的舵机取默认范围，配置文件可以只覆盖个别舵机。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafetyLimits(pub PerServo<ServoRange>);

/// 配置文件中的安全限制（每个舵机可选）
#[derive(Deserialize)]
struct PartialLimits {
    #[serde(rename = "R1")]
    r1: Option<ServoRange>,
    #[serde(rename = "R2")]
    r2: Option<ServoRange>,
    #[serde(rename = "L1")]
    l1: Option<ServoRange>,
    #[serde(rename = "L2")]
    l2: Option<ServoRange>,
    #[serde(rename = "R3")]
    r3: Option<ServoRange>,
    #[serde(rename = "R4")]
    r4: Option<ServoRange>,
    #[serde(rename = "L3")]
    l3: Option<ServoRange>,
    #[serde(rename = "L4")]
    l4: Option<ServoRange>,
}

impl<'de> Deserialize<'de> for SafetyLimits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let partial = PartialLimits::deserialize(deserializer)?;
        let overrides = [
            (ServoName::R1, partial.r1),
            (ServoName::R2, partial.r2),
            (ServoName::L1, partial.l1),
            (ServoName::L2, partial.l2),
            (ServoName::R3, partial.r3),
            (ServoName::R4, partial.r4),
            (ServoName::L3, partial.l3),
            (ServoName::L4, partial.l4),
        ];

        let mut limits = SafetyLimits::default();
        for (servo, range) in overrides {
            if let Some(range) = range {
                limits.0.set(servo, range);
            }
        }
        Ok(limits)
    }
}

impl Default for SafetyLimits {
    fn default() -> Self {
        let hip_front = ServoRange { min: 45, max: 180 };
        let hip_back = ServoRange { min: 0, max: 135 };

        let mut limits = PerServo::splat(ServoRange::FULL);
        limits.set(ServoName::R1, hip_front);
        limits.set(ServoName::L2, hip_front);
        limits.set(ServoName::R2, hip_back);
        limits.set(ServoName::L1, hip_back);
        Self(limits)
    }
}

impl SafetyLimits {
    pub fn range(&self, servo: ServoName) -> ServoRange {
        self.0.get(servo)
    }

    /// 检查原始整数角度（用户输入）
    pub fn check(&self, servo: ServoName, degrees: i32) -> Result<Angle, SafetyViolation> {
        let range = self.range(servo);
        let violation = || SafetyViolation {
            servo,
            angle: degrees,
            range,
        };

        let angle = Angle::new(degrees).map_err(|_| violation())?;
        if range.contains(angle) {
            Ok(angle)
        } else {
            Err(violation())
        }
    }

    pub fn check_assignment(&self, assignment: &Assignment) -> Result<(), SafetyViolation> {
        self.check(assignment.servo, assignment.angle.0 as i32)
            .map(|_| ())
    }
}

/// 安全配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// 是否在回放帧脚本前校验角度
    pub enabled: bool,

    pub limits: SafetyLimits,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: SafetyLimits::default(),
        }
    }
}
