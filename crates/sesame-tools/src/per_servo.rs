//! 按舵机名索引的定长表
//!
//! 序列化为以舵机名为键的对象（`{"R1": .., "R2": ..}`），便于手工编辑配置文件。

use serde::{Deserialize, Serialize};
use sesame_protocol::ServoName;

/// 每个舵机一个值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerServo<T> {
    #[serde(rename = "R1")]
    pub r1: T,
    #[serde(rename = "R2")]
    pub r2: T,
    #[serde(rename = "L1")]
    pub l1: T,
    #[serde(rename = "L2")]
    pub l2: T,
    #[serde(rename = "R3")]
    pub r3: T,
    #[serde(rename = "R4")]
    pub r4: T,
    #[serde(rename = "L3")]
    pub l3: T,
    #[serde(rename = "L4")]
    pub l4: T,
}

impl<T: Copy> PerServo<T> {
    /// 所有舵机取同一个值
    pub fn splat(value: T) -> Self {
        Self {
            r1: value,
            r2: value,
            l1: value,
            l2: value,
            r3: value,
            r4: value,
            l3: value,
            l4: value,
        }
    }

    pub fn get(&self, servo: ServoName) -> T {
        *self.slot(servo)
    }
}

impl<T> PerServo<T> {
    pub fn set(&mut self, servo: ServoName, value: T) {
        *self.slot_mut(servo) = value;
    }

    fn slot(&self, servo: ServoName) -> &T {
        match servo {
            ServoName::R1 => &self.r1,
            ServoName::R2 => &self.r2,
            ServoName::L1 => &self.l1,
            ServoName::L2 => &self.l2,
            ServoName::R3 => &self.r3,
            ServoName::R4 => &self.r4,
            ServoName::L3 => &self.l3,
            ServoName::L4 => &self.l4,
        }
    }

    fn slot_mut(&mut self, servo: ServoName) -> &mut T {
        match servo {
            ServoName::R1 => &mut self.r1,
            ServoName::R2 => &mut self.r2,
            ServoName::L1 => &mut self.l1,
            ServoName::L2 => &mut self.l2,
            ServoName::R3 => &mut self.r3,
            ServoName::R4 => &mut self.r4,
            ServoName::L3 => &mut self.l3,
            ServoName::L4 => &mut self.l4,
        }
    }
}
