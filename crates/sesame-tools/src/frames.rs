//! 帧脚本
//!
//! 动作编排工具：逐帧设定八个舵机的角度与帧后延时，保存为 JSON 脚本，
//! 或导出为可以直接粘贴到动作表中的 `step!` 条目。
//!
//! 校验与导出都按工作室顺序进行：先髋关节 `R1 L2 R2 L1`，再膝关节 `R3 R4 L3 L4`。

use crate::per_servo::PerServo;
use crate::safety::{SafetyLimits, SafetyViolation};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sesame_protocol::{Angle, Assignment, ServoName};
use smallvec::SmallVec;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// 工作室顺序
pub const STUDIO_ORDER: [ServoName; 8] = [
    ServoName::R1,
    ServoName::L2,
    ServoName::R2,
    ServoName::L1,
    ServoName::R3,
    ServoName::R4,
    ServoName::L3,
    ServoName::L4,
];

/// 单帧：八个舵机的角度 + 帧后延时
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// 各舵机角度（度），读入时未校验
    pub angles: PerServo<i32>,

    /// 帧后延时（毫秒）
    pub delay_ms: u64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            angles: PerServo::splat(90),
            delay_ms: 200,
        }
    }
}

impl Frame {
    /// 按工作室顺序校验每个角度，返回第一个越界的舵机
    pub fn validate(&self, limits: &SafetyLimits) -> Result<(), SafetyViolation> {
        for servo in STUDIO_ORDER {
            limits.check(servo, self.angles.get(servo))?;
        }
        Ok(())
    }

    /// 按工作室顺序生成角度赋值
    ///
    /// 超出 0-180 的角度被钳位，调用前应先 [`Frame::validate`]。
    pub fn assignments(&self) -> SmallVec<[Assignment; 8]> {
        STUDIO_ORDER
            .iter()
            .map(|&servo| {
                let degrees = self.angles.get(servo).clamp(0, Angle::MAX as i32);
                Assignment::new(servo, Angle(degrees as u8))
            })
            .collect()
    }
}

/// 帧脚本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameScript {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub frames: Vec<Frame>,
}

impl FrameScript {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            frames: Vec::new(),
        }
    }

    /// 校验后追加一帧
    pub fn add_frame(&mut self, frame: Frame, limits: &SafetyLimits) -> Result<(), SafetyViolation> {
        frame.validate(limits)?;
        self.frames.push(frame);
        Ok(())
    }

    /// 校验所有帧，返回第一个越界的帧序号与原因
    pub fn validate(&self, limits: &SafetyLimits) -> Result<(), (usize, SafetyViolation)> {
        for (i, frame) in self.frames.iter().enumerate() {
            frame.validate(limits).map_err(|e| (i, e))?;
        }
        Ok(())
    }

    /// 总延时（毫秒，溢出时饱和）
    pub fn total_delay_ms(&self) -> u64 {
        self.frames
            .iter()
            .fold(0u64, |total, f| total.saturating_add(f.delay_ms))
    }

    /// 加载脚本文件
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("读取脚本文件失败")?;
        let script: FrameScript = serde_json::from_str(&content).context("解析脚本 JSON 失败")?;
        Ok(script)
    }

    /// 保存脚本文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("序列化脚本失败")?;
        fs::write(path, content).context("写入脚本文件失败")?;
        Ok(())
    }
}

/// 导出为动作表条目
///
/// ```text
/// // Frame 1
/// step!(200; R1 => 135, L2 => 135, R2 => 45, L1 => 45,
///     R3 => 180, R4 => 0, L3 => 0, L4 => 180),
/// ```
pub fn render_frames(frames: &[Frame]) -> String {
    let mut out = String::new();
    for (i, frame) in frames.iter().enumerate() {
        let assignments = frame.assignments();
        let entry = |a: &Assignment| format!("{} => {}", a.servo, a.angle.0);
        let hips: Vec<String> = assignments[..4].iter().map(entry).collect();
        let knees: Vec<String> = assignments[4..].iter().map(entry).collect();

        // String 写入不会失败
        let _ = writeln!(out, "// Frame {}", i + 1);
        let _ = writeln!(out, "step!({}; {},", frame.delay_ms, hips.join(", "));
        let _ = writeln!(out, "    {}),", knees.join(", "));
    }
    out
}
