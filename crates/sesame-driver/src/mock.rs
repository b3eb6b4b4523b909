//! Mock 机器人
//!
//! 用于测试：不真实等待，记录每一次 I/O 调用，协作式检查的结果可预先编排。

use crate::hooks::IoEvent;
use crate::io::RobotIo;
use sesame_protocol::{Angle, Command, Face, FaceAnimMode, SERVO_COUNT, ServoName};
use std::collections::VecDeque;
use std::time::Duration;

/// Mock 机器人
#[derive(Debug, Clone, Default)]
pub struct MockRobot {
    events: Vec<IoEvent>,
    angles: [Option<Angle>; SERVO_COUNT],
    face: Option<Face>,
    mode: FaceAnimMode,
    /// 预先编排的检查结果，用完后使用 `default_held`
    pressing_script: VecDeque<bool>,
    default_held: bool,
}

impl MockRobot {
    /// 输入始终松开
    pub fn new() -> Self {
        Self::default()
    }

    /// 输入始终按住
    pub fn held() -> Self {
        Self {
            default_held: true,
            ..Self::default()
        }
    }

    /// 前 `n` 次检查为按住，之后松开
    pub fn release_after(n: usize) -> Self {
        Self::with_pressing_script(std::iter::repeat_n(true, n))
    }

    /// 按顺序返回给定的检查结果，之后松开
    pub fn with_pressing_script(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            pressing_script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[IoEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn angle(&self, servo: ServoName) -> Option<Angle> {
        self.angles[servo.index()]
    }

    pub fn angles(&self) -> [Option<Angle>; SERVO_COUNT] {
        self.angles
    }

    pub fn face(&self) -> Option<Face> {
        self.face
    }

    pub fn mode(&self) -> FaceAnimMode {
        self.mode
    }

    /// 所有延时（按调用顺序）
    pub fn delays(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter_map(|e| match e {
                IoEvent::Delay(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// 协作式检查次数
    pub fn pressing_checks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, IoEvent::PressingCheck { .. }))
            .count()
    }

    /// 进入空闲次数
    pub fn idle_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, IoEvent::Idle)).count()
    }

    /// 舵机写入记录（按调用顺序）
    pub fn servo_writes(&self) -> Vec<(ServoName, Angle)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                IoEvent::ServoAngle { servo, angle } => Some((*servo, *angle)),
                _ => None,
            })
            .collect()
    }
}

impl RobotIo for MockRobot {
    fn set_servo_angle(&mut self, servo: ServoName, angle: Angle) {
        self.angles[servo.index()] = Some(angle);
        self.events.push(IoEvent::ServoAngle { servo, angle });
    }

    fn set_face(&mut self, face: Face) {
        self.face = Some(face);
        self.events.push(IoEvent::Face(face));
    }

    fn set_face_mode(&mut self, mode: FaceAnimMode) {
        self.mode = mode;
        self.events.push(IoEvent::FaceMode(mode));
    }

    fn set_face_with_mode(&mut self, face: Face, mode: FaceAnimMode) {
        self.face = Some(face);
        self.mode = mode;
        self.events.push(IoEvent::FaceWithMode { face, mode });
    }

    fn delay_with_face(&mut self, duration: Duration) {
        self.events.push(IoEvent::Delay(duration));
    }

    fn enter_idle(&mut self) {
        self.events.push(IoEvent::Idle);
    }

    fn pressing_check(&mut self, command: Command, timeout: Duration) -> bool {
        let held = self.pressing_script.pop_front().unwrap_or(self.default_held);
        self.events.push(IoEvent::PressingCheck {
            command,
            timeout,
            held,
        });
        held
    }
}
