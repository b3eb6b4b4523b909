//! 仿真机器人
//!
//! 在主机上实时执行动作：延时使用 `spin_sleep` 并推进表情动画，
//! 输入通过 Channel 注入（其他线程按下/松开指令），舵机状态通过
//! [`Observer`] 读取。
//!
//! # 线程模型
//!
//! ```text
//! 输入线程 (Ctrl+C / Shell) ──InputHandle──▶ crossbeam channel ──▶ SimulatedRobot
//!                                                                   │ (动作执行线程)
//! 观察线程 ◀──Observer── Arc<RwLock<RobotState>> ◀──────────────────┘
//! ```

use crate::error::DriverError;
use crate::face::FaceAnimator;
use crate::hooks::{HookManager, IoEvent, IoHook};
use crate::io::RobotIo;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};
use parking_lot::RwLock;
use sesame_protocol::{Angle, Command, Face, FaceAnimMode, SERVO_COUNT, ServoName};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// 仿真配置
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// 每个表情资源的帧数
    pub face_frames: usize,

    /// 表情帧周期
    pub face_frame_period: Duration,

    /// 是否真实等待（false 时延时立即返回，仅推进动画时钟）
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            face_frames: 6,
            face_frame_period: Duration::from_millis(100),
            realtime: true,
        }
    }
}

impl SimConfig {
    fn validate(&self) -> Result<(), DriverError> {
        if self.face_frames == 0 {
            return Err(DriverError::InvalidConfig(
                "face_frames must be > 0".to_string(),
            ));
        }
        if self.face_frame_period.is_zero() {
            return Err(DriverError::InvalidConfig(
                "face_frame_period must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 输入事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// 按下（或切换到）某个指令
    Press(Command),
    /// 松开
    Release,
}

/// 输入注入句柄（可跨线程 Clone）
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: Sender<InputEvent>,
}

impl InputHandle {
    pub fn press(&self, command: Command) -> Result<(), DriverError> {
        self.tx
            .send(InputEvent::Press(command))
            .map_err(|_| DriverError::ChannelClosed)
    }

    pub fn release(&self) -> Result<(), DriverError> {
        self.tx
            .send(InputEvent::Release)
            .map_err(|_| DriverError::ChannelClosed)
    }
}

/// 机器人状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotState {
    /// 各通道最后一次写入的角度（按通道编号）
    pub angles: [Option<Angle>; SERVO_COUNT],
    pub face: Option<Face>,
    pub mode: FaceAnimMode,
    pub face_frame: usize,
    pub idle: bool,
    pub servo_writes: u64,
}

impl RobotState {
    pub fn angle(&self, servo: ServoName) -> Option<Angle> {
        self.angles[servo.index()]
    }
}

/// 状态观察器（Clone 是轻量的，Arc 指针）
#[derive(Debug, Clone)]
pub struct Observer {
    state: Arc<RwLock<RobotState>>,
}

impl Observer {
    pub fn snapshot(&self) -> RobotState {
        self.state.read().clone()
    }

    pub fn angle(&self, servo: ServoName) -> Option<Angle> {
        self.state.read().angle(servo)
    }
}

/// 仿真机器人
pub struct SimulatedRobot {
    config: SimConfig,
    animator: FaceAnimator,
    hooks: HookManager,
    state: Arc<RwLock<RobotState>>,
    input_rx: Receiver<InputEvent>,
    /// 当前按住的指令
    asserted: Option<Command>,
}

impl SimulatedRobot {
    /// 创建仿真机器人，返回机器人与输入句柄
    pub fn new(config: SimConfig) -> Result<(Self, InputHandle), DriverError> {
        config.validate()?;

        let (tx, input_rx) = unbounded();
        let animator = FaceAnimator::new(config.face_frames, config.face_frame_period);

        let robot = Self {
            config,
            animator,
            hooks: HookManager::new(),
            state: Arc::new(RwLock::new(RobotState::default())),
            input_rx,
            asserted: None,
        };

        Ok((robot, InputHandle { tx }))
    }

    pub fn add_hook(&mut self, hook: Arc<dyn IoHook>) {
        self.hooks.add_hook(hook);
    }

    pub fn observer(&self) -> Observer {
        Observer {
            state: self.state.clone(),
        }
    }

    /// 当前按住的指令
    pub fn asserted(&self) -> Option<Command> {
        self.asserted
    }

    fn emit(&self, event: IoEvent) {
        self.hooks.trigger_all(&event);
    }

    fn apply_input(&mut self, event: InputEvent) {
        trace!("input event: {:?}", event);
        self.asserted = match event {
            InputEvent::Press(command) => Some(command),
            InputEvent::Release => None,
        };
    }

    /// 取出所有已到达的输入事件
    fn drain_input(&mut self) {
        loop {
            match self.input_rx.try_recv() {
                Ok(event) => self.apply_input(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // 所有输入句柄已 drop，视为松开
                    self.asserted = None;
                    break;
                },
            }
        }
    }

    fn advance_face(&mut self, elapsed: Duration) {
        if self.animator.advance(elapsed) > 0 {
            self.state.write().face_frame = self.animator.current_frame();
        }
    }

    fn publish_face(&self) {
        let mut state = self.state.write();
        state.face = self.animator.face();
        state.mode = self.animator.mode();
        state.face_frame = self.animator.current_frame();
    }

    fn wait_for_release(&mut self, command: Command, timeout: Duration) -> bool {
        self.drain_input();
        if self.asserted != Some(command) {
            return false;
        }

        if !self.config.realtime {
            self.advance_face(timeout);
            return true;
        }

        let start = Instant::now();
        let deadline = start + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.input_rx.recv_timeout(remaining) {
                Ok(event) => {
                    self.apply_input(event);
                    if self.asserted != Some(command) {
                        self.advance_face(start.elapsed());
                        return false;
                    }
                },
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    self.asserted = None;
                    self.advance_face(start.elapsed());
                    return false;
                },
            }
        }

        self.advance_face(start.elapsed());
        true
    }
}

impl RobotIo for SimulatedRobot {
    fn set_servo_angle(&mut self, servo: ServoName, angle: Angle) {
        let angle = Angle(angle.0.min(Angle::MAX));
        debug!("servo {} -> {}", servo, angle);
        {
            let mut state = self.state.write();
            state.angles[servo.index()] = Some(angle);
            state.servo_writes += 1;
            state.idle = false;
        }
        self.emit(IoEvent::ServoAngle { servo, angle });
    }

    fn set_face(&mut self, face: Face) {
        self.animator.select(face);
        self.publish_face();
        self.emit(IoEvent::Face(face));
    }

    fn set_face_mode(&mut self, mode: FaceAnimMode) {
        self.animator.set_mode(mode);
        self.publish_face();
        self.emit(IoEvent::FaceMode(mode));
    }

    fn set_face_with_mode(&mut self, face: Face, mode: FaceAnimMode) {
        self.animator.set_mode(mode);
        self.animator.select(face);
        self.publish_face();
        self.emit(IoEvent::FaceWithMode { face, mode });
    }

    fn delay_with_face(&mut self, duration: Duration) {
        self.emit(IoEvent::Delay(duration));

        if !self.config.realtime {
            self.advance_face(duration);
            return;
        }

        // 按帧周期分片等待，每片结束时刷新表情帧
        let deadline = Instant::now() + duration;
        let mut last = Instant::now();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            spin_sleep::sleep(remaining.min(self.config.face_frame_period));
            let now = Instant::now();
            self.advance_face(now - last);
            last = now;
        }
    }

    fn enter_idle(&mut self) {
        debug!("entering idle");
        self.state.write().idle = true;
        self.emit(IoEvent::Idle);
    }

    fn pressing_check(&mut self, command: Command, timeout: Duration) -> bool {
        let held = self.wait_for_release(command, timeout);
        self.emit(IoEvent::PressingCheck {
            command,
            timeout,
            held,
        });
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::ChannelHook;
    use std::thread;

    fn fast_config() -> SimConfig {
        SimConfig {
            realtime: false,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            face_frames: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            SimulatedRobot::new(config),
            Err(DriverError::InvalidConfig(_))
        ));

        let config = SimConfig {
            face_frame_period: Duration::ZERO,
            ..SimConfig::default()
        };
        assert!(SimulatedRobot::new(config).is_err());
    }

    #[test]
    fn test_servo_writes_visible_to_observer() {
        let (mut robot, _input) = SimulatedRobot::new(fast_config()).unwrap();
        let observer = robot.observer();

        robot.set_servo_angle(ServoName::R3, Angle(180));
        robot.set_servo_angle(ServoName::L3, Angle(0));

        let snapshot = observer.snapshot();
        assert_eq!(snapshot.angle(ServoName::R3), Some(Angle(180)));
        assert_eq!(observer.angle(ServoName::L3), Some(Angle(0)));
        assert_eq!(snapshot.angle(ServoName::R1), None);
        assert_eq!(snapshot.servo_writes, 2);
    }

    #[test]
    fn test_servo_angle_clamped() {
        let (mut robot, _input) = SimulatedRobot::new(fast_config()).unwrap();
        robot.set_servo_angle(ServoName::R1, Angle(250));
        assert_eq!(robot.observer().angle(ServoName::R1), Some(Angle(180)));
    }

    #[test]
    fn test_pressing_check_follows_input() {
        let (mut robot, input) = SimulatedRobot::new(fast_config()).unwrap();
        let timeout = Duration::from_millis(10);

        // 未按下
        assert!(!robot.pressing_check(Command::Forward, timeout));

        input.press(Command::Forward).unwrap();
        assert!(robot.pressing_check(Command::Forward, timeout));
        assert_eq!(robot.asserted(), Some(Command::Forward));

        // 按下的是另一个指令
        assert!(!robot.pressing_check(Command::Left, timeout));

        input.release().unwrap();
        assert!(!robot.pressing_check(Command::Forward, timeout));
    }

    #[test]
    fn test_pressing_check_dropped_input_counts_as_release() {
        let (mut robot, input) = SimulatedRobot::new(fast_config()).unwrap();
        input.press(Command::Right).unwrap();
        drop(input);

        // 已排队的按下事件先生效，随后通道断开视为松开
        assert!(!robot.pressing_check(Command::Right, Duration::from_millis(5)));
        assert_eq!(robot.asserted(), None);
    }

    #[test]
    fn test_realtime_release_interrupts_wait() {
        let (mut robot, input) = SimulatedRobot::new(SimConfig::default()).unwrap();
        input.press(Command::Backward).unwrap();

        let releaser = input.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            releaser.release().unwrap();
        });

        let start = Instant::now();
        let held = robot.pressing_check(Command::Backward, Duration::from_secs(5));
        handle.join().unwrap();

        assert!(!held);
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_face_state_and_hooks() {
        let (mut robot, _input) = SimulatedRobot::new(fast_config()).unwrap();
        let (hook, rx) = ChannelHook::new(16);
        robot.add_hook(Arc::new(hook));
        let observer = robot.observer();

        robot.set_face_with_mode(Face::Dance, FaceAnimMode::Loop);
        robot.delay_with_face(Duration::from_millis(250));
        robot.enter_idle();

        let snapshot = observer.snapshot();
        assert_eq!(snapshot.face, Some(Face::Dance));
        assert_eq!(snapshot.mode, FaceAnimMode::Loop);
        assert_eq!(snapshot.face_frame, 2);
        assert!(snapshot.idle);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                IoEvent::FaceWithMode {
                    face: Face::Dance,
                    mode: FaceAnimMode::Loop
                },
                IoEvent::Delay(Duration::from_millis(250)),
                IoEvent::Idle,
            ]
        );
    }

    #[test]
    fn test_input_handle_closed() {
        let (robot, input) = SimulatedRobot::new(fast_config()).unwrap();
        drop(robot);
        assert!(matches!(
            input.press(Command::Wave),
            Err(DriverError::ChannelClosed)
        ));
    }
}
