//! 指令分发
//!
//! 分发器持有当前激活的指令。输入层提交指令，主循环调用
//! [`Dispatcher::run_active`] 执行。静态姿态完整执行后，若激活指令仍是它，
//! 则清除；步态不清除，输入按住时主循环会再次执行。

use crate::executor::{Outcome, Sequencer};
use sesame_driver::RobotIo;
use sesame_protocol::{Command, CommandKind};
use tracing::debug;

/// 指令分发器
pub struct Dispatcher<R: RobotIo> {
    sequencer: Sequencer<R>,
    active: Option<Command>,
}

impl<R: RobotIo> Dispatcher<R> {
    pub fn new(sequencer: Sequencer<R>) -> Self {
        Self {
            sequencer,
            active: None,
        }
    }

    /// 设置激活指令（覆盖之前的）
    pub fn submit(&mut self, command: Command) {
        debug!("active command: {}", command);
        self.active = Some(command);
    }

    pub fn active(&self) -> Option<Command> {
        self.active
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// 执行当前激活指令，没有激活指令时返回 `None`
    pub fn run_active(&mut self) -> Option<Outcome> {
        let command = self.active?;
        Some(self.run(command))
    }

    /// 执行指定指令，并按规则清除激活指令
    pub fn run(&mut self, command: Command) -> Outcome {
        let outcome = self.sequencer.run(command);
        if command.kind() == CommandKind::Pose
            && outcome.is_completed()
            && self.active == Some(command)
        {
            debug!("clear active command: {}", command);
            self.active = None;
        }
        outcome
    }

    pub fn sequencer(&self) -> &Sequencer<R> {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer<R> {
        &mut self.sequencer
    }

    pub fn into_inner(self) -> Sequencer<R> {
        self.sequencer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sesame_driver::MockRobot;
    use sesame_tools::MotionConfig;

    fn dispatcher(robot: MockRobot) -> Dispatcher<MockRobot> {
        Dispatcher::new(Sequencer::new(robot, MotionConfig::default()).unwrap())
    }

    #[test]
    fn test_run_active_without_command() {
        let mut d = dispatcher(MockRobot::new());
        assert_eq!(d.run_active(), None);
        assert!(d.sequencer().io().events().is_empty());
    }

    #[test]
    fn test_pose_clears_matching_command() {
        let mut d = dispatcher(MockRobot::new());
        d.submit(Command::Wave);
        assert_eq!(d.run_active(), Some(Outcome::Completed));
        assert_eq!(d.active(), None);
    }

    #[test]
    fn test_pose_leaves_other_command() {
        let mut d = dispatcher(MockRobot::new());
        d.submit(Command::Bow);
        assert_eq!(d.run(Command::Dance), Outcome::Completed);
        assert_eq!(d.active(), Some(Command::Bow));
    }

    #[test]
    fn test_gait_keeps_command() {
        let mut d = dispatcher(MockRobot::held());
        d.submit(Command::Forward);
        assert_eq!(d.run_active(), Some(Outcome::Completed));
        assert_eq!(d.active(), Some(Command::Forward));

        // 新指令覆盖旧指令
        d.submit(Command::Right);
        assert_eq!(d.active(), Some(Command::Right));
    }

    #[test]
    fn test_aborted_gait_keeps_command() {
        let mut d = dispatcher(MockRobot::new());
        d.submit(Command::Left);
        assert_eq!(
            d.run_active(),
            Some(Outcome::Aborted {
                cycle: Some(0),
                step: 0
            })
        );
        assert_eq!(d.active(), Some(Command::Left));

        d.clear();
        assert_eq!(d.active(), None);
    }

    #[test]
    fn test_rest_and_stand_clear_command() {
        let mut d = dispatcher(MockRobot::new());
        for command in [Command::Rest, Command::Stand, Command::Dead] {
            d.submit(command);
            d.run_active();
            assert_eq!(d.active(), None, "{}", command);
        }
    }
}
