//! 外部协作者接口
//!
//! 动作编排层只通过 [`RobotIo`] 访问硬件与宿主状态。所有方法都是同步的，
//! 唯一的挂起点是 [`RobotIo::delay_with_face`] 和 [`RobotIo::pressing_check`]。

use sesame_protocol::{Angle, Command, Face, FaceAnimMode, ServoName};
use std::time::Duration;

/// 机器人 I/O 接口
///
/// # 约定
///
/// - `set_servo_angle` 非阻塞、幂等，角度钳位由实现负责
/// - `delay_with_face` 阻塞指定时长，期间推进表情动画
/// - `pressing_check` 最多阻塞 `timeout`，返回指令是否仍被按住；
///   返回 `false` 表示松开或超时，调用方应立即中止
pub trait RobotIo {
    /// 设置单个舵机目标角度
    fn set_servo_angle(&mut self, servo: ServoName, angle: Angle);

    /// 切换表情资源（保留当前播放模式）
    fn set_face(&mut self, face: Face);

    /// 切换播放模式
    fn set_face_mode(&mut self, mode: FaceAnimMode);

    /// 同时切换表情与播放模式
    fn set_face_with_mode(&mut self, face: Face, mode: FaceAnimMode) {
        self.set_face_mode(mode);
        self.set_face(face);
    }

    /// 延时，期间推进表情动画
    fn delay_with_face(&mut self, duration: Duration);

    /// 进入空闲状态
    fn enter_idle(&mut self);

    /// 协作式检查：指令是否仍被按住
    fn pressing_check(&mut self, command: Command, timeout: Duration) -> bool;
}

impl<T: RobotIo + ?Sized> RobotIo for &mut T {
    fn set_servo_angle(&mut self, servo: ServoName, angle: Angle) {
        (**self).set_servo_angle(servo, angle)
    }

    fn set_face(&mut self, face: Face) {
        (**self).set_face(face)
    }

    fn set_face_mode(&mut self, mode: FaceAnimMode) {
        (**self).set_face_mode(mode)
    }

    fn set_face_with_mode(&mut self, face: Face, mode: FaceAnimMode) {
        (**self).set_face_with_mode(face, mode)
    }

    fn delay_with_face(&mut self, duration: Duration) {
        (**self).delay_with_face(duration)
    }

    fn enter_idle(&mut self) {
        (**self).enter_idle()
    }

    fn pressing_check(&mut self, command: Command, timeout: Duration) -> bool {
        (**self).pressing_check(command, timeout)
    }
}

impl<T: RobotIo + ?Sized> RobotIo for Box<T> {
    fn set_servo_angle(&mut self, servo: ServoName, angle: Angle) {
        (**self).set_servo_angle(servo, angle)
    }

    fn set_face(&mut self, face: Face) {
        (**self).set_face(face)
    }

    fn set_face_mode(&mut self, mode: FaceAnimMode) {
        (**self).set_face_mode(mode)
    }

    fn set_face_with_mode(&mut self, face: Face, mode: FaceAnimMode) {
        (**self).set_face_with_mode(face, mode)
    }

    fn delay_with_face(&mut self, duration: Duration) {
        (**self).delay_with_face(duration)
    }

    fn enter_idle(&mut self) {
        (**self).enter_idle()
    }

    fn pressing_check(&mut self, command: Command, timeout: Duration) -> bool {
        (**self).pressing_check(command, timeout)
    }
}
