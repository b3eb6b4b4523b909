//! 表情动画播放
//!
//! 按固定帧周期推进帧序号。三种播放模式（`n` 为帧数）：
//!
//! ```text
//! Loop:      0 1 2 .. n-1 0 1 2 ..
//! Once:      0 1 2 .. n-1 n-1 n-1 ..
//! Boomerang: 0 1 .. n-1 n-2 .. 0 0 0 ..
//! ```

use sesame_protocol::{Face, FaceAnimMode};
use std::time::Duration;

/// 表情动画播放器
#[derive(Debug, Clone)]
pub struct FaceAnimator {
    face: Option<Face>,
    mode: FaceAnimMode,
    frame_count: usize,
    frame_period: Duration,
    /// 自选择表情以来推进的帧步数
    ticks: usize,
    /// 不足一帧的累计时间
    residual: Duration,
}

impl FaceAnimator {
    /// 创建播放器
    ///
    /// `frame_count` 为 0 时按 1 帧处理；`frame_period` 为 0 时不推进。
    pub fn new(frame_count: usize, frame_period: Duration) -> Self {
        Self {
            face: None,
            mode: FaceAnimMode::default(),
            frame_count: frame_count.max(1),
            frame_period,
            ticks: 0,
            residual: Duration::ZERO,
        }
    }

    /// 选择表情，从第 0 帧开始播放
    pub fn select(&mut self, face: Face) {
        self.face = Some(face);
        self.ticks = 0;
        self.residual = Duration::ZERO;
    }

    /// 切换播放模式，不重置进度
    pub fn set_mode(&mut self, mode: FaceAnimMode) {
        self.mode = mode;
    }

    pub fn face(&self) -> Option<Face> {
        self.face
    }

    pub fn mode(&self) -> FaceAnimMode {
        self.mode
    }

    /// 推进时间，返回推进的帧步数
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if self.face.is_none() || self.frame_period.is_zero() {
            return 0;
        }

        let total = self.residual + elapsed;
        let period_ns = self.frame_period.as_nanos();
        let steps = (total.as_nanos() / period_ns) as usize;
        let consumed = period_ns * steps as u128;
        self.residual = Duration::from_nanos((total.as_nanos() - consumed) as u64);
        self.ticks = self.ticks.saturating_add(steps);
        steps
    }

    /// 当前帧序号
    pub fn current_frame(&self) -> usize {
        frame_at(self.mode, self.frame_count, self.ticks)
    }

    /// 当前动画是否已播放结束（Loop 模式永不结束）
    pub fn is_finished(&self) -> bool {
        let last = self.frame_count - 1;
        match self.mode {
            FaceAnimMode::Loop => false,
            FaceAnimMode::Once => self.ticks >= last,
            FaceAnimMode::Boomerang => self.ticks >= 2 * last,
        }
    }
}

/// 第 `tick` 步对应的帧序号
fn frame_at(mode: FaceAnimMode, frame_count: usize, tick: usize) -> usize {
    let last = frame_count - 1;
    if last == 0 {
        return 0;
    }

    match mode {
        FaceAnimMode::Loop => tick % frame_count,
        FaceAnimMode::Once => tick.min(last),
        FaceAnimMode::Boomerang => {
            if tick <= last {
                tick
            } else {
                (2 * last).saturating_sub(tick)
            }
        },
    }
}
