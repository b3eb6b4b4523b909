//! 编排层错误类型

use sesame_tools::SafetyViolation;
use thiserror::Error;

/// 编排层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChoreoError {
    /// 帧脚本中的角度超出安全范围
    #[error("Frame {frame}: {source}")]
    Safety {
        frame: usize,
        #[source]
        source: SafetyViolation,
    },

    #[error("Invalid motion config: {0}")]
    InvalidConfig(String),
}
