//! 驱动层错误类型定义

use thiserror::Error;

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 输入通道已关闭（仿真机器人已被 drop）
    #[error("Input channel closed")]
    ChannelClosed,

    /// 仿真配置无效
    #[error("Invalid simulator config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::DriverError;

    #[test]
    fn test_driver_error_display() {
        let msg = format!("{}", DriverError::ChannelClosed);
        assert_eq!(msg, "Input channel closed");

        let msg = format!("{}", DriverError::InvalidConfig("face_frames = 0".to_string()));
        assert!(msg.contains("Invalid simulator config") && msg.contains("face_frames"));
    }
}
