//! 指令标识
//!
//! 输入层（按键、串口、网页）产生的指令令牌。令牌字符串与固件保持一致，
//! 步态使用方向名（`forward`/`backward`/`left`/`right`）而非动作名。

use crate::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// 指令类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// 静态姿态：一次性执行完毕
    Pose,
    /// 步态：按住输入时循环，松开即中止
    Gait,
}

/// 指令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Command {
    Rest,
    Stand,
    Wave,
    Dance,
    Swim,
    Point,
    Pushup,
    Bow,
    Cute,
    Freaky,
    Worm,
    Shake,
    Shrug,
    Dead,
    Crab,
    Forward,
    Backward,
    Left,
    Right,
}

impl Command {
    pub const ALL: [Command; 19] = [
        Command::Rest,
        Command::Stand,
        Command::Wave,
        Command::Dance,
        Command::Swim,
        Command::Point,
        Command::Pushup,
        Command::Bow,
        Command::Cute,
        Command::Freaky,
        Command::Worm,
        Command::Shake,
        Command::Shrug,
        Command::Dead,
        Command::Crab,
        Command::Forward,
        Command::Backward,
        Command::Left,
        Command::Right,
    ];

    /// 指令令牌字符串
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Rest => "rest",
            Command::Stand => "stand",
            Command::Wave => "wave",
            Command::Dance => "dance",
            Command::Swim => "swim",
            Command::Point => "point",
            Command::Pushup => "pushup",
            Command::Bow => "bow",
            Command::Cute => "cute",
            Command::Freaky => "freaky",
            Command::Worm => "worm",
            Command::Shake => "shake",
            Command::Shrug => "shrug",
            Command::Dead => "dead",
            Command::Crab => "crab",
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::Left => "left",
            Command::Right => "right",
        }
    }

    pub fn kind(self) -> CommandKind {
        match self {
            Command::Forward | Command::Backward | Command::Left | Command::Right => {
                CommandKind::Gait
            },
            _ => CommandKind::Pose,
        }
    }

    pub fn is_gait(self) -> bool {
        self.kind() == CommandKind::Gait
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tokens_roundtrip() {
        for cmd in Command::ALL {
            assert_eq!(cmd.as_str().parse::<Command>().unwrap(), cmd);
        }
    }

    #[test]
    fn test_command_kinds() {
        let gaits: Vec<_> = Command::ALL.iter().filter(|c| c.is_gait()).collect();
        assert_eq!(gaits.len(), 4);
        assert_eq!(Command::Dance.kind(), CommandKind::Pose);
        assert_eq!(Command::Left.kind(), CommandKind::Gait);
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            "walk".parse::<Command>(),
            Err(ProtocolError::UnknownCommand(_))
        ));
        assert!("Dance".parse::<Command>().is_err());
    }
}
