//! 表情资源与播放模式

use crate::ProtocolError;
use std::fmt;
use std::str::FromStr;

/// 表情动画播放模式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, num_enum::IntoPrimitive, num_enum::TryFromPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum FaceAnimMode {
    /// 循环播放
    Loop = 0,
    /// 播放一次后停在最后一帧（默认）
    #[default]
    Once = 1,
    /// 正放再倒放，停在第一帧
    Boomerang = 2,
}

impl FaceAnimMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FaceAnimMode::Loop => "loop",
            FaceAnimMode::Once => "once",
            FaceAnimMode::Boomerang => "boomerang",
        }
    }

    /// 从线上编码值转换
    pub fn from_wire(value: u8) -> Result<Self, ProtocolError> {
        Self::try_from(value).map_err(|_| ProtocolError::InvalidValue {
            field: "FaceAnimMode".to_string(),
            value,
        })
    }
}

impl fmt::Display for FaceAnimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表情资源
///
/// 每个资源对应显示屏上的一组动画帧，名称即资源文件名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Face {
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
    Walk,
}

impl Face {
    pub const ALL: [Face; 16] = [
        Face::Rest,
        Face::Stand,
        Face::Wave,
        Face::Dance,
        Face::Swim,
        Face::Point,
        Face::Pushup,
        Face::Bow,
        Face::Cute,
        Face::Freaky,
        Face::Worm,
        Face::Shake,
        Face::Shrug,
        Face::Dead,
        Face::Crab,
        Face::Walk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Face::Rest => "rest",
            Face::Stand => "stand",
            Face::Wave => "wave",
            Face::Dance => "dance",
            Face::Swim => "swim",
            Face::Point => "point",
            Face::Pushup => "pushup",
            Face::Bow => "bow",
            Face::Cute => "cute",
            Face::Freaky => "freaky",
            Face::Worm => "worm",
            Face::Shake => "shake",
            Face::Shrug => "shrug",
            Face::Dead => "dead",
            Face::Crab => "crab",
            Face::Walk => "walk",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|face| face.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownFace(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_values() {
        assert_eq!(u8::from(FaceAnimMode::Loop), 0);
        assert_eq!(u8::from(FaceAnimMode::Once), 1);
        assert_eq!(u8::from(FaceAnimMode::Boomerang), 2);

        assert_eq!(FaceAnimMode::from_wire(2).unwrap(), FaceAnimMode::Boomerang);
        assert!(matches!(
            FaceAnimMode::from_wire(3),
            Err(ProtocolError::InvalidValue { value: 3, .. })
        ));
    }

    #[test]
    fn test_face_names_unique() {
        for (i, a) in Face::ALL.iter().enumerate() {
            for b in &Face::ALL[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
            assert_eq!(a.as_str().parse::<Face>().unwrap(), *a);
        }
        assert!("Walk".parse::<Face>().is_err());
    }
}
