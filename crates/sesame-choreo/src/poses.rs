//! 姿态与步态表
//!
//! 角度、延时与顺序和固件动作表逐条对应。注意：
//!
//! - `shrug`、`dead` 先安静站立，再切换表情
//! - `dead`、`rest` 不回到站立
//! - 步态的每一步都以协作式检查结束，检查失败立即中止

use crate::sequence::{Choreography, Finish, Repeat, Segment, Step, Wait};
use crate::{set, step};
use sesame_protocol::FaceAnimMode::{Boomerang, Loop, Once};
use sesame_protocol::{Assignment, Command, Face};

/// 站立角度（按通道顺序）
pub const STAND: &[Assignment] = set![
    R1 => 135, R2 => 45, L1 => 45, L2 => 135,
    R4 => 0, R3 => 180, L3 => 0, L4 => 180,
];

const ALL_MID: &[Assignment] = set![
    R1 => 90, R2 => 90, L1 => 90, L2 => 90,
    R4 => 90, R3 => 90, L3 => 90, L4 => 90,
];

const PAUSE: Segment<'static> = Segment::Step(step!(200;));

pub static REST: Choreography<'static> = Choreography {
    command: Some(Command::Rest),
    label: "REST",
    segments: &[
        Segment::Face(Face::Rest, Boomerang),
        Segment::Step(Step { set: ALL_MID, wait: Wait::None }),
    ],
    finish: Finish::Hold,
};

pub static STAND_POSE: Choreography<'static> = Choreography {
    command: Some(Command::Stand),
    label: "STAND",
    segments: &[
        Segment::Face(Face::Stand, Once),
        Segment::Step(Step { set: STAND, wait: Wait::None }),
    ],
    finish: Finish::Idle,
};

pub static WAVE: Choreography<'static> = Choreography {
    command: Some(Command::Wave),
    label: "WAVE",
    segments: &[
        Segment::Face(Face::Wave, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(200; R4 => 80, L3 => 180, L2 => 60, R1 => 100)),
        Segment::Step(step!(300; L3 => 180)),
        Segment::Repeat(
            Repeat::Times(4),
            &[step!(300; L3 => 180), step!(300; L3 => 100)],
        ),
    ],
    finish: Finish::Stand,
};

pub static DANCE: Choreography<'static> = Choreography {
    command: Some(Command::Dance),
    label: "DANCE",
    segments: &[
        Segment::Face(Face::Dance, Loop),
        Segment::Step(step!(300;
            R1 => 90, R2 => 90, L1 => 90, L2 => 90,
            R4 => 160, R3 => 160, L3 => 10, L4 => 10,
        )),
        Segment::Repeat(
            Repeat::Times(5),
            &[
                step!(300; R4 => 115, R3 => 115, L3 => 10, L4 => 10),
                step!(300; R4 => 160, R3 => 160, L3 => 65, L4 => 65),
            ],
        ),
    ],
    finish: Finish::Stand,
};

pub static SWIM: Choreography<'static> = Choreography {
    command: Some(Command::Swim),
    label: "SWIM",
    segments: &[
        Segment::Face(Face::Swim, Once),
        Segment::Step(Step { set: ALL_MID, wait: Wait::None }),
        Segment::Repeat(
            Repeat::Times(4),
            &[
                step!(400; R1 => 135, R2 => 45, L1 => 45, L2 => 135),
                step!(400; R1 => 90, R2 => 90, L1 => 90, L2 => 90),
            ],
        ),
    ],
    finish: Finish::Stand,
};

pub static POINT: Choreography<'static> = Choreography {
    command: Some(Command::Point),
    label: "POINT",
    segments: &[
        Segment::Face(Face::Point, Boomerang),
        Segment::Step(step!(2000;
            L2 => 60, R1 => 135, R2 => 100, L4 => 180,
            L1 => 25, L3 => 145, R4 => 80, R3 => 170,
        )),
    ],
    finish: Finish::Stand,
};

pub static PUSHUP: Choreography<'static> = Choreography {
    command: Some(Command::Pushup),
    label: "PUSHUP",
    segments: &[
        Segment::Face(Face::Pushup, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(500; L1 => 0, R1 => 180, L3 => 90, R3 => 90)),
        Segment::Repeat(
            Repeat::Times(4),
            &[
                step!(600; L3 => 0, R3 => 180),
                step!(500; L3 => 90, R3 => 90),
            ],
        ),
    ],
    finish: Finish::Stand,
};

pub static BOW: Choreography<'static> = Choreography {
    command: Some(Command::Bow),
    label: "BOW",
    segments: &[
        Segment::Face(Face::Bow, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(600;
            L1 => 0, R1 => 180, L3 => 0, R3 => 180,
            L2 => 180, R2 => 0, R4 => 0, L4 => 180,
        )),
        Segment::Step(step!(3000; L3 => 90, R3 => 90)),
    ],
    finish: Finish::Stand,
};

pub static CUTE: Choreography<'static> = Choreography {
    command: Some(Command::Cute),
    label: "CUTE",
    segments: &[
        Segment::Face(Face::Cute, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(200;
            L2 => 160, R2 => 20, R4 => 180, L4 => 0,
            L1 => 0, R1 => 180, L3 => 180, R3 => 0,
        )),
        Segment::Repeat(
            Repeat::Times(5),
            &[
                step!(300; R4 => 180, L4 => 45),
                step!(300; R4 => 135, L4 => 0),
            ],
        ),
    ],
    finish: Finish::Stand,
};

pub static FREAKY: Choreography<'static> = Choreography {
    command: Some(Command::Freaky),
    label: "FREAKY",
    segments: &[
        Segment::Face(Face::Freaky, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(200;
            L1 => 0, R1 => 180, L2 => 180, R2 => 0, R4 => 90, R3 => 0,
        )),
        Segment::Repeat(
            Repeat::Times(3),
            &[step!(400; R3 => 25), step!(400; R3 => 0)],
        ),
    ],
    finish: Finish::Stand,
};

pub static WORM: Choreography<'static> = Choreography {
    command: Some(Command::Worm),
    label: "WORM",
    segments: &[
        Segment::Face(Face::Worm, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(200;
            R1 => 180, R2 => 0, L1 => 0, L2 => 180,
            R4 => 90, R3 => 90, L3 => 90, L4 => 90,
        )),
        Segment::Repeat(
            Repeat::Times(5),
            &[
                step!(300; R3 => 45, L3 => 135, R4 => 45, L4 => 135),
                step!(300; R3 => 135, L3 => 45, R4 => 135, L4 => 45),
            ],
        ),
    ],
    finish: Finish::Stand,
};

pub static SHAKE: Choreography<'static> = Choreography {
    command: Some(Command::Shake),
    label: "SHAKE",
    segments: &[
        Segment::Face(Face::Shake, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(200;
            R1 => 135, L1 => 45, L3 => 90, R3 => 90, L2 => 90, R2 => 90,
        )),
        Segment::Repeat(
            Repeat::Times(5),
            &[
                step!(300; R4 => 45, L4 => 135),
                step!(300; R4 => 0, L4 => 180),
            ],
        ),
    ],
    finish: Finish::Stand,
};

pub static SHRUG: Choreography<'static> = Choreography {
    command: Some(Command::Shrug),
    label: "SHRUG",
    segments: &[
        Segment::StandQuiet,
        Segment::Face(Face::Dead, Once),
        PAUSE,
        Segment::Step(step!(1000; R3 => 90, R4 => 90, L3 => 90, L4 => 90)),
        Segment::Face(Face::Shrug, Once),
        Segment::Step(step!(1500; R3 => 0, R4 => 180, L3 => 180, L4 => 0)),
    ],
    finish: Finish::Stand,
};

pub static DEAD: Choreography<'static> = Choreography {
    command: Some(Command::Dead),
    label: "DEAD",
    segments: &[
        Segment::StandQuiet,
        Segment::Face(Face::Dead, Boomerang),
        PAUSE,
        Segment::Step(step!(_; R3 => 90, R4 => 90, L3 => 90, L4 => 90)),
    ],
    finish: Finish::Hold,
};

pub static CRAB: Choreography<'static> = Choreography {
    command: Some(Command::Crab),
    label: "CRAB",
    segments: &[
        Segment::Face(Face::Crab, Once),
        Segment::StandQuiet,
        PAUSE,
        Segment::Step(step!(_;
            R1 => 90, R2 => 90, L1 => 90, L2 => 90,
            R4 => 0, R3 => 180, L3 => 45, L4 => 135,
        )),
        Segment::Repeat(
            Repeat::Times(5),
            &[
                step!(300; R4 => 45, R3 => 135, L3 => 0, L4 => 180),
                step!(300; R4 => 0, R3 => 180, L3 => 45, L4 => 135),
            ],
        ),
    ],
    finish: Finish::Stand,
};

// ====== 步态 ======

pub static WALK_FORWARD: Choreography<'static> = Choreography {
    command: Some(Command::Forward),
    label: "WALK FWD",
    segments: &[
        Segment::Face(Face::Walk, Once),
        // 起步
        Segment::Step(step!(check; R3 => 135, L3 => 45, R2 => 100, L1 => 25)),
        Segment::Repeat(
            Repeat::GaitCycles,
            &[
                step!(check; R3 => 135, L3 => 0),
                step!(check; L4 => 135, L2 => 90, R4 => 0, R1 => 180),
                step!(check; R2 => 45, L1 => 90),
                step!(check; R4 => 45, L4 => 180),
                step!(check; R3 => 180, L3 => 45, R2 => 90, L1 => 0),
                step!(check; L2 => 135, R1 => 90),
            ],
        ),
    ],
    finish: Finish::Stand,
};

/// 前进的镜像：髋关节摆动方向相反
pub static WALK_BACKWARD: Choreography<'static> = Choreography {
    command: Some(Command::Backward),
    label: "WALK BACK",
    segments: &[
        Segment::Face(Face::Walk, Once),
        Segment::Step(step!(check;)),
        Segment::Repeat(
            Repeat::GaitCycles,
            &[
                step!(check; R3 => 135, L3 => 0),
                step!(check; L4 => 135, L2 => 135, R4 => 0, R1 => 90),
                step!(check; R2 => 90, L1 => 0),
                step!(check; R4 => 45, L4 => 180),
                step!(check; R3 => 180, L3 => 45, R2 => 45, L1 => 90),
                step!(check; L2 => 90, R1 => 180),
            ],
        ),
    ],
    finish: Finish::Stand,
};

/// 腿组 1（R1/L2 髋，R3/L4 膝）先动，腿组 2（R2/L1 髋，R4/L3 膝）后动
pub static TURN_LEFT: Choreography<'static> = Choreography {
    command: Some(Command::Left),
    label: "TURN LEFT",
    segments: &[
        Segment::Face(Face::Walk, Once),
        Segment::Repeat(
            Repeat::GaitCycles,
            &[
                step!(check; R3 => 135, L4 => 135),
                step!(check; R1 => 180, L2 => 180),
                step!(check; R3 => 180, L4 => 180),
                step!(check; R1 => 135, L2 => 135),
                step!(check; R4 => 45, L3 => 45),
                step!(check; R2 => 90, L1 => 90),
                step!(check; R4 => 0, L3 => 0),
                step!(check; R2 => 45, L1 => 45),
            ],
        ),
    ],
    finish: Finish::Stand,
};

/// 腿组 2 先动，腿组 1 后动
pub static TURN_RIGHT: Choreography<'static> = Choreography {
    command: Some(Command::Right),
    label: "TURN RIGHT",
    segments: &[
        Segment::Face(Face::Walk, Once),
        Segment::Repeat(
            Repeat::GaitCycles,
            &[
                step!(check; R4 => 45, L3 => 45),
                step!(check; R2 => 0, L1 => 0),
                step!(check; R4 => 0, L3 => 0),
                step!(check; R2 => 45, L1 => 45),
                step!(check; R3 => 135, L4 => 135),
                step!(check; R1 => 90, L2 => 90),
                step!(check; R3 => 180, L4 => 180),
                step!(check; R1 => 135, L2 => 135),
            ],
        ),
    ],
    finish: Finish::Stand,
};

/// 按指令查表
pub fn choreography(command: Command) -> &'static Choreography<'static> {
    match command {
        Command::Rest => &REST,
        Command::Stand => &STAND_POSE,
        Command::Wave => &WAVE,
        Command::Dance => &DANCE,
        Command::Swim => &SWIM,
        Command::Point => &POINT,
        Command::Pushup => &PUSHUP,
        Command::Bow => &BOW,
        Command::Cute => &CUTE,
        Command::Freaky => &FREAKY,
        Command::Worm => &WORM,
        Command::Shake => &SHAKE,
        Command::Shrug => &SHRUG,
        Command::Dead => &DEAD,
        Command::Crab => &CRAB,
        Command::Forward => &WALK_FORWARD,
        Command::Backward => &WALK_BACKWARD,
        Command::Left => &TURN_LEFT,
        Command::Right => &TURN_RIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sesame_protocol::{Angle, ServoName};

    #[test]
    fn test_lookup_matches_command() {
        for command in Command::ALL {
            let choreo = choreography(command);
            assert_eq!(choreo.command, Some(command), "{}", command);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(choreography(Command::Wave).label, "WAVE");
        assert_eq!(choreography(Command::Forward).label, "WALK FWD");
        assert_eq!(choreography(Command::Backward).label, "WALK BACK");
        assert_eq!(choreography(Command::Left).label, "TURN LEFT");
        assert_eq!(choreography(Command::Right).label, "TURN RIGHT");
    }

    #[test]
    fn test_face_directives() {
        for command in Command::ALL {
            let (face, mode) = choreography(command).opening_face().unwrap();
            let expected_face = match command {
                _ if command.is_gait() => "walk",
                // 先显示 dead，再切换到 shrug
                Command::Shrug => "dead",
                _ => command.as_str(),
            };
            let expected_mode = match command {
                Command::Dance => Loop,
                Command::Rest | Command::Point | Command::Dead => Boomerang,
                _ => Once,
            };
            assert_eq!(face.as_str(), expected_face, "{}", command);
            assert_eq!(mode, expected_mode, "{}", command);
        }
    }

    #[test]
    fn test_stand_angles() {
        let expected = [
            (ServoName::R1, 135),
            (ServoName::R2, 45),
            (ServoName::L1, 45),
            (ServoName::L2, 135),
            (ServoName::R4, 0),
            (ServoName::R3, 180),
            (ServoName::L3, 0),
            (ServoName::L4, 180),
        ];
        for (assignment, (servo, degrees)) in STAND.iter().zip(expected) {
            assert_eq!(*assignment, Assignment::new(servo, Angle(degrees)));
        }
    }

    #[test]
    fn test_only_gaits_use_checks() {
        for command in Command::ALL {
            let uses_check = choreography(command)
                .steps()
                .any(|step| step.wait == Wait::Check);
            assert_eq!(uses_check, command.is_gait(), "{}", command);
        }
    }

    #[test]
    fn test_gait_step_counts() {
        let cycle_len = |command| {
            choreography(command)
                .segments
                .iter()
                .find_map(|s| match s {
                    Segment::Repeat(Repeat::GaitCycles, steps) => Some(steps.len()),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(cycle_len(Command::Forward), 6);
        assert_eq!(cycle_len(Command::Backward), 6);
        assert_eq!(cycle_len(Command::Left), 8);
        assert_eq!(cycle_len(Command::Right), 8);
    }

    #[test]
    fn test_terminal_poses() {
        for command in Command::ALL {
            let terminal = matches!(command, Command::Rest | Command::Dead | Command::Stand);
            assert_eq!(!choreography(command).returns_to_stand(), terminal, "{}", command);
        }
    }
}
