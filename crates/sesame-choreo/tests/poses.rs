//! 姿态与步态的端到端行为（Mock 机器人）

use proptest::prelude::*;
use sesame_choreo::{Dispatcher, Outcome, STAND, Sequencer, choreography};
use sesame_driver::{IoEvent, MockRobot};
use sesame_protocol::{Angle, Command, Face, FaceAnimMode, SERVO_COUNT, ServoName};
use sesame_tools::{MotionConfig, SafetyLimits};
use std::time::Duration;

fn run(robot: MockRobot, command: Command) -> (Outcome, MockRobot) {
    let mut seq = Sequencer::new(robot, MotionConfig::default()).unwrap();
    let outcome = seq.run(command);
    (outcome, seq.into_inner())
}

fn stand_angles() -> [Option<Angle>; SERVO_COUNT] {
    let mut angles = [None; SERVO_COUNT];
    for a in STAND {
        angles[a.servo.index()] = Some(a.angle);
    }
    angles
}

fn static_poses() -> impl Iterator<Item = Command> {
    Command::ALL.into_iter().filter(|c| !c.is_gait())
}

fn gaits() -> impl Iterator<Item = Command> {
    Command::ALL.into_iter().filter(|c| c.is_gait())
}

fn stand_face() -> IoEvent {
    IoEvent::FaceWithMode {
        face: Face::Stand,
        mode: FaceAnimMode::Once,
    }
}

#[test]
fn static_poses_end_standing() {
    for command in static_poses() {
        if matches!(command, Command::Rest | Command::Dead) {
            continue;
        }
        let (outcome, robot) = run(MockRobot::new(), command);
        assert_eq!(outcome, Outcome::Completed, "{}", command);
        assert_eq!(robot.angles(), stand_angles(), "{}", command);
        assert_eq!(robot.face(), Some(Face::Stand), "{}", command);
        assert_eq!(robot.mode(), FaceAnimMode::Once, "{}", command);
        assert_eq!(robot.idle_count(), 1, "{}", command);
        assert_eq!(robot.events().last(), Some(&IoEvent::Idle), "{}", command);
        assert_eq!(robot.pressing_checks(), 0, "{}", command);
    }
}

#[test]
fn dead_holds_with_knees_at_mid() {
    let (outcome, robot) = run(MockRobot::new(), Command::Dead);
    assert_eq!(outcome, Outcome::Completed);

    let mut expected = stand_angles();
    for knee in [ServoName::R3, ServoName::R4, ServoName::L3, ServoName::L4] {
        expected[knee.index()] = Some(Angle(90));
    }
    assert_eq!(robot.angles(), expected);
    assert_eq!(robot.face(), Some(Face::Dead));
    assert_eq!(robot.mode(), FaceAnimMode::Boomerang);
    assert_eq!(robot.idle_count(), 0);
    assert_eq!(robot.delays(), vec![Duration::from_millis(200)]);

    // 先安静站立，再切换表情
    let events = robot.events();
    assert!(matches!(events[0], IoEvent::ServoAngle { .. }));
    assert_eq!(
        events[8],
        IoEvent::FaceWithMode {
            face: Face::Dead,
            mode: FaceAnimMode::Boomerang
        }
    );
}

#[test]
fn rest_holds_all_mid() {
    let (outcome, robot) = run(MockRobot::new(), Command::Rest);
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(robot.angles(), [Some(Angle(90)); SERVO_COUNT]);
    assert_eq!(robot.face(), Some(Face::Rest));
    assert_eq!(robot.mode(), FaceAnimMode::Boomerang);
    assert_eq!(robot.idle_count(), 0);
    assert!(robot.delays().is_empty());
}

#[test]
fn stand_enters_idle_once() {
    let (_, robot) = run(MockRobot::new(), Command::Stand);
    assert_eq!(robot.events().len(), 10);
    assert_eq!(robot.events()[0], stand_face());
    assert_eq!(robot.angles(), stand_angles());
    assert_eq!(robot.idle_count(), 1);
}

#[test]
fn dance_waits_eleven_times_then_stands() {
    let (_, robot) = run(MockRobot::new(), Command::Dance);
    assert_eq!(robot.delays(), vec![Duration::from_millis(300); 11]);
    assert_eq!(
        robot.events()[0],
        IoEvent::FaceWithMode {
            face: Face::Dance,
            mode: FaceAnimMode::Loop
        }
    );

    let stand_at = robot
        .events()
        .iter()
        .position(|e| *e == stand_face())
        .unwrap();
    let last_delay = robot
        .events()
        .iter()
        .rposition(|e| matches!(e, IoEvent::Delay(_)))
        .unwrap();
    assert!(stand_at > last_delay);
}

#[test]
fn repeat_counts_follow_the_tables() {
    let ms = Duration::from_millis;
    let cases = [
        (Command::Wave, [vec![ms(200), ms(200), ms(300)], vec![ms(300); 8]].concat()),
        (Command::Swim, vec![ms(400); 8]),
        (Command::Point, vec![ms(2000)]),
        (
            Command::Pushup,
            [
                vec![ms(200), ms(500)],
                [ms(600), ms(500)].repeat(4),
            ]
            .concat(),
        ),
        (Command::Bow, vec![ms(200), ms(600), ms(3000)]),
        (Command::Cute, [vec![ms(200), ms(200)], vec![ms(300); 10]].concat()),
        (Command::Freaky, [vec![ms(200), ms(200)], vec![ms(400); 6]].concat()),
        (Command::Worm, [vec![ms(200), ms(200)], vec![ms(300); 10]].concat()),
        (Command::Shake, [vec![ms(200), ms(200)], vec![ms(300); 10]].concat()),
        (Command::Shrug, vec![ms(200), ms(1000), ms(1500)]),
        (Command::Crab, [vec![ms(200)], vec![ms(300); 10]].concat()),
    ];
    for (command, expected) in cases {
        let (_, robot) = run(MockRobot::new(), command);
        assert_eq!(robot.delays(), expected, "{}", command);
    }
}

fn writes(pairs: &[(ServoName, u8)]) -> Vec<(ServoName, Angle)> {
    pairs.iter().map(|&(servo, angle)| (servo, Angle(angle))).collect()
}

fn stand_writes() -> Vec<(ServoName, Angle)> {
    STAND.iter().map(|a| (a.servo, a.angle)).collect()
}

#[test]
fn wave_writes_in_order() {
    use ServoName::*;
    let (_, robot) = run(MockRobot::new(), Command::Wave);

    let mut expected = stand_writes();
    expected.extend(writes(&[(R4, 80), (L3, 180), (L2, 60), (R1, 100), (L3, 180)]));
    for _ in 0..4 {
        expected.extend(writes(&[(L3, 180), (L3, 100)]));
    }
    expected.extend(stand_writes());
    assert_eq!(robot.servo_writes(), expected);
}

#[test]
fn bow_writes_in_order() {
    use ServoName::*;
    let (_, robot) = run(MockRobot::new(), Command::Bow);

    let mut expected = stand_writes();
    expected.extend(writes(&[
        (L1, 0),
        (R1, 180),
        (L3, 0),
        (R3, 180),
        (L2, 180),
        (R2, 0),
        (R4, 0),
        (L4, 180),
        (L3, 90),
        (R3, 90),
    ]));
    expected.extend(stand_writes());
    assert_eq!(robot.servo_writes(), expected);
}

#[test]
fn cute_writes_in_order() {
    use ServoName::*;
    let (_, robot) = run(MockRobot::new(), Command::Cute);

    let mut expected = stand_writes();
    expected.extend(writes(&[
        (L2, 160),
        (R2, 20),
        (R4, 180),
        (L4, 0),
        (L1, 0),
        (R1, 180),
        (L3, 180),
        (R3, 0),
    ]));
    for _ in 0..5 {
        expected.extend(writes(&[(R4, 180), (L4, 45), (R4, 135), (L4, 0)]));
    }
    expected.extend(stand_writes());
    assert_eq!(robot.servo_writes(), expected);
}

#[test]
fn walk_forward_first_cycle_writes_in_order() {
    use ServoName::*;
    // 起步 + 一个完整循环，第二个循环的第一次检查失败
    let (outcome, robot) = run(MockRobot::release_after(1 + 6), Command::Forward);
    assert_eq!(
        outcome,
        Outcome::Aborted {
            cycle: Some(1),
            step: 0
        }
    );

    let cycle = writes(&[
        (R3, 135),
        (L3, 0),
        (L4, 135),
        (L2, 90),
        (R4, 0),
        (R1, 180),
        (R2, 45),
        (L1, 90),
        (R4, 45),
        (L4, 180),
        (R3, 180),
        (L3, 45),
        (R2, 90),
        (L1, 0),
        (L2, 135),
        (R1, 90),
    ]);
    let mut expected = writes(&[(R3, 135), (L3, 45), (R2, 100), (L1, 25)]);
    expected.extend(cycle);
    expected.extend(writes(&[(R3, 135), (L3, 0)]));
    assert_eq!(robot.servo_writes(), expected);
}

#[test]
fn shrug_switches_face_mid_pose() {
    let (_, robot) = run(MockRobot::new(), Command::Shrug);
    let faces: Vec<_> = robot
        .events()
        .iter()
        .filter_map(|e| match e {
            IoEvent::FaceWithMode { face, mode } => Some((*face, *mode)),
            _ => None,
        })
        .collect();
    assert_eq!(
        faces,
        vec![
            (Face::Dead, FaceAnimMode::Once),
            (Face::Shrug, FaceAnimMode::Once),
            (Face::Stand, FaceAnimMode::Once),
        ]
    );
}

#[test]
fn gait_first_check_failing_stops_immediately() {
    for command in gaits() {
        let (outcome, robot) = run(MockRobot::new(), command);
        let expected_cycle = match command {
            Command::Forward | Command::Backward => None,
            _ => Some(0),
        };
        assert_eq!(
            outcome,
            Outcome::Aborted {
                cycle: expected_cycle,
                step: 0
            },
            "{}",
            command
        );
        assert_eq!(robot.pressing_checks(), 1, "{}", command);
        assert!(robot.servo_writes().len() <= 4, "{}", command);
        assert_eq!(robot.idle_count(), 0, "{}", command);
        assert!(!robot.events().contains(&stand_face()), "{}", command);
    }
}

#[test]
fn walk_forward_abort_never_reaches_second_step() {
    let (_, robot) = run(MockRobot::new(), Command::Forward);
    assert!(
        !robot
            .servo_writes()
            .contains(&(ServoName::L3, Angle(0)))
    );
    assert_eq!(robot.angle(ServoName::R3), Some(Angle(135)));
    assert_eq!(robot.angle(ServoName::L3), Some(Angle(45)));
    assert_eq!(robot.angle(ServoName::R2), Some(Angle(100)));
    assert_eq!(robot.angle(ServoName::L1), Some(Angle(25)));
}

#[test]
fn held_gaits_complete_and_stand() {
    for command in gaits() {
        let (outcome, robot) = run(MockRobot::held(), command);
        assert_eq!(outcome, Outcome::Completed, "{}", command);

        let expected_checks = match command {
            Command::Forward | Command::Backward => 1 + 10 * 6,
            _ => 10 * 8,
        };
        assert_eq!(robot.pressing_checks(), expected_checks, "{}", command);
        assert_eq!(robot.angles(), stand_angles(), "{}", command);
        assert_eq!(robot.idle_count(), 1, "{}", command);
        assert!(robot.delays().is_empty(), "{}", command);
        assert_eq!(
            robot.events()[0],
            IoEvent::FaceWithMode {
                face: Face::Walk,
                mode: FaceAnimMode::Once
            }
        );
    }
}

#[test]
fn gait_cycles_follow_config() {
    let motion = MotionConfig {
        frame_delay_ms: 100,
        gait_cycles: 2,
    };
    let mut seq = Sequencer::new(MockRobot::held(), motion).unwrap();
    assert_eq!(seq.run(Command::Right), Outcome::Completed);
    assert_eq!(seq.io().pressing_checks(), 16);
}

#[test]
fn abort_mid_cycle_freezes_servos() {
    // 起步 + 第一个完整循环 + 第二个循环的前两步
    let (outcome, robot) = run(MockRobot::release_after(1 + 6 + 2), Command::Forward);
    assert_eq!(
        outcome,
        Outcome::Aborted {
            cycle: Some(1),
            step: 2
        }
    );
    // 停在第二个循环第三步写入之后
    assert_eq!(robot.angle(ServoName::R2), Some(Angle(45)));
    assert_eq!(robot.angle(ServoName::L1), Some(Angle(90)));
    assert_eq!(robot.idle_count(), 0);
    assert!(matches!(
        robot.events().last(),
        Some(IoEvent::PressingCheck { held: false, .. })
    ));
}

#[test]
fn dispatcher_clears_only_matching_pose() {
    let mut dispatcher =
        Dispatcher::new(Sequencer::new(MockRobot::new(), MotionConfig::default()).unwrap());

    dispatcher.submit(Command::Cute);
    assert_eq!(dispatcher.run_active(), Some(Outcome::Completed));
    assert_eq!(dispatcher.active(), None);

    dispatcher.submit(Command::Forward);
    dispatcher.run(Command::Swim);
    assert_eq!(dispatcher.active(), Some(Command::Forward));
}

#[test]
fn table_angles_within_default_limits() {
    let limits = SafetyLimits::default();
    for command in Command::ALL {
        for step in choreography(command).steps() {
            for a in step.set {
                assert!(
                    limits.check_assignment(a).is_ok(),
                    "{}: {} -> {}",
                    command,
                    a.servo,
                    a.angle
                );
            }
        }
    }
    for a in STAND {
        assert!(limits.check_assignment(a).is_ok());
    }
}

proptest! {
    #[test]
    fn gait_stops_at_first_released_check(
        index in 0usize..4,
        held in 0usize..82,
    ) {
        let command = gaits().nth(index).unwrap();
        let (outcome, robot) = run(MockRobot::release_after(held), command);
        let total = match command {
            Command::Forward | Command::Backward => 61,
            _ => 80,
        };

        if held >= total {
            prop_assert_eq!(outcome, Outcome::Completed);
            prop_assert_eq!(robot.pressing_checks(), total);
            prop_assert_eq!(robot.idle_count(), 1);
        } else {
            prop_assert!(!outcome.is_completed());
            prop_assert_eq!(robot.pressing_checks(), held + 1);
            prop_assert_eq!(robot.idle_count(), 0);
        }
    }
}
