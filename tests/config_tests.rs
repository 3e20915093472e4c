//! TOML configuration parsing and validation.

use uln2003_stepper::config::{parse_config, ProgramPolicy, SystemConfig, MAX_MOVES};
use uln2003_stepper::error::ConfigError;
use uln2003_stepper::{Direction, Error, PhaseDelay, StepMode};

const FULL_CONFIG: &str = r#"
[motors.left]
name = "Left wheel"
mode = "half_step"
pins = [4, 17, 27, 22]
delay_ms = 1.0

[motors.right]
name = "Right wheel"
mode = "full_step"
pins = [14, 15, 18, 23]
delay_ms = 10.5
invert_direction = true

[programs.spin]
moves = [
    { motor = "left", revolutions = 1.0 },
    { motor = "right", steps = 2038, direction = "backward" },
]

[programs.demo]
policy = "sequential"
moves = [
    { motor = "left", revolutions = 1.0 },
    { motor = "left", revolutions = 1.0, direction = "backward" },
]
"#;

#[test]
fn parse_full_config() {
    let config = parse_config(FULL_CONFIG).expect("Config should parse");

    let left = config.motor("left").expect("Motor should exist");
    assert_eq!(left.name.as_str(), "Left wheel");
    assert_eq!(left.mode, StepMode::HalfStep);
    assert_eq!(left.pins, [4, 17, 27, 22]);
    assert_eq!(left.delay, PhaseDelay::from_millis(1));
    assert!(!left.invert_direction);

    let right = config.motor("right").expect("Motor should exist");
    assert_eq!(right.mode, StepMode::FullStep);
    assert_eq!(right.delay.as_micros(), 10_500);
    assert!(right.invert_direction);
}

#[test]
fn parse_programs() {
    let config = parse_config(FULL_CONFIG).unwrap();

    let spin = config.program("spin").expect("Program should exist");
    assert_eq!(spin.policy, ProgramPolicy::Interleaved);
    assert_eq!(spin.moves[0].direction, Direction::Forward);
    assert_eq!(spin.moves[1].direction, Direction::Backward);
    assert_eq!(spin.moves[1].steps, Some(2038));

    let demo = config.program("demo").expect("Program should exist");
    assert_eq!(demo.policy, ProgramPolicy::Sequential);

    let names: Vec<_> = config.program_names().collect();
    assert_eq!(names, vec!["spin", "demo"]);
}

#[test]
fn unknown_mode_fails_to_parse() {
    let toml = r#"
[motors.left]
name = "Left"
mode = "quarter_step"
pins = [4, 17, 27, 22]
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

#[test]
fn non_positive_delay_fails_to_parse() {
    let toml = r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]
delay_ms = 0.0
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml);
    assert!(result.is_err());
}

#[test]
fn negative_steps_rejected() {
    let toml = r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]

[programs.bad]
moves = [{ motor = "left", steps = -10 }]
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::InvalidMove { index: 0, .. }))
    ));
}

#[test]
fn move_needs_exactly_one_distance() {
    let toml = r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]

[programs.bad]
moves = [{ motor = "left", steps = 10, revolutions = 1.0 }]
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::InvalidMove { .. }))
    ));
}

#[test]
fn interleaved_program_cannot_reuse_motor() {
    let toml = r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]

[programs.bad]
moves = [
    { motor = "left", steps = 10 },
    { motor = "left", steps = 10, direction = "backward" },
]
"#;

    match parse_config(toml) {
        Err(Error::Config(ConfigError::MotorReused { program, motor })) => {
            assert_eq!(program.as_str(), "bad");
            assert_eq!(motor.as_str(), "left");
        }
        other => panic!("expected MotorReused, got {:?}", other),
    }
}

#[test]
fn program_with_too_many_moves_rejected() {
    let mut toml = String::from(
        r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]

[programs.long]
policy = "sequential"
moves = [
"#,
    );
    for _ in 0..MAX_MOVES + 1 {
        toml.push_str("    { motor = \"left\", steps = 1 },\n");
    }
    toml.push_str("]\n");

    assert_eq!(
        parse_config(&toml).map(|_| ()),
        Err(Error::Config(ConfigError::TooManyMoves(
            "long".try_into().unwrap()
        )))
    );
}

#[test]
fn program_at_move_limit_accepted() {
    let mut toml = String::from(
        r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]

[programs.full]
policy = "sequential"
moves = [
"#,
    );
    for _ in 0..MAX_MOVES {
        toml.push_str("    { motor = \"left\", steps = 1 },\n");
    }
    toml.push_str("]\n");

    let config = parse_config(&toml).unwrap();
    let program = config.program("full").unwrap();
    assert_eq!(program.moves.len(), MAX_MOVES);
    assert_eq!(program.declared_moves(), MAX_MOVES);
}

#[test]
fn shared_pins_across_motors_rejected() {
    let toml = r#"
[motors.left]
name = "Left"
pins = [4, 17, 27, 22]

[motors.right]
name = "Right"
pins = [14, 15, 17, 23]
"#;

    assert_eq!(
        parse_config(toml).map(|_| ()),
        Err(Error::Config(ConfigError::DuplicatePin(17)))
    );
}
