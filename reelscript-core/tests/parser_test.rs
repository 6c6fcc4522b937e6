use std::time::Duration;

use reelscript_core::ast::{
    ButtonDecl, Comparison, CounterOp, Direction, RemoveTarget, Scope, SizeMode, Stmt, SyntaxReason,
};
use reelscript_core::{HeaderError, Program, parse_program};

fn parse_code(input: &str) -> Program {
    parse_program(input).unwrap_or_else(|err| panic!("Parse failed: {err}"))
}

fn errors(program: &Program) -> Vec<String> {
    program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Error { error, .. } => Some(error.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn header_and_return() {
    let program = parse_code("ANIMATION 7 city1\nreturn 3");
    assert_eq!(program.header.scene_id, 7);
    assert_eq!(program.header.background.as_deref(), Some("city1"));
    assert!(matches!(program.body[0], Stmt::Return { scene: 3, .. }));
}

#[test]
fn rejects_non_scripts() {
    assert_eq!(parse_program(""), Err(HeaderError::Empty));
    assert!(matches!(parse_program("print hi\nreturn 1"), Err(HeaderError::NotAnimation(_))));
    assert!(matches!(parse_program("ANIMATION x"), Err(HeaderError::InvalidSceneId(_))));
}

#[test]
fn add_defaults_and_case() {
    let program = parse_code("ANIMATION 0\nADD Local Rick R\nadd global sam s 1.5 2 0.5 relative");
    match &program.body[0] {
        Stmt::Add { scope, name, id, x, y, size, mode, .. } => {
            assert_eq!(*scope, Scope::Local);
            assert_eq!(name, "rick");
            assert_eq!(id, "r");
            assert_eq!((*x, *y, *size), (0.0, 0.0, 1.0));
            assert_eq!(*mode, SizeMode::Absolute);
        }
        other => panic!("expected add, got {other:?}"),
    }
    match &program.body[1] {
        Stmt::Add { scope, x, size, mode, .. } => {
            assert_eq!(*scope, Scope::Global);
            assert_eq!(*x, 1.5);
            assert_eq!(*size, 0.5);
            assert_eq!(*mode, SizeMode::Relative);
        }
        other => panic!("expected add, got {other:?}"),
    }
}

#[test]
fn diagnostics_name_the_command() {
    let program = parse_code(
        "ANIMATION 0\nadd local\nadd nowhere rick r\nmove r 1 x 3\nset colour red\ntransition sideways 1s\ngoto 3 if counter ~ 1\nwait soon",
    );
    assert_eq!(
        errors(&program),
        vec![
            "Add failed: Invalid argument count.",
            "Add failed: Invalid scope.",
            "Move failed: Invalid argument format.",
            "Set failed: Second token was invalid.",
            "Transition failed: Invalid transition type.",
            "Goto failed: Invalid comparison operator.",
            "Wait failed: Invalid argument format.",
        ]
    );
}

#[test]
fn unknown_commands_are_ignored() {
    let program = parse_code("ANIMATION 0\nfrobnicate 1 2\n\nreturn 1 trailing comment");
    assert_eq!(program.body.len(), 1);
    assert!(matches!(program.body[0], Stmt::Return { scene: 1, .. }));
}

#[test]
fn set_variants() {
    let program = parse_code(
        "ANIMATION 0\nset opacity 50\nset opacity none\nset opacity FULL\nset background Office1\nset character r left\nset size r 2 relative",
    );
    assert!(matches!(program.body[0], Stmt::SetOpacity { alpha: 128, .. }));
    assert!(matches!(program.body[1], Stmt::SetOpacity { alpha: 0, .. }));
    assert!(matches!(program.body[2], Stmt::SetOpacity { alpha: 255, .. }));
    assert!(matches!(&program.body[3], Stmt::SetBackground { name, .. } if name == "office1"));
    assert!(matches!(&program.body[4], Stmt::SetCharacter { id, state, .. } if id == "r" && state == "left"));
    assert!(matches!(
        &program.body[5],
        Stmt::SetSize { size, mode: SizeMode::Relative, .. } if *size == 2.0
    ));
}

#[test]
fn print_keeps_case_and_trailing_space() {
    let program = parse_code("ANIMATION 0\nprint Hello world\nprint\nclear-text");
    assert!(matches!(&program.body[0], Stmt::Print { text, .. } if text == "Hello world "));
    assert!(matches!(&program.body[1], Stmt::Print { text, .. } if text.is_empty()));
    assert!(matches!(program.body[2], Stmt::ClearText { .. }));
}

#[test]
fn waits_and_transitions() {
    let program = parse_code("ANIMATION 0\nwait 2.5 seconds\nwait 300\ntransition in 2s\ntransition OUT 100");
    assert!(matches!(program.body[0], Stmt::Wait { duration, .. } if duration == Duration::from_millis(2500)));
    assert!(matches!(program.body[1], Stmt::Wait { duration, .. } if duration == Duration::from_millis(300)));
    assert!(matches!(
        program.body[2],
        Stmt::Transition { direction: Direction::In, duration, .. } if duration == Duration::from_secs(2)
    ));
    assert!(matches!(program.body[3], Stmt::Transition { direction: Direction::Out, .. }));
}

#[test]
fn goto_and_counter() {
    let program = parse_code(
        "ANIMATION 0\nreset counter\nid 1\nincrement counter\ngoto 1 if counter is-less-than 3\ngoto 5\ndecrement",
    );
    assert!(matches!(program.body[0], Stmt::Counter { op: CounterOp::Reset, .. }));
    assert!(matches!(program.body[1], Stmt::Label { id: 1, .. }));
    match &program.body[3] {
        Stmt::Goto { label: 1, condition: Some(cond), .. } => {
            assert_eq!(cond.op, Comparison::Less);
            assert_eq!(cond.value, 3);
        }
        other => panic!("expected conditional goto, got {other:?}"),
    }
    assert!(matches!(program.body[4], Stmt::Goto { label: 5, condition: None, .. }));
    assert!(matches!(program.body[5], Stmt::Counter { op: CounterOp::Decrement, .. }));
}

#[test]
fn button_block_ends_on_first_invalid_line() {
    let program = parse_code("ANIMATION 0\n*\nGo_left 10\nNo 20\nprint after\nid 10\nreturn 100");
    match &program.body[0] {
        Stmt::Buttons { buttons, .. } => assert_eq!(
            buttons,
            &vec![
                ButtonDecl { label: "Go left".into(), target: 10 },
                ButtonDecl { label: "No".into(), target: 20 },
            ]
        ),
        other => panic!("expected buttons, got {other:?}"),
    }
    assert!(matches!(&program.body[1], Stmt::Print { text, .. } if text == "after "));
}

#[test]
fn button_block_stops_at_blank_and_zero_target() {
    let program = parse_code("ANIMATION 0\n*\nYes 3\n\nNo 4\n*\nMaybe 0");
    match &program.body[0] {
        Stmt::Buttons { buttons, .. } => assert_eq!(buttons.len(), 1),
        other => panic!("expected buttons, got {other:?}"),
    }
    // `No 4` after the blank line is not a command.
    match &program.body[1] {
        Stmt::Buttons { buttons, .. } => assert!(buttons.is_empty()),
        other => panic!("expected buttons, got {other:?}"),
    }
}

#[test]
fn button_block_ends_at_command_words() {
    let program = parse_code("ANIMATION 0\n*\nYes 10\nNo 20\nid 10\nreturn 100\nid 20\nreturn 200");
    match &program.body[0] {
        Stmt::Buttons { buttons, .. } => {
            let targets: Vec<u32> = buttons.iter().map(|b| b.target).collect();
            assert_eq!(targets, vec![10, 20]);
        }
        other => panic!("expected buttons, got {other:?}"),
    }
    assert!(matches!(program.body[1], Stmt::Label { id: 10, .. }));
    let resume = program.resume_index(20).expect("label");
    assert!(matches!(program.body[resume], Stmt::Return { scene: 200, .. }));
}

#[test]
fn code_under_a_button_block_stays_reachable() {
    let program = parse_code("ANIMATION 0\n*\nA 5\nwait 100\nid 5\nreturn 1");
    let resume = program.resume_index(5).expect("label");
    assert!(matches!(program.body[resume], Stmt::Return { scene: 1, .. }));
    assert!(program.body.iter().any(|s| matches!(s, Stmt::Wait { .. })));
}

#[test]
fn first_label_wins() {
    let program = parse_code("ANIMATION 0\nid 3\nreturn 1\nid 3\nreturn 2");
    assert_eq!(program.labels.get(&3), Some(&2));
    let resume = program.resume_index(3).expect("label");
    assert!(matches!(program.body[resume], Stmt::Return { scene: 1, .. }));
    assert_eq!(program.resume_index(0), None);
    assert_eq!(program.resume_index(-4), None);
}

#[test]
fn remove_targets() {
    let program = parse_code("ANIMATION 0\nremove ALL\nremove R\nremove");
    assert!(matches!(program.body[0], Stmt::Remove { target: RemoveTarget::All, .. }));
    assert!(matches!(&program.body[1], Stmt::Remove { target: RemoveTarget::Id(id), .. } if id == "r"));
    assert!(matches!(
        &program.body[2],
        Stmt::Error { error, .. } if error.reason == SyntaxReason::ArgumentCount
    ));
}
