use crate::fragment::{Fragment, ProcId};
use crate::program::{ProcKind, Procedure, Program, ProgramError};

fn rule(name: &str, body: Fragment) -> Procedure {
    Procedure {
        name: name.to_string(),
        kind: ProcKind::Rule,
        body,
    }
}

#[test]
fn new_validates_and_exposes_procedures() {
    let program = Program::new(
        vec![
            rule("a", Fragment::Call(ProcId(1))),
            rule("b", Fragment::AnyChar),
        ],
        ProcId(0),
    )
    .unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(program.entry(), ProcId(0));
    assert_eq!(program.procedure(ProcId(1)).name, "b");
    let names: Vec<_> = program.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn empty_program_rejected() {
    let err = Program::new(vec![], ProcId(0)).unwrap_err();
    assert_eq!(err, ProgramError::NoProcedures);
}

#[test]
fn entry_out_of_range_rejected() {
    let err = Program::new(vec![rule("a", Fragment::AnyChar)], ProcId(3)).unwrap_err();
    assert_eq!(err, ProgramError::EntryOutOfRange(ProcId(3)));
    assert_eq!(err.to_string(), "entry procedure p3 is out of range");
}

#[test]
fn dangling_call_rejected() {
    let err = Program::new(
        vec![rule("a", Fragment::optional(Fragment::Call(ProcId(9))))],
        ProcId(0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ProgramError::UnknownProcedure {
            name: "a".to_string(),
            target: ProcId(9),
        }
    );
    assert_eq!(err.to_string(), "procedure `a` calls unknown procedure p9");
}

#[test]
fn binary_round_trip() {
    let program = Program::new(
        vec![
            rule(
                "top",
                Fragment::all_of(vec![Fragment::Call(ProcId(1)), Fragment::AnyChar]),
            ),
            rule(
                "digit",
                Fragment::make_node("digit", Fragment::CharRange(b'0', b'9')),
            ),
        ],
        ProcId(0),
    )
    .unwrap();

    let bytes = program.to_bytes().unwrap();
    let decoded = Program::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, program);
}

#[test]
fn from_bytes_rejects_garbage() {
    let err = Program::from_bytes(&[0xff, 0xff, 0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, ProgramError::Decode(_)));
}
