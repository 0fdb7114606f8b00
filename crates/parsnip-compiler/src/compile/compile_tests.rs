use indoc::indoc;
use parsnip_program::{Fragment, GroupKind, ProcId, ProcKind, dump};

use crate::compile::{Actions, CompileError, Compiler, CompilerOptions, compile};
use crate::grammar::{Expr, Grammar, Rule};

fn grammar1(name: &str, body: Expr) -> Grammar {
    Grammar::new(vec![Rule::new(name, body)])
}

fn lit(byte: u8) -> Fragment {
    Fragment::Literal(vec![byte])
}

#[test]
fn single_byte_literal_stays_atomic() {
    let program = compile(&grammar1("a", Expr::lit("x"))).unwrap();
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("a", lit(b'x'))
    );
}

#[test]
fn multi_byte_literal_lowers_to_group() {
    let program = compile(&grammar1("a", Expr::lit("ab"))).unwrap();
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("a", Fragment::all_of(vec![lit(b'a'), lit(b'b')]))
    );
}

#[test]
fn empty_literal_stays_atomic() {
    let program = compile(&grammar1("a", Expr::lit(""))).unwrap();
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("a", Fragment::Literal(Vec::new()))
    );
}

#[test]
fn character_constructs_translate_directly() {
    let program = compile(&grammar1(
        "a",
        Expr::seq(vec![
            Expr::char_range(b'0', b'9'),
            Expr::char_set(b"+-"),
            Expr::any(),
        ]),
    ))
    .unwrap();

    let expected = Fragment::make_node(
        "a",
        Fragment::all_of(vec![
            Fragment::CharRange(b'0', b'9'),
            Fragment::CharSet(b"+-".iter().copied().collect()),
            Fragment::AnyChar,
        ]),
    );
    assert_eq!(program.procedure(ProcId(0)).body, expected);
}

#[test]
fn choice_composes_one_required_group() {
    let program = compile(&grammar1(
        "a",
        Expr::choice(vec![Expr::lit("x"), Expr::any()]),
    ))
    .unwrap();
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node(
            "a",
            Fragment::group(GroupKind::OneRequired, vec![lit(b'x'), Fragment::AnyChar])
        )
    );
}

#[test]
fn simple_repetition_operand_is_not_factored() {
    let program = compile(&grammar1(
        "digits",
        Expr::one_or_more(Expr::char_range(b'0', b'9')),
    ))
    .unwrap();
    assert_eq!(program.len(), 1);
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node(
            "digits",
            Fragment::one_or_more(Fragment::CharRange(b'0', b'9'))
        )
    );
}

#[test]
fn compound_repetition_operand_factors_into_helper() {
    let program = compile(&grammar1(
        "top",
        Expr::zero_or_more(Expr::seq(vec![Expr::lit("a"), Expr::lit("b")])),
    ))
    .unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("top", Fragment::zero_or_more(Fragment::Call(ProcId(1))))
    );

    let helper = program.procedure(ProcId(1));
    assert_eq!(helper.name, "top#1");
    assert_eq!(helper.kind, ProcKind::Helper);
    assert_eq!(helper.body, Fragment::all_of(vec![lit(b'a'), lit(b'b')]));
}

#[test]
fn compound_lookahead_operand_factors_into_helper() {
    let program = compile(&grammar1(
        "top",
        Expr::seq(vec![
            Expr::not_lookahead(Expr::choice(vec![Expr::lit("x"), Expr::lit("y")])),
            Expr::any(),
        ]),
    ))
    .unwrap();

    assert_eq!(program.len(), 2);
    let helper = program.procedure(ProcId(1));
    assert_eq!(helper.kind, ProcKind::Helper);
    assert_eq!(
        helper.body,
        Fragment::group(GroupKind::OneRequired, vec![lit(b'x'), lit(b'y')])
    );
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node(
            "top",
            Fragment::all_of(vec![
                Fragment::not_lookahead(Fragment::Call(ProcId(1))),
                Fragment::AnyChar,
            ])
        )
    );
}

#[test]
fn reference_compiles_to_call() {
    let grammar = Grammar::new(vec![
        Rule::new("top", Expr::reference("digit")),
        Rule::new("digit", Expr::char_range(b'0', b'9')),
    ]);
    let program = compile(&grammar).unwrap();

    assert_eq!(program.entry(), ProcId(0));
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("top", Fragment::Call(ProcId(1)))
    );
}

#[test]
fn undefined_reference_fails() {
    let err = compile(&grammar1("top", Expr::reference("missing"))).unwrap_err();
    assert_eq!(
        err,
        CompileError::UndefinedRule {
            name: "missing".to_string(),
            referenced_from: "top".to_string(),
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"rule `top` references undefined rule `missing`"
    );
}

#[test]
fn duplicate_rule_fails() {
    let grammar = Grammar::new(vec![
        Rule::new("a", Expr::any()),
        Rule::new("a", Expr::any()),
    ]);
    let err = compile(&grammar).unwrap_err();
    assert_eq!(err, CompileError::DuplicateRule("a".to_string()));
    insta::assert_snapshot!(err.to_string(), @"duplicate rule definition `a`");
}

#[test]
fn empty_grammar_fails() {
    let err = compile(&Grammar::default()).unwrap_err();
    assert_eq!(err, CompileError::EmptyGrammar);
}

#[test]
fn inline_marked_rule_expands_at_reference() {
    let grammar = Grammar::new(vec![
        Rule::new("a", Expr::reference("b")),
        Rule::new("b", Expr::lit("x")),
    ]);
    let actions = Actions::new().inline("b");
    let program = Compiler::compile(&grammar, &actions, CompilerOptions::default()).unwrap();

    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("a", Fragment::make_node("b", lit(b'x')))
    );
    // The referenced rule still compiles on its own.
    assert_eq!(
        program.procedure(ProcId(1)).body,
        Fragment::make_node("b", lit(b'x'))
    );
}

#[test]
fn recursive_inline_expands_one_level_only() {
    let grammar = Grammar::new(vec![Rule::new(
        "b",
        Expr::seq(vec![Expr::lit("x"), Expr::reference("b")]),
    )]);
    let actions = Actions::new().inline("b");
    let program = Compiler::compile(&grammar, &actions, CompilerOptions::default()).unwrap();

    let inner = Fragment::make_node(
        "b",
        Fragment::all_of(vec![lit(b'x'), Fragment::Call(ProcId(0))]),
    );
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("b", Fragment::all_of(vec![lit(b'x'), inner]))
    );
}

#[test]
fn inline_all_option_expands_every_reference() {
    let grammar = Grammar::new(vec![
        Rule::new("a", Expr::reference("b")),
        Rule::new("b", Expr::lit("x")),
    ]);
    let options = CompilerOptions { inline_all: true };
    let program = Compiler::compile(&grammar, &Actions::new(), options).unwrap();

    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("a", Fragment::make_node("b", lit(b'x')))
    );
}

#[test]
fn custom_action_replaces_rule_wrapping() {
    let grammar = grammar1("ws", Expr::one_or_more(Expr::char_set(b" \t")));
    let actions = Actions::new().custom("ws", |_, body| body);
    let program = Compiler::compile(&grammar, &actions, CompilerOptions::default()).unwrap();

    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::one_or_more(Fragment::CharSet(b" \t".iter().copied().collect()))
    );
}

#[test]
fn custom_action_can_mint_helpers_and_default_wrap() {
    let grammar = grammar1("a", Expr::lit("x"));
    let actions = Actions::new().custom("a", |ctx, body| {
        let call = ctx.helper(body);
        ctx.make_node(call)
    });
    let program = Compiler::compile(&grammar, &actions, CompilerOptions::default()).unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::make_node("a", Fragment::Call(ProcId(1)))
    );
    let helper = program.procedure(ProcId(1));
    assert_eq!(helper.name, "a#1");
    assert_eq!(helper.kind, ProcKind::Helper);
    assert_eq!(helper.body, lit(b'x'));
}

#[test]
fn ignore_mark_wraps_rule_in_ignore() {
    let grammar = grammar1("ws", Expr::one_or_more(Expr::char_set(b" ")));
    let actions = Actions::new().ignore("ws");
    let program = Compiler::compile(&grammar, &actions, CompilerOptions::default()).unwrap();

    assert_eq!(
        program.procedure(ProcId(0)).body,
        Fragment::ignore(Fragment::one_or_more(Fragment::CharSet(
            b" ".iter().copied().collect()
        )))
    );
}

#[test]
fn dump_of_compiled_program() {
    let grammar = Grammar::new(vec![
        Rule::new(
            "top",
            Expr::seq(vec![
                Expr::reference("digits"),
                Expr::zero_or_more(Expr::seq(vec![Expr::lit(","), Expr::reference("digits")])),
            ]),
        ),
        Rule::new("digits", Expr::one_or_more(Expr::char_range(b'0', b'9'))),
    ]);
    let program = compile(&grammar).unwrap();

    let expected = indoc! {r#"
        entry = top

        [0] rule top
          make-node "top"
            all-of
              call digits
              zero-or-more
                call top#1

        [1] rule digits
          make-node "digits"
            one-or-more
              char-range '0'..'9'

        [2] helper top#1
          all-of
            literal ","
            call digits
    "#};
    assert_eq!(dump(&program), expected);
}
