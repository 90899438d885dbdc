use mathexp::prelude::*;

fn eq(a: &Exp, b: &Exp) -> bool {
    a.equivalent(b).unwrap()
}

fn chain(segments: Vec<Exp>) -> Exp {
    dot(segments).unwrap()
}

fn changed(r: ExpResult<Replaced>) -> Exp {
    match r.unwrap() {
        Replaced::Changed(e) => e,
        Replaced::Unchanged => panic!("expected a replacement"),
    }
}

#[test]
fn variables_are_replaced_by_name() {
    let e = infix(var("x"), "+", var("y"));
    let out = changed(e.replace(&var("x"), &int(0)));
    assert!(eq(&out, &infix(int(0), "+", var("y"))));
    assert!(e.sub_expressions()[0].is_var_named("x"));
}

#[test]
fn literals_and_misses_are_unchanged() {
    assert_eq!(int(1).replace(&int(1), &int(2)).unwrap(), Replaced::Unchanged);
    let e = infix(var("a"), "+", var("b"));
    let r = e.replace(&var("z"), &int(0)).unwrap();
    assert!(!r.is_changed());
    assert!(eq(&r.or_copy_of(&e), &e));
}

#[test]
fn whole_composite_match() {
    let e = and(infix(var("a"), "+", var("b")), var("p"));
    let out = changed(e.replace(&infix(var("a"), "+", var("b")), &var("s")));
    assert!(eq(&out, &and(var("s"), var("p"))));
}

#[test]
fn replacement_takes_missing_types_only() {
    let z = MathType::named("Z");
    let n = MathType::named("N");
    let e = infix(var("x").with_math_type(z.clone()).unwrap(), "+", int(1));

    let out = changed(e.replace(&var("x"), &var("y")));
    assert_eq!(out.sub_expressions()[0].math_type(), Some(&z));

    let typed = var("y").with_math_type(n.clone()).unwrap();
    let out = changed(e.replace(&var("x"), &typed));
    assert_eq!(out.sub_expressions()[0].math_type(), Some(&n));
}

#[test]
fn old_values_only_follow_old_targets() {
    let e = infix(old(var("x")), "+", var("x"));

    // A plain target leaves `#x` alone.
    let out = changed(e.replace(&var("x"), &var("y")));
    assert!(eq(&out, &infix(old(var("x")), "+", var("y"))));

    // `#x ↦ x0` unwraps.
    let out = changed(e.replace(&old(var("x")), &var("x0")));
    assert!(eq(&out, &infix(var("x0"), "+", var("x"))));

    // `#x ↦ #y` keeps the wrapper.
    let out = changed(e.replace(&old(var("x")), &old(var("y"))));
    assert!(eq(&out, &infix(old(var("y")), "+", var("x"))));
}

#[test]
fn operators_are_renamed_by_variables() {
    let e = apply("f", vec![var("f")]);
    let out = changed(e.replace(&var("f"), &var("g")));
    assert!(eq(&out, &apply("g", vec![var("g")])));
}

#[test]
fn binders_are_renamed() {
    let e = forall(vec![decl("x", "Z")], None, infix(var("x"), ">", int(0)));
    let out = changed(e.replace(&var("x"), &var("k")));
    assert!(eq(
        &out,
        &forall(vec![decl("k", "Z")], None, infix(var("k"), ">", int(0)))
    ));
}

#[test]
fn between_targets_match_whole_nodes_only() {
    let e = between(vec![var("a"), var("b")]);
    let out = changed(e.replace(&between(vec![var("b"), var("a")]), &var("t")));
    assert!(eq(&out, &var("t")));

    let other = between(vec![var("c")]);
    assert!(!e.replace(&other, &var("t")).unwrap().is_changed());

    let out = changed(e.replace(&var("a"), &var("z")));
    assert!(eq(&out, &between(vec![var("z"), var("b")])));
}

#[test]
fn justified_replaces_through_its_expression() {
    let e = Exp::from(JustifiedExp {
        exp: Box::new(var("p")),
        justification: JustificationExp::by_rule("r"),
    });
    let out = changed(e.replace(&var("p"), &var("q")));
    let ExpKind::Justified(j) = out.kind() else {
        panic!("expected a justified expression");
    };
    assert!(j.exp.is_var_named("q"));
    assert_eq!(j.justification, JustificationExp::by_rule("r"));
}

#[test]
fn citation_kinds_are_unsupported() {
    let r = Exp::from(MathRefExp::new(MathRefKind::Axiom, Some("A".into())));
    assert!(matches!(
        r.replace(&var("x"), &var("y")),
        Err(ExpError::Unsupported {
            operation: Operation::Replace,
            kind: ExpType::MathRef
        })
    ));
}

#[test]
fn restricted_slot_rejects_wrong_kind_quietly() {
    let e = set_collection(vec![var("a"), var("b")]).unwrap();
    assert!(!e.replace(&var("a"), &int(1)).unwrap().is_changed());
    let out = changed(e.replace(&var("a"), &var("c")));
    assert!(out.sub_expressions()[0].is_var_named("c"));
}

// Qualified chains.

#[test]
fn dot_full_chain_match() {
    let e = chain(vec![var("S"), var("Top")]);
    let out = changed(e.replace(&chain(vec![var("S"), var("Top")]), &var("t")));
    assert!(eq(&out, &var("t")));
}

#[test]
fn dot_prefix_splice() {
    let e = chain(vec![var("a"), var("b"), var("c")]);
    let out = changed(e.replace(
        &chain(vec![var("a"), var("b")]),
        &chain(vec![var("x"), var("y")]),
    ));
    assert!(eq(&out, &chain(vec![var("x"), var("y"), var("c")])));
}

#[test]
fn dot_prefix_splice_of_single_expression() {
    let e = chain(vec![var("a"), var("b"), var("c")]);
    let out = changed(e.replace(&chain(vec![var("a"), var("b")]), &var("t")));
    assert!(eq(&out, &chain(vec![var("t"), var("c")])));
}

#[test]
fn dot_prefix_of_equal_length_with_function_head() {
    // S.f matches S.f(x) through the name of the function.
    let e = chain(vec![var("S"), apply("f", vec![var("x")])]);
    let out = changed(e.replace(&chain(vec![var("S"), var("f")]), &var("g")));
    assert!(eq(&out, &chain(vec![apply("g", vec![var("x")])])));
}

#[test]
fn dot_pattern_longer_than_chain_falls_through() {
    let e = chain(vec![var("a"), var("b")]);
    let r = e
        .replace(&chain(vec![var("a"), var("b"), var("c")]), &var("t"))
        .unwrap();
    assert!(!r.is_changed());
}

#[test]
fn dot_head_only_match() {
    let e = chain(vec![var("S"), var("Top")]);

    let out = changed(e.replace(&var("S"), &var("T")));
    assert!(eq(&out, &chain(vec![var("T"), var("Top")])));

    let out = changed(e.replace(&var("S"), &chain(vec![var("P"), var("S")])));
    assert!(eq(&out, &chain(vec![var("P"), var("S"), var("Top")])));

    // Only the head is considered.
    assert!(!e.replace(&var("Top"), &var("T")).unwrap().is_changed());
}

#[test]
fn dot_head_function_is_renamed() {
    let e = chain(vec![apply("f", vec![var("x")]), var("Top")]);
    let out = changed(e.replace(&var("f"), &var("g")));
    assert!(eq(&out, &chain(vec![apply("g", vec![var("x")]), var("Top")])));
}

#[test]
fn dot_old_head_follows_old_rule() {
    let e = chain(vec![old(var("S")), var("Top")]);
    let out = changed(e.replace(&old(var("S")), &var("S0")));
    assert!(eq(&out, &chain(vec![var("S0"), var("Top")])));
}

#[test]
fn dot_prefix_wins_over_head() {
    let e = chain(vec![var("a"), var("b"), var("c")]);
    let out = changed(e.replace(&chain(vec![var("a"), var("b")]), &var("t")));
    // A head-only rewrite would have kept `b`.
    assert_eq!(out.sub_expressions().len(), 2);
}

#[test]
fn dot_arguments_are_rewritten_last() {
    let e = chain(vec![var("S"), apply("f", vec![var("x")])]);
    let out = changed(e.replace(&var("x"), &int(0)));
    assert!(eq(&out, &chain(vec![var("S"), apply("f", vec![int(0)])])));
}

#[test]
fn dot_splice_drops_semantic_form() {
    let e: Exp = DotExp::new(vec![var("S"), var("Top")])
        .unwrap()
        .with_semantic(qualified_var("S", "Top"))
        .into();
    let out = changed(e.replace(&var("S"), &var("T")));
    assert!(out.as_dot().unwrap().semantic.is_none());
}

#[test]
fn dot_argument_rewrite_drops_semantic_form() {
    let e: Exp = DotExp::new(vec![var("S"), apply("f", vec![var("x")])])
        .unwrap()
        .with_semantic(apply("f", vec![var("x")]))
        .into();
    let out = changed(e.replace(&var("x"), &int(0)));
    assert!(out.as_dot().unwrap().semantic.is_none());
    assert!(eq(&out, &chain(vec![var("S"), apply("f", vec![int(0)])])));
}

#[test]
fn dot_head_splice_rewrites_later_arguments() {
    let e = chain(vec![var("x"), apply("f", vec![var("x")])]);
    let out = changed(e.replace(&var("x"), &var("y")));
    assert!(!out.contains_var("x", false));
    assert!(eq(&out, &chain(vec![var("y"), apply("f", vec![var("y")])])));
}

#[test]
fn dot_function_head_rename_rewrites_its_arguments() {
    let e = chain(vec![apply("f", vec![var("f")]), var("Top")]);
    let out = changed(e.replace(&var("f"), &var("g")));
    assert!(eq(&out, &chain(vec![apply("g", vec![var("g")]), var("Top")])));
}

#[test]
fn dot_prefix_splice_rewrites_later_arguments() {
    let s_top = || chain(vec![var("S"), var("Top")]);
    let e = chain(vec![var("S"), var("Top"), apply("g", vec![s_top()])]);
    let out = changed(e.replace(&s_top(), &var("T")));
    assert!(eq(&out, &chain(vec![var("T"), apply("g", vec![var("T")])])));
}

#[test]
fn replacing_a_pattern_with_itself_is_identity() {
    let e = forall(
        vec![decl("x", "Z")],
        None,
        equals(chain(vec![var("S"), var("Top")]), old(var("x"))),
    );
    for old_exp in [var("x"), old(var("x")), chain(vec![var("S"), var("Top")]), var("S")] {
        let out = e.replace(&old_exp, &old_exp).unwrap().or_copy_of(&e);
        assert!(eq(&out, &e), "replacing {old_exp} by itself");
    }
}
