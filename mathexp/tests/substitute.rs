use mathexp::prelude::*;

fn eq(a: &Exp, b: &Exp) -> bool {
    a.equivalent(b).unwrap()
}

#[test]
fn empty_substitution_is_a_copy() {
    let e = forall(
        vec![decl("x", "Z")],
        Some(is_in(var("x"), var("S"))),
        implies(var("p"), old(var("y"))),
    )
    .with_location(Location::new(None, 4, 2));
    let out = e.substitute(&Substitution::new());
    assert_eq!(out, e);
}

#[test]
fn replaces_matching_variables() {
    let e = infix(var("x"), "+", apply("f", vec![var("x"), var("y")]));
    let out = e.substitute_names([("x", int(1))]);
    assert!(eq(
        &out,
        &infix(int(1), "+", apply("f", vec![int(1), var("y")]))
    ));
}

#[test]
fn substitution_is_simultaneous() {
    let e = infix(var("x"), "-", var("y"));
    let out = e.substitute_names([("x", var("y")), ("y", var("x"))]);
    assert!(eq(&out, &infix(var("y"), "-", var("x"))));
}

#[test]
fn values_are_not_rewritten_again() {
    let e = var("x");
    let out = e.substitute_names([("x", infix(var("x"), "+", int(1)))]);
    assert!(eq(&out, &infix(var("x"), "+", int(1))));
}

#[test]
fn compound_keys_match_by_equivalence() {
    let key = dot([var("S"), var("Top")]).unwrap();
    let e = equals(dot([var("S"), var("Top")]).unwrap(), int(0));
    let s = Substitution::new().with(key, var("t")).unwrap();
    assert!(eq(&e.substitute(&s), &equals(var("t"), int(0))));
}

#[test]
fn first_matching_entry_wins() {
    let s = Substitution::new()
        .with(var("x"), int(1))
        .unwrap()
        .with(var("x"), int(2))
        .unwrap();
    assert!(eq(&var("x").substitute(&s), &int(1)));
    assert_eq!(s.len(), 2);
}

#[test]
fn bound_variables_are_not_substituted() {
    let e = and(
        var("x"),
        forall(vec![decl("x", "Z")], None, infix(var("x"), "<", var("y"))),
    );
    let out = e.substitute_names([("x", int(0)), ("y", int(9))]);
    let expected = and(
        int(0),
        forall(vec![decl("x", "Z")], None, infix(var("x"), "<", int(9))),
    );
    assert!(eq(&out, &expected));
}

#[test]
fn qualified_keys_are_not_shadowed() {
    let e = lambda(vec![decl("x", "Z")], qualified_var("Q", "x"));
    let s = Substitution::new()
        .with(qualified_var("Q", "x"), int(3))
        .unwrap();
    assert!(eq(
        &e.substitute(&s),
        &lambda(vec![decl("x", "Z")], int(3))
    ));
}

#[test]
fn results_keep_the_original_types() {
    let z = MathType::named("Z");
    let e = infix(var("x"), "+", var("y"))
        .with_math_type(z.clone())
        .unwrap();
    let out = e.substitute_names([("y", int(2))]);
    assert_eq!(out.math_type(), Some(&z));
}

#[test]
fn operator_names_are_renamed_by_variable_entries() {
    let e = apply("f", vec![var("a")]);
    let out = e.substitute_names([("f", var("g"))]);
    assert_eq!(out.as_function().unwrap().name.name(), "g");
    assert!(out.as_function().unwrap().arguments[0].is_var_named("a"));

    let e = infix(var("a"), "o", var("b"));
    let out = e.substitute_names([("o", var("concat"))]);
    assert_eq!(out.operator_name().map(PosSymbol::name), Some("concat"));

    // A non-variable value does not rename.
    let out = apply("f", vec![var("a")]).substitute_names([("f", int(1))]);
    assert_eq!(out.as_function().unwrap().name.name(), "f");
}

#[test]
fn restricted_slots_keep_their_kind() {
    let e = set_collection(vec![var("a"), var("b")]).unwrap();
    let out = e.substitute_names([("a", int(1)), ("b", var("c"))]);
    let members: Vec<_> = out.sub_expressions().iter().map(|m| m.to_string()).collect();
    assert_eq!(members, ["a", "c"]);
}

#[test]
fn citation_parameters_are_substituted() {
    let r: Exp = MathRefExp::new(MathRefKind::Theorem, Some("T".into()))
        .with_parameters(vec![var("x")])
        .unwrap()
        .into();
    let out = r.substitute_names([("x", var("y"))]);
    assert!(out.as_math_ref().unwrap().parameters()[0].is_var_named("y"));
}

#[test]
fn substitute_children_skips_the_root() {
    let e = old(var("x"));
    let s = Substitution::new().with(old(var("x")), var("x0")).unwrap();
    assert!(eq(&e.substitute(&s), &var("x0")));
    assert!(eq(&e.substitute_children(&s), &old(var("x"))));
}

#[test]
fn result_is_independent() {
    let e = infix(var("x"), "+", var("y"));
    let mut out = e.substitute_names([("x", int(1))]);
    out.set_sub_expression(1, int(2)).unwrap();
    assert!(e.sub_expressions()[1].is_var_named("y"));
}
