use mathexp::prelude::*;

fn names(e: &Exp) -> Vec<String> {
    e.sub_expressions()
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[test]
fn child_order_per_kind() {
    assert_eq!(names(&infix(var("a"), "+", var("b"))), ["a", "b"]);
    assert_eq!(
        names(&if_exp(var("p"), var("a"), Some(var("b")))),
        ["p", "a", "b"]
    );
    assert_eq!(names(&if_exp(var("p"), var("a"), None)), ["p", "a"]);
    assert_eq!(
        names(&forall(vec![decl("x", "Z")], Some(var("w")), var("b"))),
        ["w", "b"]
    );
    assert_eq!(
        names(&forall(vec![decl("x", "Z")], None, var("b"))),
        ["b"]
    );
    assert_eq!(names(&lambda(vec![decl("x", "Z")], var("x"))), ["x"]);
    assert_eq!(names(&old(var("x"))), ["x"]);
    assert_eq!(
        names(&dot([var("S"), var("Top")]).unwrap()),
        ["S", "Top"]
    );
    assert!(int(3).sub_expressions().is_empty());
}

#[test]
fn tuple_children_are_the_two_halves() {
    let e = tuple(vec![var("a"), var("b"), var("c")]).unwrap();
    assert_eq!(names(&e), ["(a, b)", "c"]);
}

#[test]
fn citation_data_is_not_a_child() {
    let justified = Exp::from(JustifiedExp {
        exp: Box::new(var("p")),
        justification: JustificationExp::by_definition(),
    });
    assert_eq!(names(&justified), ["p"]);

    let hyp = Exp::from(HypDesigExp {
        reference: MathRefExp::new(MathRefKind::Axiom, Some("A".into())),
    });
    assert!(hyp.sub_expressions().is_empty());
}

#[test]
fn set_sub_expression_round_trips_by_index() {
    let mut e = if_exp(var("p"), var("a"), Some(var("b")));
    e.set_sub_expression(2, var("c")).unwrap();
    e.set_sub_expression(0, var("q")).unwrap();
    assert_eq!(names(&e), ["q", "a", "c"]);
}

#[test]
fn set_sub_expression_out_of_range() {
    let mut e = infix(var("a"), "+", var("b"));
    assert!(matches!(
        e.set_sub_expression(2, var("c")),
        Err(ExpError::SubExpressionIndex {
            kind: ExpType::Infix,
            index: 2,
            len: 2
        })
    ));

    let mut e = if_exp(var("p"), var("a"), None);
    assert!(e.set_sub_expression(2, var("c")).is_err());
}

#[test]
fn otherwise_item_index_zero_and_one_both_set_assignment() {
    let mut e = alt_item(None, int(1));
    e.set_sub_expression(0, int(2)).unwrap();
    assert_eq!(names(&e), ["2"]);
    e.set_sub_expression(1, int(3)).unwrap();
    assert_eq!(names(&e), ["3"]);

    let mut guarded = alt_item(Some(var("p")), int(1));
    guarded.set_sub_expression(1, int(5)).unwrap();
    assert_eq!(names(&guarded), ["p", "5"]);
}

#[test]
fn alternative_slots_keep_their_invariants() {
    let mut e = alternative(vec![alt_item(Some(var("p")), int(1)), alt_item(None, int(2))])
        .unwrap();
    let before = e.clone();

    assert!(matches!(
        e.set_sub_expression(0, int(0)),
        Err(ExpError::InvalidChild { .. })
    ));
    assert!(matches!(
        e.set_sub_expression(1, alt_item(Some(var("q")), int(2))),
        Err(ExpError::MissingOtherwise)
    ));
    assert_eq!(e, before);

    e.set_sub_expression(0, alt_item(None, int(7))).unwrap();
    assert_eq!(e.sub_expressions().len(), 2);
}

#[test]
fn setting_a_tuple_half_recomputes_size() {
    let mut e = tuple(vec![var("a"), var("b")]).unwrap();
    e.set_sub_expression(0, tuple(vec![var("x"), var("y"), var("z")]).unwrap())
        .unwrap();
    assert_eq!(e.as_tuple().unwrap().size(), 4);
}

#[test]
fn copy_is_independent_and_keeps_metadata() {
    let loc = Location::new(Some("Stack.mt"), 3, 14);
    let original = infix(var("a"), "+", int(1))
        .with_location(loc.clone())
        .with_math_type(MathType::named("Z"))
        .unwrap();

    let mut copy = original.copy();
    assert_eq!(copy, original);
    assert_eq!(copy.location(), Some(&loc));
    assert_eq!(copy.math_type(), Some(&MathType::named("Z")));

    copy.set_sub_expression(0, var("b")).unwrap();
    assert!(original.sub_expressions()[0].is_var_named("a"));
    assert!(copy.sub_expressions()[0].is_var_named("b"));
}

#[test]
fn map_children_keeps_kind_and_metadata() {
    let e = apply("f", vec![var("a"), var("b")])
        .with_math_type(MathType::boolean())
        .unwrap();
    let mapped = e.map_children(|c| old(c.copy()));
    assert_eq!(mapped.exp_type(), ExpType::Function);
    assert!(mapped.math_type().unwrap().is_boolean());
    assert!(mapped.sub_expressions().iter().all(|c| c.kind().is_old()));
}

#[test]
fn map_children_keeps_restricted_slots_valid() {
    let e = set_collection(vec![var("a"), var("b")]).unwrap();
    let mapped = e.map_children(|c| if c.is_var_named("a") { int(0) } else { var("z") });
    assert_eq!(names(&mapped), ["a", "z"]);
}

#[test]
fn bound_names_of_binders() {
    let e = forall(vec![decl("x", "Z"), decl("y", "Z")], None, var("x"));
    let bound: Vec<_> = e.bound_names().map(PosSymbol::name).collect();
    assert_eq!(bound, ["x", "y"]);
    assert_eq!(var("x").bound_names().count(), 0);
}
