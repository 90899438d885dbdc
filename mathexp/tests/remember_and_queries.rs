use mathexp::prelude::*;

#[test]
fn remember_unwraps_every_old_value() {
    let e = implies(
        equals(var("S"), old(var("S"))),
        apply("f", vec![old(infix(var("x"), "+", old(var("y"))))]),
    );
    assert!(e.contains_old());

    let once = e.remember();
    assert!(!once.contains_old());
    assert!(once
        .equivalent(&implies(
            equals(var("S"), var("S")),
            apply("f", vec![infix(var("x"), "+", var("y"))]),
        ))
        .unwrap());

    let twice = once.remember();
    assert_eq!(twice, once);
    assert!(e.contains_old());
}

#[test]
fn remember_keeps_the_old_type() {
    let z = MathType::named("Z");
    let e = old(var("x").with_math_type(z.clone()).unwrap());
    assert_eq!(e.remember().math_type(), Some(&z));
}

#[test]
fn remember_fixes_tuple_size() {
    let e = tuple(vec![old(tuple(vec![var("a"), var("b")]).unwrap()), var("c")]).unwrap();
    assert_eq!(e.as_tuple().unwrap().size(), 2);
    let out = e.remember();
    assert_eq!(out.as_tuple().unwrap().size(), 3);
}

#[test]
fn contains_var_respects_old_scopes() {
    let e = and(var("x"), old(var("y")));
    assert!(e.contains_var("x", false));
    assert!(!e.contains_var("x", true));
    assert!(e.contains_var("y", true));
    assert!(!e.contains_var("y", false));
    assert!(!e.contains_var("z", false));
}

#[test]
fn contains_existential_variable() {
    let e = and(var("p"), quantified_var("x", Quantification::Exists));
    assert!(e.contains_existential());
    assert!(!and(var("p"), quantified_var("x", Quantification::ForAll)).contains_existential());
}

#[test]
fn node_count_follows_sub_expressions() {
    let e = infix(var("a"), "+", apply("f", vec![var("b"), int(1)]));
    assert_eq!(e.node_count(), 5);
}

#[test]
fn walker_visits_in_child_order() {
    let e = if_exp(var("p"), infix(var("a"), "+", var("b")), Some(var("c")));
    let mut seen = Vec::new();
    walk_no_input(&e, |node| {
        if let Some(v) = node.as_var() {
            seen.push(v.name.name().to_string());
        }
        node.schedule_children(());
    });
    assert_eq!(seen, ["p", "a", "b", "c"]);
}

#[test]
fn walker_threads_depth() {
    let e = not(not(var("p")));
    let mut deepest = 0;
    walk(&e, 0usize, |depth, node| {
        deepest = deepest.max(depth);
        assert_eq!(node.is_root(), depth == 0);
        node.schedule_children(depth + 1);
    });
    assert_eq!(deepest, 2);
}

#[test]
fn walker_break_stops_the_walk() {
    let e = and(var("a"), and(var("b"), var("c")));
    let mut visited = 0;
    walk_no_input(&e, |node| {
        visited += 1;
        if node.is_var_named("a") {
            node.break_();
        } else {
            node.schedule_children(());
        }
    });
    // root, a
    assert_eq!(visited, 2);
}

#[test]
fn walker_deferred_scheduling_is_breadth_first() {
    let e = and(and(var("a"), var("b")), var("c"));
    let mut order = Vec::new();
    walk_no_input(&e, |node| {
        order.push(node.to_string());
        for child in node.children() {
            child.schedule_deferred(());
        }
    });
    assert_eq!(order[..3], ["a and b and c", "a and b", "c"]);
}

#[test]
fn deep_trees_do_not_overflow_queries() {
    let mut e = var("x");
    for _ in 0..50_000 {
        e = not(e);
    }
    assert_eq!(e.node_count(), 50_001);
    assert!(e.contains_var("x", false));
    // Tear down iteratively; the default drop glue recurses.
    let mut current = e;
    while let ExpKind::Prefix(p) = current.into_kind() {
        current = *p.argument;
    }
}
