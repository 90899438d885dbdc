//! Laws of the rewrite primitives, checked over seeded random trees.
use mathexp::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const NAMES: [&str; 4] = ["x0", "x1", "x2", "x3"];

fn name(rng: &mut impl Rng) -> &'static str {
    NAMES[rng.random_range(0..NAMES.len())]
}

fn random_exp(budget: usize, rng: &mut impl Rng) -> Exp {
    if budget == 0 || rng.random_bool(0.2) {
        return match rng.random_range(0..=2) {
            0 => var(name(rng)),
            1 => int(rng.random_range(-5..=5)),
            _ => old(var(name(rng))),
        };
    }

    match rng.random_range(0..=8) {
        0 => infix(random_exp(budget - 1, rng), "+", random_exp(budget - 1, rng)),
        1 => and(random_exp(budget - 1, rng), random_exp(budget - 1, rng)),
        2 => not(random_exp(budget - 1, rng)),
        3 => equals(random_exp(budget - 1, rng), random_exp(budget - 1, rng)),
        4 => {
            let arity = rng.random_range(1..=3);
            let arguments = (0..arity).map(|_| random_exp(budget - 1, rng)).collect();
            apply(name(rng), arguments)
        }
        5 => forall(
            vec![decl(name(rng), "Z")],
            None,
            random_exp(budget - 1, rng),
        ),
        6 => if_exp(
            random_exp(budget - 1, rng),
            random_exp(budget - 1, rng),
            rng.random_bool(0.5).then(|| random_exp(budget - 1, rng)),
        ),
        7 => {
            let fields = (0..rng.random_range(2..=3))
                .map(|_| random_exp(budget - 1, rng))
                .collect();
            tuple(fields).unwrap()
        }
        _ => old(random_exp(budget - 1, rng)),
    }
}

fn has_binder(e: &Exp) -> bool {
    let mut found = false;
    walk_no_input(e, |node| {
        if node.bound_names().next().is_some() {
            found = true;
            node.break_();
        } else {
            node.schedule_children(());
        }
    });
    found
}

fn trees() -> Vec<Exp> {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    (0..64).map(|_| random_exp(6, &mut rng)).collect()
}

#[test]
fn copies_are_equal_and_equivalent() {
    for e in trees() {
        let c = e.copy();
        assert_eq!(c, e);
        assert!(c.equivalent(&e).unwrap());
        assert_eq!(c.node_count(), e.node_count());
    }
}

#[test]
fn empty_substitution_is_identity() {
    let empty = Substitution::new();
    for e in trees() {
        assert_eq!(e.substitute(&empty), e);
    }
}

#[test]
fn unmatched_keys_leave_trees_alone() {
    let s = Substitution::from_names([("unused", int(0)), ("other", var("y"))]);
    for e in trees() {
        assert!(e.substitute(&s).equivalent(&e).unwrap(), "{e}");
    }
}

#[test]
fn substituting_a_name_removes_its_free_occurrences() {
    for e in trees() {
        let out = e.substitute_names([("x0", int(7))]);
        if !e.contains_var("x0", false) && !e.contains_var("x0", true) {
            assert!(out.equivalent(&e).unwrap());
        } else if !has_binder(&e) {
            assert!(!out.contains_var("x0", false));
            assert!(!out.contains_var("x0", true));
        }
    }
}

#[test]
fn replacing_with_itself_is_identity() {
    for e in trees() {
        for pattern in [var("x1"), old(var("x2"))] {
            let out = e.replace(&pattern, &pattern).unwrap().or_copy_of(&e);
            assert!(out.equivalent(&e).unwrap(), "{e} with {pattern}");
        }
    }
}

#[test]
fn remember_is_idempotent() {
    for e in trees() {
        let once = e.remember();
        assert!(!once.contains_old());
        assert_eq!(once.remember(), once);
    }
}
