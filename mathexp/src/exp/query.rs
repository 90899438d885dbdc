//! Read-only questions asked of a whole tree by the VC generator.
use crate::{
    exp::{Exp, ExpKind, Quantification},
    walker::{walk, walk_no_input},
};

impl Exp {
    /// Does a variable spelled `name` occur in this tree?
    ///
    /// With `in_old` unset only occurrences outside any `#(...)` count; with `in_old` set only
    /// occurrences inside one do.
    pub fn contains_var(&self, name: &str, in_old: bool) -> bool {
        let mut found = false;
        walk(self, false, |inside_old, node| match node.kind() {
            ExpKind::Var(v) => {
                if inside_old == in_old && v.name.name() == name {
                    found = true;
                    node.break_();
                }
            }
            ExpKind::Old(_) => {
                if in_old {
                    node.schedule_children(true);
                }
            }
            _ => node.schedule_children(inside_old),
        });
        found
    }

    /// Does an existentially quantified variable occur in this tree?
    pub fn contains_existential(&self) -> bool {
        let mut found = false;
        walk_no_input(self, |node| {
            if node
                .as_var()
                .is_some_and(|v| v.quantification == Quantification::Exists)
            {
                found = true;
                node.break_();
            } else {
                node.schedule_children(());
            }
        });
        found
    }

    /// Does an `#(...)` node occur in this tree?
    pub fn contains_old(&self) -> bool {
        let mut found = false;
        walk_no_input(self, |node| {
            if node.kind().is_old() {
                found = true;
                node.break_();
            } else {
                node.schedule_children(());
            }
        });
        found
    }

    /// Number of nodes reachable through [`sub_expressions`](Exp::sub_expressions), including
    /// `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        walk_no_input(self, |node| {
            count += 1;
            node.schedule_children(());
        });
        count
    }
}
