//! User-scheduled, explicit-stack traversal of an expression tree.
//!
//! Role
//! - Visit nodes of an [`Exp`] without recursion, so queries over very deep trees (long
//!   conjunction chains built by the VC generator) cannot overflow the call stack.
//! - The visitor decides which children to descend into, and with which input, by scheduling
//!   them through the handles it receives.
//!
//! Example
//! ```
//! use mathexp::prelude::*;
//!
//! let e = and(var("p"), not(var("q")));
//! let mut names = Vec::new();
//! walk_no_input(&e, |node| {
//!     if let Some(v) = node.as_var() {
//!         names.push(v.name.name().to_string());
//!     }
//!     node.schedule_children(());
//! });
//! assert_eq!(names, ["p", "q"]);
//! ```
mod internal;

use std::{cell::RefCell, ops::Deref};

use internal::{InternalWalkerHandle, InternalWalkerNodeHandle, WalkerStackType};

use crate::exp::{Exp, SubExpressions};

/// A child of the node being visited, plus the means to schedule it.
pub struct WalkerNodeHandle<'s, 'a, I> {
    internal: InternalWalkerNodeHandle<'s, 'a, I>,
}

impl<'s, 'a, I> WalkerNodeHandle<'s, 'a, I> {
    /// Visit this child next (LIFO), i.e. depth-first.
    #[inline]
    pub fn schedule_immediate(&self, input: I) {
        self.internal.schedule_immediate(input);
    }

    /// Visit this child after everything already scheduled (FIFO), i.e. breadth-first.
    #[inline]
    pub fn schedule_deferred(&self, input: I) {
        self.internal.schedule_deferred(input);
    }

    /// Shorthand for [`schedule_immediate`](Self::schedule_immediate).
    #[inline]
    pub fn schedule_visit(&self, input: I) {
        self.schedule_immediate(input)
    }

    #[inline]
    pub fn exp(&self) -> &'a Exp {
        self.internal.child
    }
}

impl<'s, 'a, I> Deref for WalkerNodeHandle<'s, 'a, I> {
    type Target = Exp;

    fn deref(&self) -> &Self::Target {
        self.internal.child
    }
}

/// The node being visited.
///
/// Derefs to the underlying [`Exp`]. Its children are reachable through
/// [`children`](Self::children) and are only visited if scheduled.
pub struct WalkerHandle<'s, 'a, I> {
    internal: InternalWalkerHandle<'s, 'a, I>,
    children: SubExpressions<'a>,
}

impl<'s, 'a, I> WalkerHandle<'s, 'a, I> {
    #[inline]
    pub fn exp(&self) -> &'a Exp {
        self.internal.current
    }

    #[inline]
    pub fn parent(&self) -> Option<&'a Exp> {
        self.internal.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.internal.is_root()
    }

    /// Handles to the children of this node, in child order.
    pub fn children(&self) -> impl Iterator<Item = WalkerNodeHandle<'s, 'a, I>> + '_ {
        self.children.iter().copied().map(|child| WalkerNodeHandle {
            internal: InternalWalkerNodeHandle {
                stack: self.internal.stack,
                child,
                current: self.internal.current,
            },
        })
    }

    /// Schedule every child with a clone of `input`, so that they are visited next and in
    /// child order.
    pub fn schedule_children(&self, input: I)
    where
        I: Clone,
    {
        let mut stack = self.internal.stack.borrow_mut();
        for &child in self.children.iter().rev() {
            stack.push_front((child, Some(self.internal.current), input.clone()));
        }
    }

    /// Visit the current node again, next.
    #[inline]
    pub fn schedule_self_immediate(&self, input: I) {
        self.internal.schedule_self_immediate(input);
    }

    /// Stop the walk: every pending visit is dropped. Nodes scheduled after this call are
    /// still visited.
    #[inline]
    pub fn break_(&self) {
        self.internal.break_();
    }

    #[inline]
    pub fn r#break(&self) {
        self.break_();
    }
}

impl<'s, 'a, I> Deref for WalkerHandle<'s, 'a, I> {
    type Target = Exp;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.internal.current
    }
}

/// Walk `exp` depth-first, starting at the root with `input`.
///
/// Only the root is visited unconditionally; every other node must be scheduled by the visitor
/// of its parent.
pub fn walk<'a, I, F>(exp: &'a Exp, input: I, mut walker: F)
where
    F: FnMut(I, WalkerHandle<'_, 'a, I>),
{
    let stack = RefCell::new(WalkerStackType::<'a, I>::new());
    stack.borrow_mut().push_front((exp, None, input));

    loop {
        // Short-lived borrow: the visitor schedules through the same stack.
        let next = stack.borrow_mut().pop_front();
        let Some((current, parent, input)) = next else {
            break;
        };

        walker(
            input,
            WalkerHandle {
                internal: InternalWalkerHandle {
                    stack: &stack,
                    parent,
                    current,
                },
                children: current.sub_expressions(),
            },
        );
    }
}

/// [`walk`] when no input needs to be threaded.
#[inline]
pub fn walk_no_input<'a, F>(exp: &'a Exp, mut walker: F)
where
    F: FnMut(WalkerHandle<'_, 'a, ()>),
{
    walk(exp, (), |(), node| walker(node));
}
