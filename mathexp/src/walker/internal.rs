//! Internal primitives powering the public walker API.
//!
//! Kept apart from the public surface so the scheduling queue never leaks. They provide the
//! minimal handles wrapped by [`WalkerHandle`](super::WalkerHandle) and
//! [`WalkerNodeHandle`](super::WalkerNodeHandle).
use std::{cell::RefCell, collections::VecDeque};

use crate::exp::Exp;

/// Pending visits: (node, parent, input).
pub(super) type WalkerStackType<'a, I> = VecDeque<(&'a Exp, Option<&'a Exp>, I)>;

/// Handle for scheduling a child visit from within a visitor.
pub(super) struct InternalWalkerNodeHandle<'s, 'a, I> {
    pub(super) stack: &'s RefCell<WalkerStackType<'a, I>>,
    pub(super) child: &'a Exp,
    pub(super) current: &'a Exp,
}

impl<'s, 'a, I> InternalWalkerNodeHandle<'s, 'a, I> {
    /// Schedule the child to be visited next (LIFO/DFS).
    #[inline]
    pub fn schedule_immediate(&self, input: I) {
        self.stack
            .borrow_mut()
            .push_front((self.child, Some(self.current), input));
    }

    /// Schedule the child after everything already queued (FIFO/BFS).
    #[inline]
    pub fn schedule_deferred(&self, input: I) {
        self.stack
            .borrow_mut()
            .push_back((self.child, Some(self.current), input));
    }
}

/// Handle for re-scheduling the current node or stopping the walk.
pub(super) struct InternalWalkerHandle<'s, 'a, I> {
    pub(super) stack: &'s RefCell<WalkerStackType<'a, I>>,
    pub(super) parent: Option<&'a Exp>,
    pub(super) current: &'a Exp,
}

impl<'s, 'a, I> InternalWalkerHandle<'s, 'a, I> {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn schedule_self_immediate(&self, input: I) {
        self.stack
            .borrow_mut()
            .push_front((self.current, self.parent, input));
    }

    /// Drop every pending visit. Nodes scheduled afterwards are still visited.
    pub fn break_(&self) {
        self.stack.borrow_mut().clear();
    }
}
