//! Callback registry for widget change notifications.
//!
//! One registry per event kind (`changed`, `change_end`), any number of
//! subscribers, invoked sequentially in subscription order. All dispatch is
//! synchronous on the UI thread; a panicking subscriber propagates.

use std::cell::RefCell;
use std::rc::Rc;

/// A list of subscribers for one event kind.
pub struct Callbacks<T> {
    subs: RefCell<Vec<Rc<dyn Fn(&T)>>>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Callbacks<T> {
    pub fn new() -> Self {
        Self {
            subs: RefCell::new(Vec::new()),
        }
    }

    /// Add a subscriber. Subscribers are never removed; widgets live as
    /// long as their view does.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) {
        self.subs.borrow_mut().push(Rc::new(callback));
    }

    /// Invoke every subscriber with `value`, in subscription order.
    ///
    /// The list is snapshotted first, so a subscriber may itself subscribe
    /// (taking effect from the next emit) without poisoning the borrow.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Rc<dyn Fn(&T)>> = self.subs.borrow().clone();
        for cb in snapshot {
            cb(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subs.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscribers_run_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let cb = Callbacks::new();
        let c1 = calls.clone();
        cb.subscribe(move |v: &i32| c1.borrow_mut().push(("a", *v)));
        let c2 = calls.clone();
        cb.subscribe(move |v: &i32| c2.borrow_mut().push(("b", *v)));
        cb.emit(&7);
        assert_eq!(*calls.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn subscribing_during_emit_is_allowed() {
        let cb = Rc::new(Callbacks::new());
        let hits = Rc::new(Cell::new(0u32));
        let inner_hits = hits.clone();
        let inner_cb = cb.clone();
        cb.subscribe(move |_: &()| {
            let h = inner_hits.clone();
            inner_cb.subscribe(move |_| h.set(h.get() + 1));
        });
        cb.emit(&());
        assert_eq!(hits.get(), 0);
        cb.emit(&());
        assert_eq!(hits.get(), 1);
    }
}
