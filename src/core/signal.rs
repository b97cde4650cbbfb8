// Typed single-threaded publish/subscribe.
//
// A [`Signal`] fans one payload type out to any number of handlers. Each
// `subscribe` returns a [`Subscription`] guard; dropping the guard removes the
// handler, so a component that owns its guards is unsubscribed on teardown.

use fnv::FnvHashMap;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

struct Slots<T> {
    next_id: u64,
    handlers: FnvHashMap<u64, Handler<T>>,
}

pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: FnvHashMap::default(),
            })),
        }
    }

    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        slots
            .handlers
            .insert(id, Rc::new(RefCell::new(Box::new(handler))));
        drop(slots);

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().handlers.remove(&id);
                }
            })),
        }
    }

    /// Deliver `value` to every handler subscribed when the call starts, in
    /// subscription order. Returns how many handlers ran.
    pub fn emit(&self, value: &T) -> usize {
        let snapshot: Vec<(u64, Handler<T>)> = {
            let slots = self.slots.borrow();
            let mut v: Vec<_> = slots
                .handlers
                .iter()
                .map(|(id, h)| (*id, h.clone()))
                .collect();
            v.sort_unstable_by_key(|(id, _)| *id);
            v
        };
        let mut delivered = 0;
        for (id, handler) in snapshot {
            // skip handlers unsubscribed by an earlier handler in this emit
            if !self.slots.borrow().handlers.contains_key(&id) {
                continue;
            }
            // a handler emitting into its own signal is not re-entered
            if let Ok(mut h) = handler.try_borrow_mut() {
                (&mut **h)(value);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

/// Guard returned by [`Signal::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the handler alive for the rest of the page's life.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Browser input fanned out to the engines. Built once at startup and passed
/// to whoever needs it.
#[derive(Clone, Default)]
pub struct PageSignals {
    pub scroll: Signal<f64>,
    pub pointer_move: Signal<Vec2>,
    pub click: Signal<Vec2>,
    pub resize: Signal<(f64, f64)>,
    pub key: Signal<String>,
}
