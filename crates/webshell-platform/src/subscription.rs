//! Scoped listener registration.
//!
//! [`Listeners`] holds callbacks for one platform signal. Registering a
//! callback hands back a [`Subscription`]; the callback stays registered
//! exactly as long as that guard is alive. Dropping the guard, on any path,
//! unregisters it, so no callback can fire after its owner is gone.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Listeners must not
//! subscribe to, or release a subscription of, the registry that is
//! currently dispatching to them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct Registry<F: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Box<F>)>,
}

/// A set of callbacks for one platform signal.
pub struct Listeners<F: ?Sized> {
    inner: Rc<RefCell<Registry<F>>>,
}

impl<F: ?Sized + 'static> Listeners<F> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register `listener`. It is removed when the returned guard drops.
    #[must_use = "dropping the subscription immediately unregisters the listener"]
    pub fn subscribe(&self, listener: Box<F>) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.entries.push((id, listener));
            id
        };
        let registry: Weak<RefCell<Registry<F>>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(reg) = registry.upgrade() {
                    reg.borrow_mut().entries.retain(|(eid, _)| *eid != id);
                }
            })),
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offer the signal to listeners, most recently registered first,
    /// stopping at the first one for which `visit` returns `Some`.
    pub fn dispatch_until<R>(&self, mut visit: impl FnMut(&mut F) -> Option<R>) -> Option<R> {
        let mut reg = self.inner.borrow_mut();
        for (_, listener) in reg.entries.iter_mut().rev() {
            if let Some(result) = visit(&mut **listener) {
                return Some(result);
            }
        }
        None
    }

    /// Deliver the signal to every listener in registration order.
    pub fn dispatch_all(&self, mut visit: impl FnMut(&mut F)) {
        let mut reg = self.inner.borrow_mut();
        for (_, listener) in reg.entries.iter_mut() {
            visit(&mut **listener);
        }
    }
}

impl<F: ?Sized + 'static> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a registered listener. Unregisters on drop.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unregister now instead of at end of scope.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}
