//! Cancellation handles for roast requests.
//!
//! A [`RequestToken`] belongs to exactly one attempt. Cancelling it fires the
//! attempt's [`CancelSignal`], which runs whatever abort hooks the API client
//! registered, and aborts the wrapped future so its result never reaches the
//! controller as a success or failure.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures_util::future::{AbortHandle, AbortRegistration};

/// Identifies one attempt. Monotonic per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub(crate) u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observer side of a token, handed to the API client.
#[derive(Clone, Default)]
pub struct CancelSignal {
    inner: Rc<SignalInner>,
}

#[derive(Default)]
struct SignalInner {
    cancelled: Cell<bool>,
    hooks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Registers `hook` to run once on cancellation. Runs it immediately if
    /// the signal already fired.
    pub fn on_cancel(&self, hook: impl FnOnce() + 'static) {
        if self.is_cancelled() {
            hook();
        } else {
            self.inner.hooks.borrow_mut().push(Box::new(hook));
        }
    }

    fn fire(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        // Hooks may inspect the signal, so release the borrow first.
        let hooks = std::mem::take(&mut *self.inner.hooks.borrow_mut());
        for hook in hooks {
            hook();
        }
    }
}

impl fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelSignal")
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Owned by the controller, one per attempt, never shared.
#[derive(Debug)]
pub struct RequestToken {
    id: TokenId,
    signal: CancelSignal,
    abort: AbortHandle,
}

impl RequestToken {
    pub(crate) fn mint(id: TokenId) -> (Self, AbortRegistration) {
        let (abort, registration) = AbortHandle::new_pair();
        let token = Self {
            id,
            signal: CancelSignal::default(),
            abort,
        };
        (token, registration)
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn signal(&self) -> &CancelSignal {
        &self.signal
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.signal.fire();
        self.abort.abort();
    }
}
