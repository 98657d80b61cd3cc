//! Cancellation handles.
//!
//! A [`Disposable`] owns exactly one releasable resource. Releasing it is
//! idempotent: the first call to [`Disposable::dispose`] performs the release,
//! every later call is a no-op.
//!
//! | Type | Releases |
//! |---|---|
//! | [`BooleanDisposable`] | nothing, only records the state |
//! | [`AnonymousDisposable`] | runs a closure once |
//! | [`SingleAssignmentDisposable`] | a resource assigned after construction |
//! | [`CompositeDisposable`] | a group of disposables |
//! | [`CancellationDisposable`] | a tokio cancellation token |

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::{DisposeError, DisposeResult};

// =============================================================================
// Disposable Trait
// =============================================================================

/// A one-shot, idempotent cancellation handle.
pub trait Disposable: Send + Sync {
    /// Releases the underlying resource. Calling this more than once has no
    /// additional effect.
    fn dispose(&self);

    /// Returns `true` once [`dispose`](Self::dispose) has been called.
    fn is_disposed(&self) -> bool;
}

/// Shared, type-erased disposable.
pub type BoxedDisposable = Arc<dyn Disposable>;

impl<D: Disposable + ?Sized> Disposable for Arc<D> {
    fn dispose(&self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

// =============================================================================
// Boolean Disposable
// =============================================================================

/// A disposable that holds no resource and only tracks its own state.
#[derive(Debug, Default)]
pub struct BooleanDisposable {
    disposed: AtomicBool,
}

impl BooleanDisposable {
    /// Creates a new, undisposed handle.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Disposable for BooleanDisposable {
    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

// =============================================================================
// Anonymous Disposable
// =============================================================================

type DisposeAction = Box<dyn FnOnce() + Send>;

/// A disposable that runs a closure the first time it is disposed.
pub struct AnonymousDisposable {
    action: Mutex<Option<DisposeAction>>,
}

impl AnonymousDisposable {
    /// Creates a disposable that runs `action` on disposal.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Mutex::new(Some(Box::new(action))),
        }
    }
}

impl Disposable for AnonymousDisposable {
    fn dispose(&self) {
        // Run outside the lock so the action may touch this handle again.
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_disposed(&self) -> bool {
        self.action.lock().is_none()
    }
}

impl fmt::Debug for AnonymousDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnonymousDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// =============================================================================
// Single Assignment Disposable
// =============================================================================

#[derive(Default)]
struct Slot {
    current: Option<BoxedDisposable>,
    assigned: bool,
    disposed: bool,
}

/// A slot for a resource that only becomes known after the handle exists.
///
/// Producers hand this out as the "cancel" handle of a sink before the
/// upstream subscription has been made, then fill it in with
/// [`set`](Self::set). If the slot was disposed in the meantime, the incoming
/// resource is disposed immediately.
#[derive(Default)]
pub struct SingleAssignmentDisposable {
    slot: Mutex<Slot>,
}

impl SingleAssignmentDisposable {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the resource held by this slot.
    ///
    /// Returns [`DisposeError::AlreadyAssigned`] if a resource was assigned
    /// before; the rejected resource is left untouched.
    pub fn set(&self, disposable: BoxedDisposable) -> DisposeResult<()> {
        let mut slot = self.slot.lock();
        if slot.assigned {
            return Err(DisposeError::AlreadyAssigned);
        }
        slot.assigned = true;

        if slot.disposed {
            drop(slot);
            trace!("Slot already disposed, releasing assigned resource");
            disposable.dispose();
            return Ok(());
        }

        slot.current = Some(disposable);
        Ok(())
    }

    /// Returns `true` once a resource has been assigned.
    pub fn is_assigned(&self) -> bool {
        self.slot.lock().assigned
    }
}

impl Disposable for SingleAssignmentDisposable {
    fn dispose(&self) {
        let current = {
            let mut slot = self.slot.lock();
            if slot.disposed {
                return;
            }
            slot.disposed = true;
            slot.current.take()
        };

        if let Some(current) = current {
            current.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        self.slot.lock().disposed
    }
}

impl fmt::Debug for SingleAssignmentDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("SingleAssignmentDisposable")
            .field("assigned", &slot.assigned)
            .field("disposed", &slot.disposed)
            .finish()
    }
}

// =============================================================================
// Composite Disposable
// =============================================================================

/// A group of disposables released together.
///
/// Adding to an already disposed group releases the newcomer immediately.
pub struct CompositeDisposable {
    /// `None` once the group has been disposed.
    members: Mutex<Option<Vec<BoxedDisposable>>>,
}

impl CompositeDisposable {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Some(Vec::new())),
        }
    }

    /// Adds a disposable to the group.
    pub fn add(&self, disposable: BoxedDisposable) {
        let mut members = self.members.lock();
        if let Some(members) = members.as_mut() {
            members.push(disposable);
            return;
        }
        drop(members);
        disposable.dispose();
    }

    /// Returns the number of live members.
    pub fn len(&self) -> usize {
        self.members.lock().as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if the group holds no live members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<BoxedDisposable>> for CompositeDisposable {
    fn from(members: Vec<BoxedDisposable>) -> Self {
        Self {
            members: Mutex::new(Some(members)),
        }
    }
}

impl Disposable for CompositeDisposable {
    fn dispose(&self) {
        let members = self.members.lock().take();
        for member in members.into_iter().flatten() {
            member.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        self.members.lock().is_none()
    }
}

impl fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeDisposable")
            .field("len", &self.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// =============================================================================
// Cancellation Disposable
// =============================================================================

/// Bridges a [`CancellationToken`] into the disposable protocol.
///
/// Async producers can watch [`token`](Self::token) and stop emitting once the
/// subscription is disposed.
#[derive(Debug, Clone, Default)]
pub struct CancellationDisposable {
    token: CancellationToken,
}

impl CancellationDisposable {
    /// Creates a handle with a fresh token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing token.
    pub fn from_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Returns a clone of the underlying token.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Disposable for CancellationDisposable {
    fn dispose(&self) {
        self.token.cancel();
    }

    fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Constructors for common disposables.
pub mod disposables {
    use std::sync::Arc;

    use super::{AnonymousDisposable, BooleanDisposable, BoxedDisposable, CompositeDisposable};

    /// A disposable that releases nothing.
    pub fn empty() -> BoxedDisposable {
        Arc::new(BooleanDisposable::new())
    }

    /// A disposable that runs `action` once on disposal.
    pub fn create<F>(action: F) -> BoxedDisposable
    where
        F: FnOnce() + Send + 'static,
    {
        Arc::new(AnonymousDisposable::new(action))
    }

    /// A disposable that releases `first`, then `second`.
    pub fn binary(first: BoxedDisposable, second: BoxedDisposable) -> BoxedDisposable {
        Arc::new(CompositeDisposable::from(vec![first, second]))
    }
}
