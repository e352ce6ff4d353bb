//! Animated targets and identity-keyed handles to them.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::transform::Transform;

/// Anything whose local transform can be read and written: a skinned bone,
/// an attachment node, a camera mount.
pub trait HasLocalTransform {
    fn local_transform(&self) -> Transform;
    fn set_local_transform(&mut self, transform: Transform);
}

/// Shared handle to an animated target.
///
/// Equality and hashing use object identity, so two handles compare equal
/// only when they point at the same underlying target. That makes the
/// handle usable as an aggregation-map key even when several actions
/// animate the same target.
#[derive(Clone)]
pub struct TargetHandle(Rc<RefCell<dyn HasLocalTransform>>);

impl TargetHandle {
    pub fn new(target: Rc<RefCell<dyn HasLocalTransform>>) -> Self {
        Self(target)
    }

    pub fn local_transform(&self) -> Transform {
        self.0.borrow().local_transform()
    }

    pub fn set_local_transform(&self, transform: Transform) {
        self.0.borrow_mut().set_local_transform(transform);
    }

    #[inline]
    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for TargetHandle {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for TargetHandle {}

impl Hash for TargetHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetHandle({:#x})", self.addr())
    }
}
