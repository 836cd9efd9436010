//! Opaque application content and the factories that create it

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Application content hosted verbatim in a window's content slot.
///
/// The desktop never looks inside; it only stores, clones and compares the
/// handle. Hosts downcast it back to their own type when rendering. The
/// content is released when the last handle is dropped.
#[derive(Clone)]
pub struct Content(Rc<dyn Any>);

impl Content {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrow the content as `T`, if that is what it holds
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles refer to the same content instance
    pub fn ptr_eq(&self, other: &Content) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Content")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}

/// Lazily creates the content of a newly launched application.
///
/// Called exactly once per launched instance. Returning `None` is not an
/// error: the instance is still created, with an empty content slot.
pub trait ContentFactory {
    fn create(&self) -> Option<Content>;
}

impl<F> ContentFactory for F
where
    F: Fn() -> Option<Content>,
{
    fn create(&self) -> Option<Content> {
        self()
    }
}
