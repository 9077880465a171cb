/// A raw C handle plus the function that releases it. Deref/DerefMut expose
/// the handle directly so call sites read like plain C API calls; `Drop`
/// guarantees the native resource is released exactly once.
pub(crate) struct CBox<T: Copy> {
    value: T,
    destructor: fn(T),
}

impl<T: Copy> CBox<T> {
    pub(crate) fn new(value: T, destructor: fn(T)) -> Self {
        Self { value, destructor }
    }
}

impl<T: Copy> std::ops::Deref for CBox<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Copy> std::ops::DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Copy> Drop for CBox<T> {
    fn drop(&mut self) {
        (self.destructor)(self.value);
    }
}
