use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;

/// Whether an unmarshalled value is handed back by value or behind a pointer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Indirection {
    /// Return the decoded `T` itself.
    Direct,
    /// Return the decoded `T` as a `Box<T>`.
    Pointer,
}

/// Ties the type a marshaller decodes into to the type it hands back.
///
/// Decoding always happens into a freshly allocated, zero-valued `Value`; the
/// shape then decides whether the allocation is unwrapped or returned as is.
pub trait Shape {
    /// The underlying value type, i.e. the pointee for pointer shapes.
    type Value: Default;
    /// The registered type returned by `unmarshal`.
    type Output;

    const INDIRECTION: Indirection;

    fn finish(value: Box<Self::Value>) -> Self::Output;
}

/// Shape of a marshaller registered for `T`.
pub struct Direct<T>(PhantomData<fn() -> T>);

/// Shape of a marshaller registered for `Box<T>`.
pub struct Pointer<T>(PhantomData<fn() -> T>);

impl<T: Default> Shape for Direct<T> {
    type Value = T;
    type Output = T;

    const INDIRECTION: Indirection = Indirection::Direct;

    fn finish(value: Box<T>) -> T {
        *value
    }
}

impl<T: Default> Shape for Pointer<T> {
    type Value = T;
    type Output = Box<T>;

    const INDIRECTION: Indirection = Indirection::Pointer;

    fn finish(value: Box<T>) -> Box<T> {
        value
    }
}

/// Identifies the concrete type, and its indirection, that a marshaller is bound to.
///
/// The shape `S` already decides at compile time what `unmarshal` returns. The
/// runtime [`Indirection`] always agrees with `S::INDIRECTION` and is kept for
/// diagnostics and for callers that inspect a marshaller without knowing `S`.
pub struct TypeDescriptor<S> {
    indirection: Indirection,
    type_name: &'static str,
    _shape: PhantomData<fn() -> S>,
}

impl<S: Shape> TypeDescriptor<S> {
    pub fn new() -> Self {
        Self {
            indirection: S::INDIRECTION,
            type_name: core::any::type_name::<S::Output>(),
            _shape: PhantomData,
        }
    }

    pub fn indirection(&self) -> Indirection {
        self.indirection
    }

    pub fn is_pointer(&self) -> bool {
        self.indirection == Indirection::Pointer
    }

    /// Name of the registered type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T: Default> TypeDescriptor<Direct<T>> {
    pub fn direct() -> Self {
        Self::new()
    }
}

impl<T: Default> TypeDescriptor<Pointer<T>> {
    pub fn pointer() -> Self {
        Self::new()
    }
}

impl<S: Shape> Default for TypeDescriptor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for TypeDescriptor<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TypeDescriptor<S> {}

impl<S> Debug for TypeDescriptor<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("indirection", &self.indirection)
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_descriptor() {
        let d = TypeDescriptor::<Direct<u32>>::direct();
        assert_eq!(d.indirection(), Indirection::Direct);
        assert!(!d.is_pointer());
        assert_eq!(d.type_name(), "u32");
    }

    #[test]
    fn pointer_descriptor() {
        let d = TypeDescriptor::<Pointer<u32>>::pointer();
        assert_eq!(d.indirection(), Indirection::Pointer);
        assert!(d.is_pointer());
        assert!(d.type_name().starts_with("alloc::boxed::Box<"));
    }

    #[test]
    fn shapes_finish_allocation() {
        let direct: u32 = Direct::<u32>::finish(Box::new(7));
        assert_eq!(direct, 7);

        let pointer: Box<u32> = Pointer::<u32>::finish(Box::new(7));
        assert_eq!(*pointer, 7);
    }
}
