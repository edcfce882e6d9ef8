use core::any::Any;

use crate::types::Result;

/// A trait that defines how values are marshalled to, and unmarshalled from, bytes.
///
/// `None` stands for the absent value on both sides: an absent value may be
/// marshalled, and absent bytes may be unmarshalled. What absence turns into is
/// up to the implementation.
pub trait Marshaller {
    /// The type accepted by [`Marshaller::marshal`].
    type Input: ?Sized;
    /// The type produced by [`Marshaller::unmarshal`].
    type Output;

    fn marshal(&self, value: Option<&Self::Input>) -> Result<Option<Vec<u8>>>;

    fn unmarshal(&self, bytes: Option<&[u8]>) -> Result<Option<Self::Output>>;
}

impl<M: Marshaller + ?Sized> Marshaller for Box<M> {
    type Input = M::Input;
    type Output = M::Output;

    fn marshal(&self, value: Option<&Self::Input>) -> Result<Option<Vec<u8>>> {
        (**self).marshal(value)
    }

    fn unmarshal(&self, bytes: Option<&[u8]>) -> Result<Option<Self::Output>> {
        (**self).unmarshal(bytes)
    }
}

/// A dynamically typed value that still knows the name of its concrete type.
pub trait DynValue: Any + 'static {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;
}

impl<T: Any> DynValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dyn_value_reports_concrete_type() {
        let owned = String::new();
        let values: [&dyn DynValue; 3] = [&1u8, &"str", &owned];
        let names: Vec<_> = values.into_iter().map(|v| v.type_name()).collect();
        assert_eq!(names[0], "u8");
        assert_eq!(names[1], "&str");
        assert!(names[2].ends_with("String"));
    }

    #[test]
    fn dyn_value_downcasts() {
        let value: &dyn DynValue = &42i64;
        assert_eq!(value.as_any().downcast_ref::<i64>(), Some(&42));
        assert!(value.as_any().downcast_ref::<i32>().is_none());
    }
}
