#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

//! Format adapters for the generic marshaller.

/// Implements `Marshaller`, `Clone` and `Debug` for newtypes around a `TypeMarshaller`.
///
/// The invoking module must have `Marshaller`, `Result`, `Shape`, `TypeDescriptor`
/// and `TypeMarshaller` in scope.
macro_rules! impl_marshaller_for {
    ($($adapter:ident),+) => {
        $(impl<S: Shape> $adapter<S> {
            pub fn descriptor(&self) -> &TypeDescriptor<S> {
                self.0.descriptor()
            }

            pub fn into_inner(self) -> TypeMarshaller<S> {
                self.0
            }
        }

        impl<S: Shape> Marshaller for $adapter<S> {
            type Input = S::Value;
            type Output = S::Output;

            fn marshal(&self, value: Option<&Self::Input>) -> Result<Option<Vec<u8>>> {
                self.0.marshal(value)
            }

            fn unmarshal(&self, bytes: Option<&[u8]>) -> Result<Option<Self::Output>> {
                self.0.unmarshal(bytes)
            }
        }

        impl<S: Shape> Clone for $adapter<S> {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl<S: Shape> core::fmt::Debug for $adapter<S> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($adapter)).field(&self.0).finish()
            }
        })+
    };
}

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "msgpack")]
pub mod msgpack;
pub mod string;

#[cfg(feature = "json")]
pub use json::JsonMarshaller;
#[cfg(feature = "msgpack")]
pub use msgpack::MessagePackMarshaller;
pub use string::StringMarshaller;
