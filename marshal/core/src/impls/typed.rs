use core::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::{error, trace};

use crate::context::Marshaller;
use crate::types::{CodecError, Error, Result, Shape, TypeDescriptor};

/// Function that encodes a value into bytes. `None` is the absent value.
pub type EncodeFn<T> =
    Arc<dyn Fn(Option<&T>) -> core::result::Result<Option<Vec<u8>>, CodecError> + Send + Sync>;

/// Function that decodes bytes into the given destination.
pub type DecodeFn<T> =
    Arc<dyn Fn(Option<&[u8]>, &mut T) -> core::result::Result<(), CodecError> + Send + Sync>;

/// A marshaller for one registered type, built from an encode/decode function pair.
///
/// The shape `S` fixes what `unmarshal` hands back: `Direct<T>` returns a `T`
/// and `Pointer<T>` returns a `Box<T>`. Either way decoding happens into a fresh
/// zero-valued `T`, so no state is carried between calls.
///
/// Can be safely cloned, sent across threads and shared.
pub struct TypeMarshaller<S: Shape> {
    descriptor: TypeDescriptor<S>,
    encode: EncodeFn<S::Value>,
    decode: DecodeFn<S::Value>,
}

impl<S: Shape> TypeMarshaller<S> {
    /// Creates a new marshaller, failing if any of its three parts is missing.
    pub fn new(
        descriptor: Option<TypeDescriptor<S>>,
        encode: Option<EncodeFn<S::Value>>,
        decode: Option<DecodeFn<S::Value>>,
    ) -> Result<Self> {
        let descriptor = descriptor.ok_or(Error::InvalidConfiguration {
            missing: "type descriptor",
        })?;
        let encode = encode.ok_or(Error::InvalidConfiguration {
            missing: "encode function",
        })?;
        let decode = decode.ok_or(Error::InvalidConfiguration {
            missing: "decode function",
        })?;

        Ok(Self {
            descriptor,
            encode,
            decode,
        })
    }

    pub fn builder() -> Builder<S> {
        Builder::default()
    }

    pub fn descriptor(&self) -> &TypeDescriptor<S> {
        &self.descriptor
    }
}

impl<S: Shape> Marshaller for TypeMarshaller<S> {
    type Input = S::Value;
    type Output = S::Output;

    fn marshal(&self, value: Option<&S::Value>) -> Result<Option<Vec<u8>>> {
        trace!(
            "marshalling {} (absent = {})",
            self.descriptor.type_name(),
            value.is_none()
        );
        (self.encode)(value).map_err(Error::Encode)
    }

    fn unmarshal(&self, bytes: Option<&[u8]>) -> Result<Option<S::Output>> {
        trace!(
            "unmarshalling {} {} from {:?} bytes",
            self.descriptor.type_name(),
            if self.descriptor.is_pointer() {
                "by pointer"
            } else {
                "by value"
            },
            bytes.map(<[u8]>::len)
        );

        // the pointee is allocated, never the pointer itself
        let mut value = Box::<S::Value>::default();

        if let Err(e) = (self.decode)(bytes, &mut *value) {
            error!(
                "error while unmarshalling data into {}: {}",
                self.descriptor.type_name(),
                e
            );
            return Err(Error::Decode {
                type_name: self.descriptor.type_name(),
                source: e,
            });
        }

        Ok(Some(S::finish(value)))
    }
}

impl<S: Shape> Clone for TypeMarshaller<S> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            encode: Arc::clone(&self.encode),
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<S: Shape> Debug for TypeMarshaller<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMarshaller")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Collects the parts of a [`TypeMarshaller`]; validation happens in [`Builder::build`].
pub struct Builder<S: Shape> {
    descriptor: Option<TypeDescriptor<S>>,
    encode: Option<EncodeFn<S::Value>>,
    decode: Option<DecodeFn<S::Value>>,
}

impl<S: Shape> Default for Builder<S> {
    fn default() -> Self {
        Self {
            descriptor: None,
            encode: None,
            decode: None,
        }
    }
}

impl<S: Shape> Builder<S> {
    pub fn descriptor(mut self, descriptor: TypeDescriptor<S>) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn encoder<F>(mut self, encode: F) -> Self
    where
        F: Fn(Option<&S::Value>) -> core::result::Result<Option<Vec<u8>>, CodecError>
            + Send
            + Sync
            + 'static,
    {
        self.encode = Some(Arc::new(encode));
        self
    }

    pub fn decoder<F>(mut self, decode: F) -> Self
    where
        F: Fn(Option<&[u8]>, &mut S::Value) -> core::result::Result<(), CodecError>
            + Send
            + Sync
            + 'static,
    {
        self.decode = Some(Arc::new(decode));
        self
    }

    pub fn build(self) -> Result<TypeMarshaller<S>> {
        TypeMarshaller::new(self.descriptor, self.encode, self.decode)
    }
}
