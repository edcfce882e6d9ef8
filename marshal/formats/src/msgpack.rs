use marshal_core::{
    CodecError, Direct, Marshaller, Pointer, Result, Shape, TypeDescriptor, TypeMarshaller,
};
use serde::{de::DeserializeOwned, Serialize};

/// A MessagePack marshaller that uses `rmp-serde` to encode/decode.
///
/// Structs are encoded as maps keyed by field name; decoding accepts both the
/// map and the compact array representation.
pub struct MessagePackMarshaller<S: Shape>(TypeMarshaller<S>);

impl<S> MessagePackMarshaller<S>
where
    S: Shape,
    S::Value: Serialize + DeserializeOwned + 'static,
{
    pub fn new(descriptor: TypeDescriptor<S>) -> Result<Self> {
        TypeMarshaller::builder()
            .descriptor(descriptor)
            .encoder(encode::<S::Value>)
            .decoder(decode::<S::Value>)
            .build()
            .map(Self)
    }
}

impl_marshaller_for!(MessagePackMarshaller);

/// MessagePack marshaller handing back `T`.
pub fn marshaller<T>() -> Result<MessagePackMarshaller<Direct<T>>>
where
    T: Serialize + DeserializeOwned + Default + 'static,
{
    MessagePackMarshaller::new(TypeDescriptor::direct())
}

/// MessagePack marshaller handing back `Box<T>`.
pub fn pointer_marshaller<T>() -> Result<MessagePackMarshaller<Pointer<T>>>
where
    T: Serialize + DeserializeOwned + Default + 'static,
{
    MessagePackMarshaller::new(TypeDescriptor::pointer())
}

fn encode<T: Serialize>(value: Option<&T>) -> core::result::Result<Option<Vec<u8>>, CodecError> {
    value
        .map(rmp_serde::to_vec_named)
        .transpose()
        .map_err(Into::into)
}

fn decode<T: DeserializeOwned>(
    bytes: Option<&[u8]>,
    dest: &mut T,
) -> core::result::Result<(), CodecError> {
    *dest = rmp_serde::from_slice(bytes.unwrap_or_default())?;
    Ok(())
}
