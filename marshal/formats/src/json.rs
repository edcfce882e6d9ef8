use marshal_core::{
    CodecError, Direct, Marshaller, Pointer, Result, Shape, TypeDescriptor, TypeMarshaller,
};
use serde::{de::DeserializeOwned, Serialize};

/// A JSON marshaller that uses `serde_json` to encode/decode
pub struct JsonMarshaller<S: Shape>(TypeMarshaller<S>);

impl<S> JsonMarshaller<S>
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

impl_marshaller_for!(JsonMarshaller);

/// JSON marshaller handing back `T`.
pub fn marshaller<T>() -> Result<JsonMarshaller<Direct<T>>>
where
    T: Serialize + DeserializeOwned + Default + 'static,
{
    JsonMarshaller::new(TypeDescriptor::direct())
}

/// JSON marshaller handing back `Box<T>`.
pub fn pointer_marshaller<T>() -> Result<JsonMarshaller<Pointer<T>>>
where
    T: Serialize + DeserializeOwned + Default + 'static,
{
    JsonMarshaller::new(TypeDescriptor::pointer())
}

fn encode<T: Serialize>(value: Option<&T>) -> core::result::Result<Option<Vec<u8>>, CodecError> {
    value
        .map(serde_json::to_vec)
        .transpose()
        .map_err(Into::into)
}

fn decode<T: DeserializeOwned>(
    bytes: Option<&[u8]>,
    dest: &mut T,
) -> core::result::Result<(), CodecError> {
    *dest = serde_json::from_slice(bytes.unwrap_or_default())?;
    Ok(())
}
