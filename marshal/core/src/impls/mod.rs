mod typed;

pub use typed::{Builder, DecodeFn, EncodeFn, TypeMarshaller};
