mod descriptor;
mod error;

pub use descriptor::{Direct, Indirection, Pointer, Shape, TypeDescriptor};
pub use error::{CodecError, Error, Result};
