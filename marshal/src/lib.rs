#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

//! Typed marshalling to and from bytes, with the wire format chosen at
//! construction time (or from configuration) rather than at the call site.

pub mod config;

pub use config::{load_config, parse_config, BoxedMarshaller, Format, MarshalConfig};
pub use marshal_core::{
    Direct, DynValue, Error, Indirection, Marshaller, Pointer, Result, Shape, TypeDescriptor,
    TypeMarshaller,
};
#[cfg(feature = "json")]
pub use marshal_formats::JsonMarshaller;
#[cfg(feature = "msgpack")]
pub use marshal_formats::MessagePackMarshaller;
pub use marshal_formats::StringMarshaller;

/// Re-exports the generic marshaller and its types.
pub mod typed {
    pub use marshal_core::*;
}

/// Re-exports the format adapters.
pub mod formats {
    pub use marshal_formats::*;
}
