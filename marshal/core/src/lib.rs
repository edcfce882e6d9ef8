#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

//! Core of the marshal workspace: the `Marshaller` contract and the generic
//! type-directed marshaller that the format adapters are built on.

pub mod context;
pub mod impls;
pub mod types;

pub use context::{DynValue, Marshaller};
pub use impls::{Builder, DecodeFn, EncodeFn, TypeMarshaller};
pub use types::{
    CodecError, Direct, Error, Indirection, Pointer, Result, Shape, TypeDescriptor,
};
