mod storable;

use crate::{
    convert::Context,
    error::Error,
    reflect::{Property, TypeInfo},
    value::Value,
};

// re-exports
pub use storable::{MapContainer, SequenceContainer};

///
/// Storable
///
/// A type whose values can occupy a record-store slot: store primitives,
/// supported containers of them, options, and record types.
///

pub trait Storable: Sized {
    fn type_info() -> TypeInfo;

    /// Encode `self`; `None` means "absent" and leaves the slot unwritten.
    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error>;

    fn from_value(value: Value, cx: &mut Context<'_>) -> Result<Self, Error>;
}

///
/// Record
///
/// An application record type. Usually implemented by `#[derive(Record)]`;
/// a type is a record type only if `record_type` carries schema metadata.
///

pub trait Record: Default + 'static {
    fn record_type() -> TypeInfo;

    /// Public instance properties in declaration order.
    fn properties() -> Vec<Property>;

    fn read_property(&self, name: &str, cx: &mut Context<'_>) -> Result<Option<Value>, Error>;

    fn write_property(
        &mut self,
        name: &str,
        value: Value,
        cx: &mut Context<'_>,
    ) -> Result<(), Error>;
}
