use crate::{
    convert::Context,
    error::Error,
    reflect::{Capability, TypeInfo},
    traits::Storable,
    types::{ElementId, Guid, Uv, Xyz},
    value::Value,
};
use extstore_primitives::ValueKind;
use std::{
    any::type_name,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    hash::{BuildHasher, Hash},
};

///
/// SequenceContainer
///
/// Construction hooks used when rebuilding a sequence from stored values.
///

pub trait SequenceContainer: Sized {
    type Item;

    /// Empty container, pre-sized for `len` elements when the type allows it.
    fn with_len(len: usize) -> Self;

    fn push_item(&mut self, item: Self::Item);
}

impl<T> SequenceContainer for Vec<T> {
    type Item = T;

    fn with_len(len: usize) -> Self {
        Self::with_capacity(len)
    }

    fn push_item(&mut self, item: T) {
        self.push(item);
    }
}

impl<T> SequenceContainer for VecDeque<T> {
    type Item = T;

    fn with_len(len: usize) -> Self {
        Self::with_capacity(len)
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }
}

impl<T> SequenceContainer for LinkedList<T> {
    type Item = T;

    fn with_len(_: usize) -> Self {
        Self::new()
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }
}

///
/// MapContainer
///

pub trait MapContainer: Sized {
    type Key;
    type Value;

    /// Empty map, pre-sized for `len` entries when the type allows it.
    fn with_len(len: usize) -> Self;

    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);
}

impl<K: Ord, V> MapContainer for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn with_len(_: usize) -> Self {
        Self::new()
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> MapContainer for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn with_len(len: usize) -> Self {
        Self::with_capacity_and_hasher(len, S::default())
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

//
// helpers
//

fn element_value<T: Storable>(item: &T, cx: &mut Context<'_>) -> Result<Value, Error> {
    item.to_value(cx)?.ok_or_else(|| Error::NullElement {
        ty: type_name::<T>().to_string(),
    })
}

fn encode_sequence<'a, T: Storable + 'a>(
    len: usize,
    items: impl IntoIterator<Item = &'a T>,
    cx: &mut Context<'_>,
) -> Result<Option<Value>, Error> {
    let mut out = Vec::with_capacity(len);
    for item in items {
        out.push(element_value(item, cx)?);
    }

    Ok(Some(Value::List(out)))
}

fn decode_sequence<C>(value: Value, cx: &mut Context<'_>) -> Result<C, Error>
where
    C: SequenceContainer,
    C::Item: Storable,
{
    let items = match value {
        Value::List(items) => items,
        other => return Err(Error::value_mismatch("list", &other)),
    };

    let mut out = C::with_len(items.len());
    for item in items {
        out.push_item(C::Item::from_value(item, cx)?);
    }

    Ok(out)
}

fn encode_map<'a, K: Storable + 'a, V: Storable + 'a>(
    len: usize,
    entries: impl IntoIterator<Item = (&'a K, &'a V)>,
    cx: &mut Context<'_>,
) -> Result<Option<Value>, Error> {
    let mut out = Vec::with_capacity(len);
    for (key, value) in entries {
        out.push((element_value(key, cx)?, element_value(value, cx)?));
    }

    Ok(Some(Value::Map(out)))
}

fn decode_map<M>(value: Value, cx: &mut Context<'_>) -> Result<M, Error>
where
    M: MapContainer,
    M::Key: Storable,
    M::Value: Storable,
{
    let entries = match value {
        Value::Map(entries) => entries,
        other => return Err(Error::value_mismatch("map", &other)),
    };

    let mut out = M::with_len(entries.len());
    for (key, value) in entries {
        out.insert_entry(
            M::Key::from_value(key, cx)?,
            M::Value::from_value(value, cx)?,
        );
    }

    Ok(out)
}

// Generic shapes classify as unsupported element types, so at convert time
// they surface against the field being written.
fn unsupported_element<T>(cx: &Context<'_>) -> Error {
    Error::unsupported_type(cx.field(), type_name::<T>())
}

//
// primitives
//

macro_rules! copy_primitive_storable {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl Storable for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::primitive(type_name::<Self>(), ValueKind::$variant)
                }

                fn to_value(&self, _: &mut Context<'_>) -> Result<Option<Value>, Error> {
                    Ok(Some(Value::$variant(*self)))
                }

                fn from_value(value: Value, _: &mut Context<'_>) -> Result<Self, Error> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::value_mismatch(ValueKind::$variant, &other)),
                    }
                }
            }
        )*
    };
}

copy_primitive_storable! {
    bool => Bool,
    u8 => Byte,
    i16 => Int16,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
    Guid => Guid,
    ElementId => ElementId,
    Xyz => Xyz,
    Uv => Uv,
}

impl Storable for String {
    fn type_info() -> TypeInfo {
        TypeInfo::primitive(type_name::<Self>(), ValueKind::Text)
    }

    fn to_value(&self, _: &mut Context<'_>) -> Result<Option<Value>, Error> {
        Ok(Some(Value::Text(self.clone())))
    }

    fn from_value(value: Value, _: &mut Context<'_>) -> Result<Self, Error> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(Error::value_mismatch(ValueKind::Text, &other)),
        }
    }
}

// Rust primitives the store has no slot type for.
macro_rules! opaque_storable {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl Storable for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::opaque(type_name::<Self>())
                }

                fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
                    Err(Error::unsupported_type(cx.field(), type_name::<Self>()))
                }

                fn from_value(_: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
                    Err(Error::unsupported_type(cx.field(), type_name::<Self>()))
                }
            }
        )*
    };
}

opaque_storable!(i8, u16, u32, u64, u128, i64, i128, isize, usize, char);

//
// wrappers
//

impl<T: Storable> Storable for Option<T> {
    fn type_info() -> TypeInfo {
        T::type_info()
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        match self {
            Some(inner) => inner.to_value(cx),
            None => Ok(None),
        }
    }

    fn from_value(value: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        T::from_value(value, cx).map(Some)
    }
}

impl<T: Storable> Storable for Box<T> {
    fn type_info() -> TypeInfo {
        T::type_info()
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        (**self).to_value(cx)
    }

    fn from_value(value: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        T::from_value(value, cx).map(Box::new)
    }
}

//
// sequences
//

macro_rules! sequence_storable {
    ( $( $container:ident ),* $(,)? ) => {
        $(
            impl<T: Storable> Storable for $container<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::generic(
                        type_name::<Self>(),
                        vec![T::type_info()],
                        vec![Capability::Sequence],
                    )
                }

                fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
                    encode_sequence(self.len(), self.iter(), cx)
                }

                fn from_value(value: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
                    decode_sequence(value, cx)
                }
            }
        )*
    };
}

sequence_storable!(Vec, VecDeque, LinkedList);

//
// maps
//

impl<K: Storable + Ord, V: Storable> Storable for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::generic(
            type_name::<Self>(),
            vec![K::type_info(), V::type_info()],
            vec![Capability::Associative],
        )
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        encode_map(self.len(), self.iter(), cx)
    }

    fn from_value(value: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        decode_map(value, cx)
    }
}

impl<K, V, S> Storable for HashMap<K, V, S>
where
    K: Storable + Eq + Hash,
    V: Storable,
    S: BuildHasher + Default,
{
    fn type_info() -> TypeInfo {
        TypeInfo::generic(
            type_name::<Self>(),
            vec![K::type_info(), V::type_info()],
            vec![Capability::Associative],
        )
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        encode_map(self.len(), self.iter(), cx)
    }

    fn from_value(value: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        decode_map(value, cx)
    }
}

//
// generics with no storable shape
//

impl<T: Storable> Storable for BTreeSet<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::generic(type_name::<Self>(), vec![T::type_info()], Vec::new())
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        Err(unsupported_element::<Self>(cx))
    }

    fn from_value(_: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        Err(unsupported_element::<Self>(cx))
    }
}

impl<T: Storable, S> Storable for HashSet<T, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::generic(type_name::<Self>(), vec![T::type_info()], Vec::new())
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        Err(unsupported_element::<Self>(cx))
    }

    fn from_value(_: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        Err(unsupported_element::<Self>(cx))
    }
}

impl<A: Storable, B: Storable> Storable for (A, B) {
    fn type_info() -> TypeInfo {
        TypeInfo::generic(
            type_name::<Self>(),
            vec![A::type_info(), B::type_info()],
            Vec::new(),
        )
    }

    fn to_value(&self, cx: &mut Context<'_>) -> Result<Option<Value>, Error> {
        Err(unsupported_element::<Self>(cx))
    }

    fn from_value(_: Value, cx: &mut Context<'_>) -> Result<Self, Error> {
        Err(unsupported_element::<Self>(cx))
    }
}
