//! Store primitive registry shared by the runtime and the derive layer.
//!
//! Every primitive the record store can persist appears exactly once in
//! `value_kind_registry_entries!`; metadata lookups and the `ALL_VALUE_KINDS`
//! table are expanded from that single list.

#[macro_use]
mod macros;

use derive_more::Display;
use std::{fmt, str::FromStr};

///
/// ValueKind
///
/// Canonical tag for one store primitive.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueKind {
    Bool,
    Byte,
    Int16,
    Int32,
    Float32,
    Float64,
    Text,
    Guid,
    ElementId,
    Xyz,
    Uv,
    Entity,
}

impl ValueKind {
    /// Return the full metadata descriptor for one value kind.
    #[must_use]
    pub const fn metadata(self) -> ValueKindMetadata {
        value_kind_registry!(metadata_from_registry, self)
    }

    #[must_use]
    pub const fn family(self) -> ValueFamily {
        self.metadata().family
    }

    /// Stable lowercase label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Return whether this kind may key an associative field.
    #[must_use]
    pub const fn is_keyable(self) -> bool {
        self.metadata().is_keyable
    }

    /// Return whether fields of this kind carry a measurement-unit category.
    #[must_use]
    pub const fn needs_units(self) -> bool {
        self.metadata().needs_units
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValueKind {
    type Err = UnknownValueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_VALUE_KINDS
            .iter()
            .copied()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| UnknownValueKind(s.to_string()))
    }
}

///
/// UnknownValueKind
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("unknown value kind '{_0}'")]
pub struct UnknownValueKind(pub String);

impl std::error::Error for UnknownValueKind {}

///
/// ValueKindMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ValueKindMetadata {
    pub family: ValueFamily,
    pub label: &'static str,
    pub is_keyable: bool,
    pub needs_units: bool,
}

///
/// ValueFamily
///
/// Coarse grouping of value kinds.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ValueFamily {
    Bool,
    Integer,
    Float,
    Text,
    Identifier,
    Point,
    Record,
}

/// Ordered list of all value kinds in registry order.
pub const ALL_VALUE_KINDS: [ValueKind; 12] = value_kind_registry!(all_kinds_from_registry);

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_every_kind_once() {
        let mut seen = ALL_VALUE_KINDS.to_vec();
        seen.sort();
        seen.dedup();

        assert_eq!(seen.len(), ALL_VALUE_KINDS.len());
    }

    #[test]
    fn keyable_kinds_match_store_key_rules() {
        let keyable: Vec<_> = ALL_VALUE_KINDS
            .iter()
            .copied()
            .filter(|kind| kind.is_keyable())
            .collect();

        assert_eq!(
            keyable,
            vec![
                ValueKind::Bool,
                ValueKind::Byte,
                ValueKind::Int16,
                ValueKind::Int32,
                ValueKind::Text,
                ValueKind::Guid,
                ValueKind::ElementId,
            ]
        );
    }

    #[test]
    fn only_measurable_kinds_need_units() {
        for kind in ALL_VALUE_KINDS {
            let expected = matches!(
                kind.family(),
                ValueFamily::Float | ValueFamily::Point
            );
            assert_eq!(kind.needs_units(), expected, "{kind}");
        }
    }

    #[test]
    fn labels_parse_back() {
        for kind in ALL_VALUE_KINDS {
            assert_eq!(kind.label().parse::<ValueKind>(), Ok(kind));
        }
        assert!("decimal".parse::<ValueKind>().is_err());
    }
}
