//! Measurement-unit catalog.
//!
//! Values are stored in the base unit of their category. A display unit maps
//! between the caller's unit and that base with `internal = (v + offset) * factor`.
//! Each category lists its base unit first, so the first compatible unit of a
//! category never rescales.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

///
/// UnitCategory
///
/// Physical quantity a floating-point or point field measures.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum UnitCategory {
    Length,
    Area,
    Volume,
    Angle,
    Mass,
    Force,
    Temperature,
    Number,
}

impl UnitCategory {
    /// Display units of this category in catalog order.
    pub fn units(self) -> impl Iterator<Item = DisplayUnit> {
        ALL_DISPLAY_UNITS
            .into_iter()
            .filter(move |unit| unit.category() == self)
    }

    /// The unit values of this category are stored in.
    #[must_use]
    pub const fn base_unit(self) -> DisplayUnit {
        match self {
            Self::Length => DisplayUnit::Meters,
            Self::Area => DisplayUnit::SquareMeters,
            Self::Volume => DisplayUnit::CubicMeters,
            Self::Angle => DisplayUnit::Radians,
            Self::Mass => DisplayUnit::Kilograms,
            Self::Force => DisplayUnit::Newtons,
            Self::Temperature => DisplayUnit::Kelvin,
            Self::Number => DisplayUnit::General,
        }
    }
}

///
/// DisplayUnit
///
/// Concrete unit a value is presented in.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum DisplayUnit {
    Meters,
    Centimeters,
    Millimeters,
    Feet,
    Inches,
    SquareMeters,
    SquareFeet,
    CubicMeters,
    Liters,
    CubicFeet,
    Radians,
    Degrees,
    Kilograms,
    Pounds,
    Newtons,
    Kilonewtons,
    PoundsForce,
    Kelvin,
    Celsius,
    Fahrenheit,
    General,
}

/// Every display unit in catalog order.
pub const ALL_DISPLAY_UNITS: [DisplayUnit; 21] = [
    DisplayUnit::Meters,
    DisplayUnit::Centimeters,
    DisplayUnit::Millimeters,
    DisplayUnit::Feet,
    DisplayUnit::Inches,
    DisplayUnit::SquareMeters,
    DisplayUnit::SquareFeet,
    DisplayUnit::CubicMeters,
    DisplayUnit::Liters,
    DisplayUnit::CubicFeet,
    DisplayUnit::Radians,
    DisplayUnit::Degrees,
    DisplayUnit::Kilograms,
    DisplayUnit::Pounds,
    DisplayUnit::Newtons,
    DisplayUnit::Kilonewtons,
    DisplayUnit::PoundsForce,
    DisplayUnit::Kelvin,
    DisplayUnit::Celsius,
    DisplayUnit::Fahrenheit,
    DisplayUnit::General,
];

impl DisplayUnit {
    #[must_use]
    pub const fn category(self) -> UnitCategory {
        match self {
            Self::Meters | Self::Centimeters | Self::Millimeters | Self::Feet | Self::Inches => {
                UnitCategory::Length
            }
            Self::SquareMeters | Self::SquareFeet => UnitCategory::Area,
            Self::CubicMeters | Self::Liters | Self::CubicFeet => UnitCategory::Volume,
            Self::Radians | Self::Degrees => UnitCategory::Angle,
            Self::Kilograms | Self::Pounds => UnitCategory::Mass,
            Self::Newtons | Self::Kilonewtons | Self::PoundsForce => UnitCategory::Force,
            Self::Kelvin | Self::Celsius | Self::Fahrenheit => UnitCategory::Temperature,
            Self::General => UnitCategory::Number,
        }
    }

    const fn scale(self) -> (f64, f64) {
        // (factor, offset)
        match self {
            Self::Meters
            | Self::SquareMeters
            | Self::CubicMeters
            | Self::Radians
            | Self::Kilograms
            | Self::Newtons
            | Self::Kelvin
            | Self::General => (1.0, 0.0),
            Self::Centimeters => (0.01, 0.0),
            Self::Millimeters | Self::Liters => (0.001, 0.0),
            Self::Feet => (0.3048, 0.0),
            Self::Inches => (0.0254, 0.0),
            Self::SquareFeet => (0.092_903_04, 0.0),
            Self::CubicFeet => (0.028_316_846_592, 0.0),
            Self::Degrees => (PI / 180.0, 0.0),
            Self::Pounds => (0.453_592_37, 0.0),
            Self::Kilonewtons => (1000.0, 0.0),
            Self::PoundsForce => (4.448_221_615_260_5, 0.0),
            Self::Celsius => (1.0, 273.15),
            Self::Fahrenheit => (5.0 / 9.0, 459.67),
        }
    }

    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(
            self,
            Self::Meters
                | Self::SquareMeters
                | Self::CubicMeters
                | Self::Radians
                | Self::Kilograms
                | Self::Newtons
                | Self::Kelvin
                | Self::General
        )
    }

    /// Convert a value expressed in this unit into the category base unit.
    #[must_use]
    pub fn to_internal(self, value: f64) -> f64 {
        if self.is_base() {
            return value;
        }
        let (factor, offset) = self.scale();
        // adding a zero offset would turn -0.0 into +0.0
        if offset == 0.0 {
            return value * factor;
        }

        (value + offset) * factor
    }

    /// Convert a base-unit value into this unit.
    #[must_use]
    pub fn from_internal(self, value: f64) -> f64 {
        if self.is_base() {
            return value;
        }
        let (factor, offset) = self.scale();

        value / factor - offset
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn every_category_lists_its_base_unit_first() {
        for unit in ALL_DISPLAY_UNITS {
            let category = unit.category();
            let first = category.units().next().expect("category has units");

            assert_eq!(first, category.base_unit());
            assert!(first.is_base(), "{first}");
        }
    }

    #[test]
    fn base_units_do_not_rescale() {
        for value in [-0.0, 1.5, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(
                DisplayUnit::Meters.to_internal(value).to_bits(),
                value.to_bits()
            );
        }
    }

    #[test]
    fn linear_units_convert_both_ways() {
        assert!(close(DisplayUnit::Feet.to_internal(10.0), 3.048));
        assert!(close(DisplayUnit::Feet.from_internal(3.048), 10.0));
        assert!(close(DisplayUnit::Degrees.to_internal(180.0), PI));
    }

    #[test]
    fn offset_units_convert_both_ways() {
        assert!(close(DisplayUnit::Celsius.to_internal(0.0), 273.15));
        assert!(close(DisplayUnit::Fahrenheit.to_internal(32.0), 273.15));
        assert!(close(DisplayUnit::Fahrenheit.from_internal(373.15), 212.0));
    }

    #[test]
    fn categories_partition_the_catalog() {
        let total: usize = [
            UnitCategory::Length,
            UnitCategory::Area,
            UnitCategory::Volume,
            UnitCategory::Angle,
            UnitCategory::Mass,
            UnitCategory::Force,
            UnitCategory::Temperature,
            UnitCategory::Number,
        ]
        .into_iter()
        .map(|category| category.units().count())
        .sum();

        assert_eq!(total, ALL_DISPLAY_UNITS.len());
    }

    #[test]
    fn negative_zero_survives_scaled_units() {
        for unit in [DisplayUnit::Feet, DisplayUnit::Degrees, DisplayUnit::Meters] {
            let stored = unit.to_internal(-0.0);
            let shown = unit.from_internal(stored);

            assert!(stored.is_sign_negative(), "{unit}");
            assert!(shown.is_sign_negative(), "{unit}");
        }
    }
}
