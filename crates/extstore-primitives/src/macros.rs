#[macro_export]
macro_rules! value_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Bool, Bool, label = "bool", is_keyable = true, needs_units = false),
            (Byte, Integer, label = "byte", is_keyable = true, needs_units = false),
            (Int16, Integer, label = "int16", is_keyable = true, needs_units = false),
            (Int32, Integer, label = "int32", is_keyable = true, needs_units = false),
            (Float32, Float, label = "float32", is_keyable = false, needs_units = true),
            (Float64, Float, label = "float64", is_keyable = false, needs_units = true),
            (Text, Text, label = "text", is_keyable = true, needs_units = false),
            (Guid, Identifier, label = "guid", is_keyable = true, needs_units = false),
            (ElementId, Identifier, label = "element_id", is_keyable = true, needs_units = false),
            (Xyz, Point, label = "xyz", is_keyable = false, needs_units = true),
            (Uv, Point, label = "uv", is_keyable = false, needs_units = true),
            (Entity, Record, label = "entity", is_keyable = false, needs_units = false),
        }
    };
}

#[macro_export]
macro_rules! value_kind_registry {
    ($macro:ident) => {
        $crate::value_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::value_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($variant:ident, $family:ident, label = $label:expr, is_keyable = $is_keyable:expr, needs_units = $needs_units:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ValueKind::$variant => $crate::ValueKindMetadata {
                    family: $crate::ValueFamily::$family,
                    label: $label,
                    is_keyable: $is_keyable,
                    needs_units: $needs_units,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($variant:ident, $family:ident, label = $label:expr, is_keyable = $is_keyable:expr, needs_units = $needs_units:expr) ),* $(,)? ) => {
        [ $( $crate::ValueKind::$variant ),* ]
    };
}
