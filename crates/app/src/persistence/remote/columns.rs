//! Fixed variant-axis column set of the remote schema.

use inkcart_core::Cart;

use super::CartPersistenceError;

/// Variant axes the `cart_lines` schema can store, one nullable column each.
///
/// This enumerated set is the compatibility-sensitive storage contract: an
/// axis outside it cannot round-trip through the remote backend and is
/// rejected before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantAxis {
    Color,
    Size,
    Format,
    Quantity,
    Bat,
    Poids,
    Echantillon,
    TypesImpression,
    TypeDeMateriaux,
    DetailsImpression,
    OrientationImpression,
}

impl VariantAxis {
    /// Every storable axis, in column order.
    pub const ALL: [Self; 11] = [
        Self::Color,
        Self::Size,
        Self::Format,
        Self::Quantity,
        Self::Bat,
        Self::Poids,
        Self::Echantillon,
        Self::TypesImpression,
        Self::TypeDeMateriaux,
        Self::DetailsImpression,
        Self::OrientationImpression,
    ];

    /// Axis name as it appears in variant selections.
    #[must_use]
    pub fn axis_name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Size => "size",
            Self::Format => "format",
            Self::Quantity => "quantity",
            Self::Bat => "bat",
            Self::Poids => "poids",
            Self::Echantillon => "echantillon",
            Self::TypesImpression => "types_impression",
            Self::TypeDeMateriaux => "type_de_materiaux",
            Self::DetailsImpression => "details_impression",
            Self::OrientationImpression => "orientation_impression",
        }
    }

    /// Column name in `cart_lines`.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Color => "option_color",
            Self::Size => "option_size",
            Self::Format => "option_format",
            Self::Quantity => "option_quantity",
            Self::Bat => "option_bat",
            Self::Poids => "option_poids",
            Self::Echantillon => "option_echantillon",
            Self::TypesImpression => "option_types_impression",
            Self::TypeDeMateriaux => "option_type_de_materiaux",
            Self::DetailsImpression => "option_details_impression",
            Self::OrientationImpression => "option_orientation_impression",
        }
    }

    /// The axis with the given selection name, if it is storable.
    #[must_use]
    pub fn from_axis_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.axis_name() == name)
    }
}

/// Rejects carts holding a variant axis the schema has no column for.
pub(super) fn ensure_representable(cart: &Cart) -> Result<(), CartPersistenceError> {
    for item in cart.items() {
        for (axis, _) in item.variants.iter() {
            if VariantAxis::from_axis_name(axis).is_none() {
                return Err(CartPersistenceError::UnsupportedAxis {
                    axis: axis.to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use inkcart_core::{LineItem, Price, ProductId, VariantSelections};

    use super::*;

    #[test]
    fn axis_names_round_trip() {
        for axis in VariantAxis::ALL {
            assert_eq!(
                VariantAxis::from_axis_name(axis.axis_name()),
                Some(axis),
                "axis {axis:?} should resolve from its own name"
            );
        }
    }

    #[test]
    fn unknown_axis_does_not_resolve() {
        assert_eq!(VariantAxis::from_axis_name("finish"), None);
    }

    #[test]
    fn columns_carry_the_option_prefix() {
        for axis in VariantAxis::ALL {
            assert_eq!(axis.column(), format!("option_{}", axis.axis_name()));
        }
    }

    #[test]
    fn ensure_representable_rejects_unknown_axes() {
        let cart = Cart::from_items([LineItem {
            product_id: ProductId::new("poster"),
            name: "Poster".to_string(),
            unit_price: Price::new(1000),
            quantity: 1,
            image: None,
            supplier_id: None,
            variants: VariantSelections::new().with("finish", "matte"),
        }]);

        let result = ensure_representable(&cart);

        assert!(
            matches!(result, Err(CartPersistenceError::UnsupportedAxis { ref axis }) if axis == "finish"),
            "expected UnsupportedAxis, got {result:?}"
        );
    }

    #[test]
    fn ensure_representable_accepts_storable_axes() {
        let cart = Cart::from_items([LineItem {
            product_id: ProductId::new("poster"),
            name: "Poster".to_string(),
            unit_price: Price::new(1000),
            quantity: 1,
            image: None,
            supplier_id: None,
            variants: VariantSelections::new()
                .with("color", "red")
                .with("types_impression", "recto"),
        }]);

        assert!(ensure_representable(&cart).is_ok());
    }
}
