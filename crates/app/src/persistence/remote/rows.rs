//! Row model for the `cart_lines` table.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, postgres::PgRow};

use inkcart_core::{LineItem, Price, ProductId, SupplierId, VariantSelections};

use crate::uuids::TypedUuid;

use super::columns::VariantAxis;

/// Primary key of a `cart_lines` row.
pub(crate) type CartLineUuid = TypedUuid<CartLineRow>;

/// One stored cart line.
#[derive(Debug, Clone)]
pub(crate) struct CartLineRow {
    pub uuid: CartLineUuid,
    pub product_id: String,
    pub product_name: String,
    pub price: u64,
    pub quantity: u32,
    pub image: Option<String>,
    pub supplier_id: Option<String>,
    pub variants: VariantSelections,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLineRow {
    pub(crate) fn into_line_item(self) -> LineItem {
        LineItem {
            product_id: ProductId::new(self.product_id),
            name: self.product_name,
            unit_price: Price::new(self.price),
            quantity: self.quantity,
            image: self.image,
            supplier_id: self.supplier_id.map(SupplierId::new),
            variants: self.variants,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = try_get_amount(row, "price")?;

        let quantity_i32: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        // Non-empty option_* columns collapse back into variant selections;
        // NULL and empty both mean the axis was not selected.
        let mut variants = VariantSelections::new();

        for axis in VariantAxis::ALL {
            if let Some(value) = row.try_get::<Option<String>, _>(axis.column())? {
                variants.insert(axis.axis_name(), value);
            }
        }

        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            product_id: row.try_get("product_id")?,
            product_name: row.try_get("product_name")?,
            price,
            quantity,
            image: row.try_get("image")?,
            supplier_id: row.try_get("supplier_id")?,
            variants,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

pub(super) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
