//! Cart Lines Repository

use sqlx::{Postgres, Transaction, query, query_as};

use inkcart_core::{LineItem, SupplierId};

use crate::identity::UserUuid;

use super::{
    columns::VariantAxis,
    rows::{CartLineRow, CartLineUuid},
};

const GET_CART_LINES_SQL: &str = include_str!("sql/get_cart_lines.sql");
const INSERT_CART_LINE_SQL: &str = include_str!("sql/insert_cart_line.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("sql/delete_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLineRow>, sqlx::Error> {
        query_as::<Postgres, CartLineRow>(GET_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn insert_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: &LineItem,
    ) -> Result<(), sqlx::Error> {
        let price_i64 = i64::try_from(*item.unit_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let quantity_i32 = i32::try_from(item.quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        let mut insert = query(INSERT_CART_LINE_SQL)
            .bind(CartLineUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(item.product_id.as_str())
            .bind(&item.name)
            .bind(price_i64)
            .bind(quantity_i32)
            .bind(item.image.as_deref())
            .bind(item.supplier_id.as_ref().map(SupplierId::as_str));

        for axis in VariantAxis::ALL {
            insert = insert.bind(item.variants.get(axis.axis_name()));
        }

        insert.execute(&mut **tx).await?;

        Ok(())
    }

    pub(crate) async fn delete_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINES_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
