//! The transaction-scoped store the lifecycle controller runs against.

use crate::types::{
    DateTime, MetricsRow, PerformanceId, PurchaseOrder, PurchaseOrderId, PurchaseOrderRow,
    VendorId,
};
use sqlx::{Sqlite, Transaction};
use vms_core::{
    models::VendorMetrics,
    ports::{OrderStore, Repository},
};

/// An open transaction on the writer pool.
pub(crate) struct Tx(pub Transaction<'static, Sqlite>);

impl Tx {
    /// Commit the transaction if the operation was accepted, otherwise roll it back.
    pub async fn settle<T, F: std::fmt::Display>(
        self,
        outcome: &Result<T, F>,
    ) -> Result<(), sqlx::Error> {
        match outcome {
            Ok(_) => self.0.commit().await,
            Err(failure) => {
                tracing::debug!(%failure, "rolling back rejected operation");
                self.0.rollback().await
            }
        }
    }
}

impl Repository for Tx {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type VendorId = VendorId;
    type PurchaseOrderId = PurchaseOrderId;
    type PerformanceId = PerformanceId;
}

pub(crate) const SELECT_ORDER: &str = r#"
    select
        id,
        vendor_id,
        order_date,
        issue_date,
        delivery_date,
        acknowledgment_date,
        json(items) as items,
        quantity,
        status,
        quality_rating,
        created_at,
        updated_at
    from
        purchase_order
"#;

impl<Items> OrderStore<Items> for Tx
where
    Items: Send + Sync + Unpin + 'static + serde::Serialize + serde::de::DeserializeOwned,
{
    async fn fetch_order(
        &mut self,
        order_id: PurchaseOrderId,
    ) -> Result<Option<PurchaseOrder<Items>>, Self::Error> {
        sqlx::query_as::<_, PurchaseOrderRow<Items>>(&format!("{SELECT_ORDER} where id = $1"))
            .bind(order_id)
            .fetch_optional(&mut *self.0)
            .await?
            .map(PurchaseOrderRow::into_record)
            .transpose()
    }

    async fn fetch_vendor_orders(
        &mut self,
        vendor_id: VendorId,
    ) -> Result<Vec<PurchaseOrder<Items>>, Self::Error> {
        sqlx::query_as::<_, PurchaseOrderRow<Items>>(&format!(
            "{SELECT_ORDER} where vendor_id = $1 order by created_at, rowid"
        ))
        .bind(vendor_id)
        .fetch_all(&mut *self.0)
        .await?
        .into_iter()
        .map(PurchaseOrderRow::into_record)
        .collect()
    }

    async fn insert_order(&mut self, order: &PurchaseOrder<Items>) -> Result<(), Self::Error> {
        sqlx::query(
            r#"
            insert into
                purchase_order (
                    id,
                    vendor_id,
                    order_date,
                    issue_date,
                    delivery_date,
                    acknowledgment_date,
                    items,
                    quantity,
                    status,
                    quality_rating,
                    created_at,
                    updated_at
                )
            values
                ($1, $2, $3, $4, $5, $6, jsonb($7), $8, $9, $10, $11, $12)
            "#,
        )
        .bind(order.id)
        .bind(order.vendor_id)
        .bind(order.order_date)
        .bind(order.issue_date)
        .bind(order.delivery_date)
        .bind(order.acknowledgment_date)
        .bind(sqlx::types::Json(&order.items))
        .bind(order.quantity)
        .bind(order.status.as_str())
        .bind(order.quality_rating.map(|rating| rating.value()))
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *self.0)
        .await?;

        Ok(())
    }

    async fn save_order(&mut self, order: &PurchaseOrder<Items>) -> Result<(), Self::Error> {
        sqlx::query(
            r#"
            update
                purchase_order
            set
                order_date = $2,
                issue_date = $3,
                delivery_date = $4,
                acknowledgment_date = $5,
                items = jsonb($6),
                quantity = $7,
                status = $8,
                quality_rating = $9,
                updated_at = $10
            where
                id = $1
            "#,
        )
        .bind(order.id)
        .bind(order.order_date)
        .bind(order.issue_date)
        .bind(order.delivery_date)
        .bind(order.acknowledgment_date)
        .bind(sqlx::types::Json(&order.items))
        .bind(order.quantity)
        .bind(order.status.as_str())
        .bind(order.quality_rating.map(|rating| rating.value()))
        .bind(order.updated_at)
        .execute(&mut *self.0)
        .await?;

        Ok(())
    }

    async fn remove_order(&mut self, order_id: PurchaseOrderId) -> Result<(), Self::Error> {
        sqlx::query("delete from purchase_order where id = $1")
            .bind(order_id)
            .execute(&mut *self.0)
            .await?;

        Ok(())
    }

    async fn fetch_vendor_metrics(
        &mut self,
        vendor_id: VendorId,
    ) -> Result<Option<VendorMetrics>, Self::Error> {
        let row = sqlx::query_as::<_, MetricsRow>(
            r#"
            select
                on_time_delivery_rate,
                quality_rating_avg,
                average_response_time,
                fulfillment_rate
            from
                vendor
            where
                id = $1
            "#,
        )
        .bind(vendor_id)
        .fetch_optional(&mut *self.0)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn save_vendor_metrics(
        &mut self,
        vendor_id: VendorId,
        metrics: VendorMetrics,
        as_of: DateTime,
    ) -> Result<(), Self::Error> {
        sqlx::query(
            r#"
            update
                vendor
            set
                on_time_delivery_rate = $2,
                quality_rating_avg = $3,
                average_response_time = $4,
                fulfillment_rate = $5,
                updated_at = $6
            where
                id = $1
            "#,
        )
        .bind(vendor_id)
        .bind(metrics.on_time_delivery_rate)
        .bind(metrics.quality_rating_avg)
        .bind(metrics.average_response_time)
        .bind(metrics.fulfillment_rate)
        .bind(as_of)
        .execute(&mut *self.0)
        .await?;

        Ok(())
    }

    async fn append_history(
        &mut self,
        vendor_id: VendorId,
        metrics: VendorMetrics,
        as_of: DateTime,
    ) -> Result<(), Self::Error> {
        sqlx::query(
            r#"
            insert into
                performance_history (
                    id,
                    vendor_id,
                    date,
                    on_time_delivery_rate,
                    quality_rating_avg,
                    average_response_time,
                    fulfillment_rate
                )
            values
                ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(PerformanceId::new_v4())
        .bind(vendor_id)
        .bind(as_of)
        .bind(metrics.on_time_delivery_rate)
        .bind(metrics.quality_rating_avg)
        .bind(metrics.average_response_time)
        .bind(metrics.fulfillment_rate)
        .execute(&mut *self.0)
        .await?;

        Ok(())
    }
}
