use super::store::{SELECT_ORDER, Tx};
use crate::{
    Db,
    types::{DateTime, PurchaseOrder, PurchaseOrderId, PurchaseOrderRow, VendorId},
};
use vms_core::{
    lifecycle,
    models::{PurchaseOrderData, PurchaseOrderUpdate, QualityRating},
    ports::{OrderFailure, PurchaseOrderRepository},
};

type Outcome<Items> = Result<Result<PurchaseOrder<Items>, OrderFailure>, sqlx::Error>;

impl Db {
    async fn begin(&self) -> Result<Tx, sqlx::Error> {
        Ok(Tx(self.writer.begin().await?))
    }
}

impl<Items> PurchaseOrderRepository<Items> for Db
where
    Items: Send + Sync + Unpin + 'static + serde::Serialize + serde::de::DeserializeOwned,
{
    async fn create_order(
        &self,
        order_id: PurchaseOrderId,
        data: PurchaseOrderData<DateTime, VendorId, Items>,
        as_of: DateTime,
    ) -> Outcome<Items> {
        let mut tx = self.begin().await?;
        let outcome = lifecycle::place::<_, Items>(&mut tx, order_id, data, as_of).await?;
        tx.settle(&outcome).await?;
        Ok(outcome)
    }

    async fn get_order(
        &self,
        order_id: PurchaseOrderId,
    ) -> Result<Option<PurchaseOrder<Items>>, Self::Error> {
        sqlx::query_as::<_, PurchaseOrderRow<Items>>(&format!("{SELECT_ORDER} where id = $1"))
            .bind(order_id)
            .fetch_optional(&self.reader)
            .await?
            .map(PurchaseOrderRow::into_record)
            .transpose()
    }

    async fn list_orders(
        &self,
        vendor_id: Option<VendorId>,
    ) -> Result<Vec<PurchaseOrder<Items>>, Self::Error> {
        sqlx::query_as::<_, PurchaseOrderRow<Items>>(&format!(
            "{SELECT_ORDER} where ($1 is null or vendor_id = $1) order by created_at, rowid"
        ))
        .bind(vendor_id)
        .fetch_all(&self.reader)
        .await?
        .into_iter()
        .map(PurchaseOrderRow::into_record)
        .collect()
    }

    async fn update_order(
        &self,
        order_id: PurchaseOrderId,
        update: PurchaseOrderUpdate<DateTime, Items>,
        as_of: DateTime,
    ) -> Outcome<Items> {
        let mut tx = self.begin().await?;
        let outcome = lifecycle::edit::<_, Items>(&mut tx, order_id, update, as_of).await?;
        tx.settle(&outcome).await?;
        Ok(outcome)
    }

    async fn delete_order(&self, order_id: PurchaseOrderId, as_of: DateTime) -> Outcome<Items> {
        let mut tx = self.begin().await?;
        let outcome = lifecycle::remove::<_, Items>(&mut tx, order_id, as_of).await?;
        tx.settle(&outcome).await?;
        Ok(outcome)
    }

    async fn acknowledge_order(
        &self,
        order_id: PurchaseOrderId,
        as_of: DateTime,
    ) -> Outcome<Items> {
        let mut tx = self.begin().await?;
        let outcome = lifecycle::acknowledge::<_, Items>(&mut tx, order_id, as_of).await?;
        tx.settle(&outcome).await?;
        Ok(outcome)
    }

    async fn complete_order(&self, order_id: PurchaseOrderId, as_of: DateTime) -> Outcome<Items> {
        let mut tx = self.begin().await?;
        let outcome = lifecycle::complete::<_, Items>(&mut tx, order_id, as_of).await?;
        tx.settle(&outcome).await?;
        Ok(outcome)
    }

    async fn rate_order(
        &self,
        order_id: PurchaseOrderId,
        rating: QualityRating,
        as_of: DateTime,
    ) -> Outcome<Items> {
        let mut tx = self.begin().await?;
        let outcome = lifecycle::rate::<_, Items>(&mut tx, order_id, rating, as_of).await?;
        tx.settle(&outcome).await?;
        Ok(outcome)
    }
}
