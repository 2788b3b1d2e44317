use crate::{
    Db,
    types::{DateTime, Performance, PerformanceRow, Vendor, VendorId, VendorRow},
};
use vms_core::{models::VendorData, ports::VendorRepository};

const SELECT_VENDOR: &str = r#"
    select
        id,
        name,
        address,
        contact_details,
        on_time_delivery_rate,
        quality_rating_avg,
        average_response_time,
        fulfillment_rate,
        created_at,
        updated_at
    from
        vendor
"#;

impl VendorRepository for Db {
    async fn create_vendor(
        &self,
        vendor_id: VendorId,
        data: VendorData,
        as_of: DateTime,
    ) -> Result<Vendor, Self::Error> {
        let row = sqlx::query_as::<_, VendorRow>(
            r#"
            insert into
                vendor (id, name, address, contact_details, created_at, updated_at)
            values
                ($1, $2, $3, $4, $5, $5)
            returning
                id,
                name,
                address,
                contact_details,
                on_time_delivery_rate,
                quality_rating_avg,
                average_response_time,
                fulfillment_rate,
                created_at,
                updated_at
            "#,
        )
        .bind(vendor_id)
        .bind(data.name)
        .bind(data.address)
        .bind(data.contact_details)
        .bind(as_of)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn get_vendor(&self, vendor_id: VendorId) -> Result<Option<Vendor>, Self::Error> {
        let row = sqlx::query_as::<_, VendorRow>(&format!("{SELECT_VENDOR} where id = $1"))
            .bind(vendor_id)
            .fetch_optional(&self.reader)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>, Self::Error> {
        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            "{SELECT_VENDOR} order by created_at, rowid"
        ))
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_vendor(
        &self,
        vendor_id: VendorId,
        data: VendorData,
        as_of: DateTime,
    ) -> Result<Option<Vendor>, Self::Error> {
        // The metric columns are deliberately absent: only recalculation writes them.
        let row = sqlx::query_as::<_, VendorRow>(
            r#"
            update
                vendor
            set
                name = $2,
                address = $3,
                contact_details = $4,
                updated_at = $5
            where
                id = $1
            returning
                id,
                name,
                address,
                contact_details,
                on_time_delivery_rate,
                quality_rating_avg,
                average_response_time,
                fulfillment_rate,
                created_at,
                updated_at
            "#,
        )
        .bind(vendor_id)
        .bind(data.name)
        .bind(data.address)
        .bind(data.contact_details)
        .bind(as_of)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_vendor(&self, vendor_id: VendorId) -> Result<Option<Vendor>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let Some(row) = sqlx::query_as::<_, VendorRow>(&format!("{SELECT_VENDOR} where id = $1"))
            .bind(vendor_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        // The foreign keys cascade as well, but the dependents are removed
        // explicitly so the deletion does not rely on the connection pragma.
        sqlx::query("delete from performance_history where vendor_id = $1")
            .bind(vendor_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("delete from purchase_order where vendor_id = $1")
            .bind(vendor_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("delete from vendor where id = $1")
            .bind(vendor_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }

    async fn get_vendor_history(
        &self,
        vendor_id: VendorId,
    ) -> Result<Option<Vec<Performance>>, Self::Error> {
        let mut conn = self.reader.acquire().await?;

        let exists = sqlx::query_scalar::<_, i64>("select count(*) from vendor where id = $1")
            .bind(vendor_id)
            .fetch_one(&mut *conn)
            .await?
            > 0;
        if !exists {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, PerformanceRow>(
            r#"
            select
                id,
                vendor_id,
                date,
                on_time_delivery_rate,
                quality_rating_avg,
                average_response_time,
                fulfillment_rate
            from
                performance_history
            where
                vendor_id = $1
            order by
                date desc, rowid desc
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(Some(rows.into_iter().map(Into::into).collect()))
    }
}
