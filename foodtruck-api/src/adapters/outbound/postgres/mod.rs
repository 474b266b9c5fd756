//! PostgreSQL implementation of the VendorStore port.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{
    models::{Coordinate, GeoPredicate, Position, Vendor, VendorId, VendorQuery},
    ports::outbound::{VendorStore, VendorStoreError},
};

/// Schema migrations for the `vendors` table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct PgVendorStore {
    pool: PgPool,
}

impl PgVendorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), VendorStoreError> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| VendorStoreError::Database(e.to_string()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VendorRow {
    id: String,
    applicant: String,
    facilitytype: String,
    fooditems: String,
    status: String,
    address: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        Self {
            id: VendorId::from(row.id),
            applicant: row.applicant,
            facilitytype: row.facilitytype,
            fooditems: row.fooditems,
            status: row.status,
            address: row.address,
            loc: Position::new(row.longitude, row.latitude),
            distance: None,
        }
    }
}

#[async_trait]
impl VendorStore for PgVendorStore {
    async fn find(&self, query: &VendorQuery, limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let facility_type = query.facility_type.as_deref();
        let status = query.status.as_deref();

        let rows = match query.predicate {
            GeoPredicate::WithinBox { corners } => {
                let (a, b) = (Coordinate::from(corners[0]), Coordinate::from(corners[1]));
                sqlx::query_as::<_, VendorRow>(
                    "SELECT id, applicant, facilitytype, fooditems, status, address, \
                            latitude, longitude \
                     FROM vendors \
                     WHERE latitude BETWEEN LEAST($1, $2) AND GREATEST($1, $2) \
                       AND longitude BETWEEN LEAST($3, $4) AND GREATEST($3, $4) \
                       AND ($5::text IS NULL OR facilitytype = $5) \
                       AND ($6::text IS NULL OR status = $6) \
                     ORDER BY id \
                     LIMIT $7",
                )
                .bind(a.latitude)
                .bind(b.latitude)
                .bind(a.longitude)
                .bind(b.longitude)
                .bind(facility_type)
                .bind(status)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            GeoPredicate::WithinSphere {
                center,
                radius_radians,
            } => {
                sqlx::query_as::<_, VendorRow>(
                    "SELECT id, applicant, facilitytype, fooditems, status, address, \
                            latitude, longitude \
                     FROM vendors \
                     WHERE 2 * asin(least(1.0, sqrt( \
                               power(sin(radians(latitude - $1) / 2), 2) \
                               + cos(radians($1)) * cos(radians(latitude)) \
                                 * power(sin(radians(longitude - $2) / 2), 2)))) <= $3 \
                       AND ($4::text IS NULL OR facilitytype = $4) \
                       AND ($5::text IS NULL OR status = $5) \
                     ORDER BY id \
                     LIMIT $6",
                )
                .bind(center.latitude)
                .bind(center.longitude)
                .bind(radius_radians)
                .bind(facility_type)
                .bind(status)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            GeoPredicate::Near {
                center,
                max_distance_degrees,
            } => {
                sqlx::query_as::<_, VendorRow>(
                    "SELECT id, applicant, facilitytype, fooditems, status, address, \
                            latitude, longitude \
                     FROM vendors \
                     WHERE sqrt(power(latitude - $1, 2) + power(longitude - $2, 2)) <= $3 \
                       AND ($4::text IS NULL OR facilitytype = $4) \
                       AND ($5::text IS NULL OR status = $5) \
                     ORDER BY sqrt(power(latitude - $1, 2) + power(longitude - $2, 2)) ASC, id \
                     LIMIT $6",
                )
                .bind(center.latitude)
                .bind(center.longitude)
                .bind(max_distance_degrees)
                .bind(facility_type)
                .bind(status)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        tracing::debug!(rows = rows.len(), "vendor query returned");
        Ok(rows.into_iter().map(Vendor::from).collect())
    }

    async fn text_search(&self, name: &str, limit: usize) -> Result<Vec<Vendor>, VendorStoreError> {
        let rows = sqlx::query_as::<_, VendorRow>(
            "SELECT id, applicant, facilitytype, fooditems, status, address, latitude, longitude \
             FROM vendors \
             WHERE to_tsvector('english', applicant || ' ' || fooditems) \
                   @@ websearch_to_tsquery('english', $1) \
             ORDER BY ts_rank_cd(to_tsvector('english', applicant || ' ' || fooditems), \
                                 websearch_to_tsquery('english', $1)) DESC, id \
             LIMIT $2",
        )
        .bind(name)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Vendor::from).collect())
    }
}
