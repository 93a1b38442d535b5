//! Postgres storage

use std::time::Duration;

use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Row;
use sqlx::postgres::PgPoolOptions;
use sqlx::postgres::PgRow;

use crate::destinations::Destination;

use super::CreateDestinationValues;
use super::DestinationOption;
use super::Error;
use super::Result;
use super::Storage;
use super::validate_destination;

/// Columns of the destination table, in persisted order
const DESTINATION_COLUMNS: &str = "destination_id, destination_name, destination_desc, \
     image_url, website, zip, line_1, line_2, city";

/// Bootstrap statement for the destination table
const CREATE_DESTINATION_TABLE: &str = r"
    CREATE TABLE destination (
        destination_id int GENERATED ALWAYS AS IDENTITY,
        destination_name varchar(50) NOT NULL UNIQUE,
        destination_desc varchar(5000) NOT NULL,
        image_url varchar(300),
        website varchar(300),
        zip varchar(35) NOT NULL,
        line_1 varchar(95) NOT NULL,
        line_2 varchar(95) NOT NULL,
        city varchar(35) NOT NULL,
        PRIMARY KEY (destination_id)
    )
    ";

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Uses the `DATABASE_URL` environment variable
    ///
    /// # Errors
    ///
    /// Will return `Err` when `DATABASE_URL` is missing or no connection can
    /// be made
    pub async fn connect() -> Result<Self> {
        let database_connection_string = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Connection("DATABASE_URL is not set".to_string()))?;

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_connection_string)
            .await
            .map_err(connection_error)?;

        Ok(Self::connect_with(connection_pool))
    }

    /// Create Postgres storage with an existing pool
    #[must_use]
    pub fn connect_with(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }
}

impl FromRow<'_, PgRow> for Destination {
    fn from_row(row: &PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("destination_id")?,
            name: row.try_get("destination_name")?,
            description: row.try_get("destination_desc")?,
            image_url: row.try_get("image_url")?,
            website: row.try_get("website")?,
            zip: row.try_get("zip")?,
            line_1: row.try_get("line_1")?,
            line_2: row.try_get("line_2")?,
            city: row.try_get("city")?,
        })
    }
}

impl FromRow<'_, PgRow> for DestinationOption {
    fn from_row(row: &PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("destination_id")?,
            name: row.try_get("destination_name")?,
        })
    }
}

#[async_trait]
impl Storage for Postgres {
    async fn create_destination(&self, values: &CreateDestinationValues) -> Result<Destination> {
        values.validate()?;

        let destination = sqlx::query_as::<_, Destination>(&format!(
            r"
            INSERT INTO destination
                (destination_name, destination_desc, image_url, website, zip, line_1, line_2, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {DESTINATION_COLUMNS}
            ",
        ))
        .bind(values.name)
        .bind(values.description)
        .bind(values.image_url)
        .bind(values.website)
        .bind(values.zip)
        .bind(values.line_1)
        .bind(values.line_2)
        .bind(values.city)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(|err| execution_error(err, values.name))?;

        Ok(destination)
    }

    async fn find_destination_by_id(&self, id: i32) -> Result<Option<Destination>> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            r"
            SELECT {DESTINATION_COLUMNS}
            FROM destination
            WHERE destination_id = $1
            LIMIT 1
            ",
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(destination)
    }

    async fn update_destination(&self, destination: &Destination) -> Result<Destination> {
        validate_destination(destination)?;

        let updated_destination = sqlx::query_as::<_, Destination>(&format!(
            r"
            UPDATE destination
            SET destination_name = $2, destination_desc = $3, image_url = $4, website = $5,
                zip = $6, line_1 = $7, line_2 = $8, city = $9
            WHERE destination_id = $1
            RETURNING {DESTINATION_COLUMNS}
            ",
        ))
        .bind(destination.id)
        .bind(&destination.name)
        .bind(&destination.description)
        .bind(destination.image_url.as_deref())
        .bind(destination.website.as_deref())
        .bind(&destination.zip)
        .bind(&destination.line_1)
        .bind(&destination.line_2)
        .bind(&destination.city)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(|err| execution_error(err, &destination.name))?;

        updated_destination.ok_or(Error::NotFound(destination.id))
    }

    async fn delete_destination(&self, destination: Destination) -> Result<()> {
        let result = sqlx::query(
            r"
            DELETE FROM destination
            WHERE destination_id = $1
            ",
        )
        .bind(destination.id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(destination.id));
        }

        Ok(())
    }

    async fn list_options(&self) -> Result<Vec<DestinationOption>> {
        let options = sqlx::query_as::<_, DestinationOption>(
            r"
            SELECT destination_id, destination_name
            FROM destination
            ORDER BY destination_name
            ",
        )
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(options)
    }

    async fn create_schema(&self) -> Result<()> {
        tracing::debug!("Creating destination table");

        sqlx::query(CREATE_DESTINATION_TABLE)
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(())
    }
}

/// Convert `SQLx` to storage connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}

/// Convert a write failure, surfacing a name collision as its own kind
fn execution_error(err: sqlx::Error, name: &str) -> Error {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            Error::DuplicateName(name.to_string())
        }
        err => connection_error(err),
    }
}
