//! All things related to the storage of destinations

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::destinations::Destination;
use crate::destinations::MAX_CITY_LENGTH;
use crate::destinations::MAX_DESCRIPTION_LENGTH;
use crate::destinations::MAX_LINE_LENGTH;
use crate::destinations::MAX_NAME_LENGTH;
use crate::destinations::MAX_URL_LENGTH;
use crate::destinations::MAX_ZIP_LENGTH;

pub use memory::Memory;
pub use postgres::Postgres;

mod memory;
mod postgres;

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),

    /// No destination exists with the given id
    #[error("No destination with id {0}")]
    NotFound(i32),

    /// Another destination already uses the name
    #[error("Destination name `{0}` is already taken")]
    DuplicateName(String),

    /// A field value is longer than its column allows
    #[error("`{field}` is longer than {limit} characters")]
    TooLong {
        /// Column name of the rejected field
        field: &'static str,

        /// Column limit in characters
        limit: usize,
    },

    /// The destination name is empty
    #[error("Destination name must not be empty")]
    EmptyName,
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Destination
pub struct CreateDestinationValues<'a> {
    /// Display name, unique across all destinations
    pub name: &'a str,

    /// Long-form description
    pub description: &'a str,

    /// Optional image to show with the destination
    pub image_url: Option<&'a str>,

    /// Optional website of the destination
    pub website: Option<&'a str>,

    /// Postal code
    pub zip: &'a str,

    /// First address line
    pub line_1: &'a str,

    /// Second address line, routinely empty
    pub line_2: &'a str,

    /// City name
    pub city: &'a str,
}

impl CreateDestinationValues<'_> {
    /// Check all field values against the column limits
    ///
    /// # Errors
    ///
    /// Will return `Err` for an empty name or any over-limit field
    pub fn validate(&self) -> Result<()> {
        validate_fields(
            self.name,
            self.description,
            self.image_url,
            self.website,
            self.zip,
            self.line_1,
            self.line_2,
            self.city,
        )
    }
}

/// Minimal `(id, name)` projection for selection lists
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DestinationOption {
    /// Destination id
    pub id: i32,

    /// Destination name
    pub name: String,
}

/// Storage with all supported operations
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Create a destination
    ///
    /// Returns the persisted record, including the generated id
    async fn create_destination(&self, values: &CreateDestinationValues) -> Result<Destination>;

    /// Find a single destination by id
    ///
    /// A missing row is `Ok(None)`, not an error
    async fn find_destination_by_id(&self, id: i32) -> Result<Option<Destination>>;

    /// Update a single destination by id, writing all data columns
    ///
    /// Field limits are checked before the statement is issued
    async fn update_destination(&self, destination: &Destination) -> Result<Destination>;

    /// Delete a destination
    ///
    /// Takes the record by value: the caller's copy is consumed whether or
    /// not the delete succeeds
    async fn delete_destination(&self, destination: Destination) -> Result<()>;

    /// List all `(id, name)` pairs, ordered by name
    async fn list_options(&self) -> Result<Vec<DestinationOption>>;

    /// Bootstrap the destination table
    ///
    /// Errors when the table already exists
    async fn create_schema(&self) -> Result<()>;
}

/// Fetch the selection list, degrading to an empty one on failure
///
/// The error is logged instead of propagated, for callers that render a
/// selection list or nothing at all
pub async fn options_or_empty<S: Storage>(storage: &S) -> Vec<DestinationOption> {
    match storage.list_options().await {
        Ok(options) => options,
        Err(err) => {
            tracing::error!("Destination options query failed: {err}");
            Vec::new()
        }
    }
}

/// Check destination field values against the column limits
#[allow(clippy::too_many_arguments)]
pub(crate) fn validate_fields(
    name: &str,
    description: &str,
    image_url: Option<&str>,
    website: Option<&str>,
    zip: &str,
    line_1: &str,
    line_2: &str,
    city: &str,
) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    check_length("destination_name", name, MAX_NAME_LENGTH)?;
    check_length("destination_desc", description, MAX_DESCRIPTION_LENGTH)?;

    if let Some(image_url) = image_url {
        check_length("image_url", image_url, MAX_URL_LENGTH)?;
    }

    if let Some(website) = website {
        check_length("website", website, MAX_URL_LENGTH)?;
    }

    check_length("zip", zip, MAX_ZIP_LENGTH)?;
    check_length("line_1", line_1, MAX_LINE_LENGTH)?;
    check_length("line_2", line_2, MAX_LINE_LENGTH)?;
    check_length("city", city, MAX_CITY_LENGTH)
}

/// Check destination field values of an existing record
pub(crate) fn validate_destination(destination: &Destination) -> Result<()> {
    validate_fields(
        &destination.name,
        &destination.description,
        destination.image_url.as_deref(),
        destination.website.as_deref(),
        &destination.zip,
        &destination.line_1,
        &destination.line_2,
        &destination.city,
    )
}

/// Limits are in characters, matching the `VARCHAR(n)` columns
fn check_length(field: &'static str, value: &str, limit: usize) -> Result<()> {
    if value.chars().count() > limit {
        Err(Error::TooLong { field, limit })
    } else {
        Ok(())
    }
}
