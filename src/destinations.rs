use serde::Serialize;

/// Column limit for `destination_name`
pub const MAX_NAME_LENGTH: usize = 50;

/// Column limit for `destination_desc`
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Column limit for `image_url` and `website`
pub const MAX_URL_LENGTH: usize = 300;

/// Column limit for `zip`
pub const MAX_ZIP_LENGTH: usize = 35;

/// Column limit for `city`
pub const MAX_CITY_LENGTH: usize = 35;

/// Column limit for `line_1` and `line_2`
pub const MAX_LINE_LENGTH: usize = 95;

/// A point of interest with descriptive metadata and a postal address
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// Database-assigned id, immutable once persisted
    pub id: i32,

    /// Display name, unique across all destinations
    pub name: String,

    /// Long-form description
    pub description: String,

    /// Optional image to show with the destination
    pub image_url: Option<String>,

    /// Optional website of the destination
    pub website: Option<String>,

    /// Postal code
    pub zip: String,

    /// First address line
    pub line_1: String,

    /// Second address line, routinely empty
    pub line_2: String,

    /// City name
    pub city: String,
}
