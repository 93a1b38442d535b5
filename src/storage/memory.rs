//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::destinations::Destination;

use super::CreateDestinationValues;
use super::DestinationOption;
use super::Error;
use super::Result;
use super::Storage;
use super::validate_destination;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All destinations in storage, with the id counter
    inner: Arc<Mutex<Inner>>,
}

/// Guarded state of the memory storage
#[derive(Debug, Default)]
struct Inner {
    /// Last assigned id, ids start at 1
    last_id: i32,

    /// All destinations in storage
    destinations: HashMap<i32, Destination>,
}

impl Memory {
    /// Create a new empty Memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for Memory {
    async fn create_destination(&self, values: &CreateDestinationValues) -> Result<Destination> {
        values.validate()?;

        let mut inner = self.inner.lock().await;

        if inner.destinations.values().any(|d| d.name == values.name) {
            return Err(Error::DuplicateName(values.name.to_string()));
        }

        inner.last_id += 1;

        let destination = Destination {
            id: inner.last_id,
            name: values.name.to_string(),
            description: values.description.to_string(),
            image_url: values.image_url.map(ToString::to_string),
            website: values.website.map(ToString::to_string),
            zip: values.zip.to_string(),
            line_1: values.line_1.to_string(),
            line_2: values.line_2.to_string(),
            city: values.city.to_string(),
        };

        inner
            .destinations
            .insert(destination.id, destination.clone());

        Ok(destination)
    }

    async fn find_destination_by_id(&self, id: i32) -> Result<Option<Destination>> {
        Ok(self.inner.lock().await.destinations.get(&id).cloned())
    }

    async fn update_destination(&self, destination: &Destination) -> Result<Destination> {
        validate_destination(destination)?;

        let mut inner = self.inner.lock().await;

        if !inner.destinations.contains_key(&destination.id) {
            return Err(Error::NotFound(destination.id));
        }

        if inner
            .destinations
            .values()
            .any(|d| d.name == destination.name && d.id != destination.id)
        {
            return Err(Error::DuplicateName(destination.name.clone()));
        }

        inner
            .destinations
            .insert(destination.id, destination.clone());

        Ok(destination.clone())
    }

    async fn delete_destination(&self, destination: Destination) -> Result<()> {
        self.inner
            .lock()
            .await
            .destinations
            .remove(&destination.id)
            .map(|_| ())
            .ok_or(Error::NotFound(destination.id))
    }

    async fn list_options(&self) -> Result<Vec<DestinationOption>> {
        let mut options = self
            .inner
            .lock()
            .await
            .destinations
            .values()
            .map(|destination| DestinationOption {
                id: destination.id,
                name: destination.name.clone(),
            })
            .collect::<Vec<DestinationOption>>();

        options.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(options)
    }

    async fn create_schema(&self) -> Result<()> {
        // nothing to bootstrap
        Ok(())
    }
}
