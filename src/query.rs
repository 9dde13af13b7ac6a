use crate::config::MongoConfig;
use crate::event::EventRecord;
use eyre::{Context, Result};
use log::{debug, info};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::time::Duration;

const APP_NAME: &str = "latest-events";

pub trait EventStore {
    /// At most `count` events of `event_type`, newest `blockTimestamp` first.
    async fn latest_events(&self, event_type: &str, count: u32) -> Result<Vec<EventRecord>>;
}

pub struct MongoEventStore {
    collection: Collection<EventRecord>,
}
impl MongoEventStore {
    pub async fn try_new(config: &MongoConfig, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .wrap_err("Failed to parse MongoDB connection string")?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).wrap_err("Failed to create MongoDB client")?;
        let collection = client
            .database(&config.db_name)
            .collection::<EventRecord>(&config.collection_name);
        info!("Using collection {}", collection.namespace());

        Ok(Self { collection })
    }
}

impl EventStore for MongoEventStore {
    async fn latest_events(&self, event_type: &str, count: u32) -> Result<Vec<EventRecord>> {
        let mut cursor = self
            .collection
            .find(doc! { "type": event_type })
            .sort(doc! { "blockTimestamp": -1 })
            .limit(i64::from(count))
            .await
            .wrap_err_with(|| {
                format!(
                    "Failed to query '{}' events from {}",
                    event_type,
                    self.collection.namespace()
                )
            })?;

        let mut events = Vec::new();
        while cursor.advance().await? {
            events.push(cursor.deserialize_current()?);
        }
        debug!("Fetched {} '{}' events", events.len(), event_type);

        Ok(events)
    }
}
