use mongodb::bson::Bson;
use serde::Deserialize;

/// A subgraph event as stored in the events collection.
///
/// The sync service writes every field as a string, but older documents hold
/// numbers, so fields are kept as raw BSON and only interpreted when printed.
/// A field of an unexpected type never makes the whole document unreadable.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRecord {
    pub id: Option<Bson>,
    #[serde(rename = "type")]
    pub event_type: Option<Bson>,
    pub assets: Option<Bson>,
    pub block_timestamp: Option<Bson>,
    pub controller: Option<Bson>,
    pub owner: Option<Bson>,
    pub request_id: Option<Bson>,
    pub sender: Option<Bson>,
}
