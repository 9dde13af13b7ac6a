mod format;

use crate::event::EventRecord;
use crate::query::EventStore;
use eyre::Result;
use format::{format_assets, format_raw, format_timestamp};
use log::info;
use std::io::Write;

const SEPARATOR: &str = "-------------------------------";

/// Prints the latest `count` events of `event_type`, newest first, and returns
/// how many were printed.
pub async fn start<S: EventStore>(
    store: &S,
    event_type: &str,
    count: u32,
    decimals: u32,
    out: &mut impl Write,
) -> Result<usize> {
    let events = store.latest_events(event_type, count).await?;

    if events.is_empty() {
        writeln!(out, "No events of type '{}' found.", event_type)?;
        return Ok(0);
    }

    info!("Printing {} '{}' events", events.len(), event_type);
    for event in &events {
        write_event(out, event, decimals)?;
    }
    out.flush()?;

    Ok(events.len())
}

fn write_event(out: &mut impl Write, event: &EventRecord, decimals: u32) -> std::io::Result<()> {
    let timestamp = event.block_timestamp.as_ref();

    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "ID         : {}", format_raw(event.id.as_ref()))?;
    writeln!(
        out,
        "Assets     : {}",
        format_assets(event.assets.as_ref(), decimals)
    )?;
    writeln!(
        out,
        "Timestamp  : {} ({})",
        format_raw(timestamp),
        format_timestamp(timestamp)
    )?;
    writeln!(out, "Controller : {}", format_raw(event.controller.as_ref()))?;
    writeln!(out, "Owner      : {}", format_raw(event.owner.as_ref()))?;
    writeln!(out, "Request ID : {}", format_raw(event.request_id.as_ref()))?;
    writeln!(out, "Sender     : {}", format_raw(event.sender.as_ref()))?;
    writeln!(out, "{SEPARATOR}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;
    use std::cmp::Reverse;

    /// Filters, sorts and limits like the MongoDB query does.
    struct MemoryStore(Vec<EventRecord>);
    impl EventStore for MemoryStore {
        async fn latest_events(&self, event_type: &str, count: u32) -> Result<Vec<EventRecord>> {
            let mut events: Vec<EventRecord> = self
                .0
                .iter()
                .filter(|e| e.event_type.as_ref().and_then(Bson::as_str) == Some(event_type))
                .cloned()
                .collect();
            events.sort_by_key(|e| Reverse(e.block_timestamp.as_ref().and_then(Bson::as_i64)));
            events.truncate(count as usize);
            Ok(events)
        }
    }

    fn string(value: &str) -> Option<Bson> {
        Some(Bson::String(value.to_string()))
    }

    fn deposit(id: &str, block_timestamp: i64) -> EventRecord {
        EventRecord {
            id: string(id),
            event_type: string("depositRequest"),
            assets: string("1000000"),
            block_timestamp: Some(Bson::Int64(block_timestamp)),
            controller: string("0xc0"),
            owner: string("0x0e"),
            request_id: string("1"),
            sender: string("0x5e"),
        }
    }

    async fn render(
        store: &MemoryStore,
        event_type: &str,
        count: u32,
        decimals: u32,
    ) -> (usize, String) {
        let mut out = Vec::new();
        let printed = start(store, event_type, count, decimals, &mut out)
            .await
            .unwrap();
        (printed, String::from_utf8(out).unwrap())
    }

    fn printed_ids(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter_map(|line| line.strip_prefix("ID         : "))
            .collect()
    }

    #[tokio::test]
    async fn test_full_event_block() {
        let store = MemoryStore(vec![deposit("0xabc-1", 1_700_000_000)]);

        let (printed, output) = render(&store, "depositRequest", 5, 6).await;

        assert_eq!(printed, 1);
        assert_eq!(
            output,
            "-------------------------------\n\
             ID         : 0xabc-1\n\
             Assets     : 1.000000\n\
             Timestamp  : 1700000000 (2023-11-14 22:13:20)\n\
             Controller : 0xc0\n\
             Owner      : 0x0e\n\
             Request ID : 1\n\
             Sender     : 0x5e\n\
             -------------------------------\n"
        );
    }

    #[tokio::test]
    async fn test_newest_first_and_capped() {
        let store = MemoryStore(vec![
            deposit("a", 1_700_000_100),
            deposit("b", 1_700_000_300),
            deposit("c", 1_700_000_200),
            EventRecord {
                event_type: string("redeemRequest"),
                ..deposit("redeem", 1_700_000_400)
            },
            deposit("d", 1_700_000_000),
        ]);

        let (printed, output) = render(&store, "depositRequest", 3, 6).await;

        assert_eq!(printed, 3);
        assert_eq!(printed_ids(&output), vec!["b", "c", "a"]);
        assert_eq!(output.matches(SEPARATOR).count(), 6);

        let (printed, output) = render(&store, "depositRequest", 10, 6).await;
        assert_eq!(printed, 4);
        assert_eq!(printed_ids(&output), vec!["b", "c", "a", "d"]);
    }

    #[tokio::test]
    async fn test_no_events_found() {
        let store = MemoryStore(vec![deposit("a", 1_700_000_000)]);

        let (printed, output) = render(&store, "redeemRequest", 5, 6).await;

        assert_eq!(printed, 0);
        assert_eq!(output, "No events of type 'redeemRequest' found.\n");
        assert!(!output.contains(SEPARATOR));
    }

    #[tokio::test]
    async fn test_malformed_fields_fall_back() {
        let store = MemoryStore(vec![EventRecord {
            event_type: string("depositRequest"),
            assets: string("abc"),
            block_timestamp: string("yesterday"),
            ..Default::default()
        }]);

        let (printed, output) = render(&store, "depositRequest", 5, 6).await;

        assert_eq!(printed, 1);
        assert!(output.contains("Assets     : abc\n"), "{output}");
        assert!(output.contains("Timestamp  : yesterday (-)\n"), "{output}");
    }

    #[tokio::test]
    async fn test_missing_fields_are_independent() {
        let full = deposit("0xabc-1", 1_700_000_000);
        let labels = [
            "ID         : ",
            "Controller : ",
            "Owner      : ",
            "Request ID : ",
            "Sender     : ",
        ];

        for (position, label) in labels.iter().enumerate() {
            let mut event = full.clone();
            match position {
                0 => event.id = None,
                1 => event.controller = None,
                2 => event.owner = None,
                3 => event.request_id = None,
                _ => event.sender = None,
            }
            let store = MemoryStore(vec![event]);

            let (_, output) = render(&store, "depositRequest", 5, 6).await;

            for other in labels {
                let line = output.lines().find(|line| line.starts_with(other)).unwrap();
                if other == *label {
                    assert_eq!(line, format!("{other}-"));
                } else {
                    assert_ne!(line, format!("{other}-"));
                }
            }
            assert!(output.contains("Assets     : 1.000000\n"));
            assert!(output.contains("Timestamp  : 1700000000 (2023-11-14 22:13:20)\n"));
        }
    }

    #[tokio::test]
    async fn test_absent_timestamp() {
        let store = MemoryStore(vec![EventRecord {
            block_timestamp: None,
            ..deposit("a", 0)
        }]);

        let (_, output) = render(&store, "depositRequest", 5, 6).await;

        assert!(output.contains("Timestamp  : - (-)\n"), "{output}");
    }
}
