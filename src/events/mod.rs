use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Handle used by services to publish domain events. Sending never fails the
/// originating request; a full or closed channel is logged and dropped.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of propagating failure.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Dropping domain event: {}", e);
        }
    }
}

// The events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Restock order events
    RestockOrderCreated(i32),
    RestockOrderStateChanged {
        order_id: i32,
        new_state: String,
    },
    RestockOrderItemsRecorded {
        order_id: i32,
        count: usize,
    },
    TransportNoteAttached {
        order_id: i32,
        delivery_date: String,
    },
    RestockOrderDeleted(i32),

    // Internal order events
    InternalOrderCreated(i32),
    InternalOrderStateChanged {
        order_id: i32,
        new_state: String,
    },
    InternalOrderDeleted(i32),

    // SKU / position events
    SkuCreated(i32),
    SkuUpdated(i32),
    SkuDeleted(i32),
    SkuPositionAssigned {
        sku_id: i32,
        position_id: String,
    },
    PositionOccupancyChanged {
        position_id: String,
        occupied_weight: i32,
        occupied_volume: i32,
    },
    PositionCreated(String),
    PositionDeleted(String),

    // SKU instance events
    SkuItemRegistered {
        rfid: String,
        sku_id: i32,
    },
    SkuItemUpdated {
        rfid: String,
    },
    SkuItemDeleted {
        rfid: String,
    },
}

/// Consumes domain events off the channel. Today this is a structured-log
/// sink; integrations subscribe here.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::RestockOrderStateChanged {
                order_id,
                new_state,
            } => {
                info!(order_id, %new_state, "Restock order state changed");
            }
            Event::PositionOccupancyChanged {
                position_id,
                occupied_weight,
                occupied_volume,
            } => {
                info!(
                    %position_id,
                    occupied_weight,
                    occupied_volume,
                    "Position occupancy changed"
                );
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event channel closed; stopping event processing loop");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::RestockOrderCreated(7))
            .await
            .expect("send should succeed");

        match rx.recv().await {
            Some(Event::RestockOrderCreated(id)) => assert_eq!(id, 7),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        // Must not panic or error out
        sender.send_or_log(Event::SkuCreated(1)).await;
    }
}
