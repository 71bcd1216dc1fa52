// Rust Client Example: Batched Actions
// Queues several actions against a running Anki with AnkiConnect installed
// and answers all of them with one `multi` request.
//
//   ANKICONNECT_URL=http://localhost:8765 cargo run --example batch_demo

use ankiconnect_client::{logging, Actions, AsyncClient, ClientConfig};
use anyhow::Result;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_console_logging()?;

    let config = ClientConfig::from_env()?;
    info!("Connecting to {}", config.url);
    let client = AsyncClient::new(config)?;

    // Nothing is sent while queuing.
    let batch = client.batch();
    let version = batch.version();
    let decks = batch.deck_names();
    let due = batch.find_cards("is:due");
    let reviewed = batch.get_num_cards_reviewed_today();
    let missing = batch.get_deck_config("No Such Deck");
    info!("Queued {} actions", batch.len());

    // The first resolution sends the whole batch.
    info!("AnkiConnect version {}", version.await?);
    for deck in decks.await? {
        info!("Deck: {}", deck);
    }
    info!("{} cards due, {} reviewed today", due.await?.len(), reviewed.await?);

    // A failed action only affects its own handle.
    match missing.await {
        Ok(config) => info!("Unexpected deck config: {}", config),
        Err(err) => warn!("getDeckConfig failed as expected: {}", err),
    }

    // send_batch flushes as soon as the closure returns.
    let (models, tags) = client
        .send_batch(|batch| (batch.model_names(), batch.get_tags()))
        .await;
    info!("Models: {:?}", models.await?);
    info!("Tags: {:?}", tags.await?);

    Ok(())
}
