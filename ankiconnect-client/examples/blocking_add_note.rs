// Rust Client Example: Blocking Client
// Adds a basic note and checks it back, without an async runtime.
//
//   cargo run --example blocking_add_note -- "Default"

use ankiconnect_client::{logging, Actions, BlockingClient, ClientConfig, Note};
use anyhow::{Context, Result};
use tracing::info;

fn main() -> Result<()> {
    logging::init_console_logging()?;

    let deck = std::env::args().nth(1).unwrap_or_else(|| "Default".to_string());
    let client = BlockingClient::new(ClientConfig {
        sync_on_drop: true,
        ..ClientConfig::from_env()?
    })?;

    client
        .create_deck(&deck)
        .with_context(|| format!("creating deck {}", deck))?;

    let note = Note::basic_card(
        deck.as_str(),
        "猫",
        "cat",
        "猫が好きです。",
        Vec::new(),
        vec!["example".to_string()],
    );
    let batch = client.batch();
    let can_add = batch.can_add_notes(std::slice::from_ref(&note));
    let fields = batch.model_field_names("Basic");
    info!("Basic fields: {:?}", fields.resolve_blocking()?);

    if can_add.resolve_blocking()?.first() == Some(&true) {
        let id = client.add_note(&note)?;
        info!("Added {}", id);
        info!("Tags: {:?}", client.get_note_tags(id)?);
    } else {
        info!("Note already exists in {}", deck);
    }

    info!("{} notes in {}", client.get_notes_in_deck(&deck)?.len(), deck);
    Ok(())
}
