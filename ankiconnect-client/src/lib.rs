//! AnkiConnect client with lazy multi-action batching.
//!
//! ```no_run
//! use ankiconnect_client::{Actions, BlockingClient, ClientConfig};
//!
//! # fn main() -> ankiconnect_client::Result<()> {
//! let client = BlockingClient::new(ClientConfig::from_env()?)?;
//! let batch = client.batch();
//! let decks = batch.deck_names();
//! let due = batch.find_cards("is:due");
//!
//! // One `multi` request answers both.
//! println!("{:?}", decks.resolve_blocking()?);
//! println!("{} cards due", due.resolve_blocking()?.len());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod batch;
pub mod client;
pub mod config;
pub mod deferred;
pub mod invoke;
pub mod logging;

pub use actions::{
    Actions, CardModTime, CardReview, CardTemplate, FieldFont, ModelStyling, NoteModTime,
    Permission, ReplaceScope, ReviewEntry, TemplateSides,
};
pub use batch::Batch;
pub use client::{AsyncClient, BlockingClient};
pub use config::ClientConfig;
pub use deferred::{Deferred, DeferredState};
pub use invoke::Invoke;

pub use ankiconnect_core::{
    params, AnkiError, CardAnswer, CardId, Column, DeckConfigId, DeckId, DuplicateScope,
    DuplicateScopeOptions, Ease, ErrorKind, FieldContent, Generation, MediaFile, MediaSource,
    ModelId, Note, NoteId, NoteOptions, Order, Params, Reordering, Result,
};
pub use ankiconnect_transport::{BlockingTransport, Transport};
