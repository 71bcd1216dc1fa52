//! Wire-level building blocks of the AnkiConnect client: requests, response
//! envelopes, the batch queue and the protocol's data types.

mod macros;

pub mod batch;
pub mod card;
pub mod error;
pub mod ids;
pub mod note;
pub mod request;
pub mod response;

pub use batch::{poll_outcome, settled, BatchQueue, Dispatch, OutcomeReceiver, Ticket};
pub use card::{CardAnswer, Column, Ease, Order, Reordering};
pub use error::{AnkiError, ErrorKind, Result};
pub use ids::{CardId, DeckConfigId, DeckId, Generation, ModelId, NoteId};
pub use note::{
    DuplicateScope, DuplicateScopeOptions, FieldContent, MediaFile, MediaSource, Note,
    NoteOptions, NoteParams,
};
pub use request::{Params, Request, DEFAULT_VERSION, MULTI_ACTION};
pub use response::{parse_envelope, parse_multi, Outcome};
