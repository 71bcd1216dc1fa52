use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($repr);

        impl $name {
            pub const fn new(value: $repr) -> Self {
                $name(value)
            }

            pub const fn get(&self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$repr> for $name {
            fn from(value: $repr) -> Self {
                $name::new(value)
            }
        }
    };
}

id_type!(
    /// Identifier of a card in the Anki collection.
    CardId(i64)
);
id_type!(
    /// Identifier of a note in the Anki collection.
    NoteId(i64)
);
id_type!(DeckId(i64));
id_type!(ModelId(i64));
id_type!(DeckConfigId(i64));

/// Dispatch generation of a batch queue.
///
/// Starts at zero and advances once per non-empty flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Generation(value)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    pub(crate) fn advance(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let card = CardId::new(1_502_298_033_753);
        assert_eq!(card.get(), 1_502_298_033_753);

        let note: NoteId = 42.into();
        assert_eq!(note, NoteId::new(42));
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let cards = vec![CardId::new(1), CardId::new(2)];
        assert_eq!(serde_json::to_string(&cards).unwrap(), "[1,2]");

        let back: Vec<CardId> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(back, cards);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", DeckId::new(7)), "DeckId(7)");
        assert_eq!(format!("{}", Generation::new(3)), "Generation(3)");
    }

    #[test]
    fn test_generation_advance() {
        let mut generation = Generation::default();
        assert_eq!(generation.get(), 0);
        generation.advance();
        generation.advance();
        assert_eq!(generation, Generation::new(2));
        assert!(Generation::new(1) < generation);
    }
}
