use crate::ids::CardId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Answer button pressed for a card. Encoded as its number, 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ease {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Ease {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Ease::Again),
            2 => Some(Ease::Hard),
            3 => Some(Ease::Good),
            4 => Some(Ease::Easy),
            _ => None,
        }
    }
}

impl Serialize for Ease {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        Ease::from_number(n)
            .ok_or_else(|| serde::de::Error::custom(format!("ease must be 1 to 4, got {}", n)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAnswer {
    pub card_id: CardId,
    pub ease: Ease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// Browser column the card list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "answer")]
    Answer,
    #[serde(rename = "cardMod")]
    CardMod,
    #[serde(rename = "template")]
    Cards,
    #[serde(rename = "deck")]
    Deck,
    #[default]
    #[serde(rename = "cardDue")]
    Due,
    #[serde(rename = "cardEase")]
    Ease,
    #[serde(rename = "cardLapses")]
    Lapses,
    #[serde(rename = "cardIvl")]
    Interval,
    #[serde(rename = "noteCrt")]
    NoteCreation,
    #[serde(rename = "noteMod")]
    NoteMod,
    #[serde(rename = "note")]
    NoteType,
    #[serde(rename = "originalPosition")]
    OriginalPosition,
    #[serde(rename = "question")]
    Question,
    #[serde(rename = "cardReps")]
    Reps,
    #[serde(rename = "noteFld")]
    SortField,
    #[serde(rename = "noteTags")]
    Tags,
    #[serde(rename = "stability")]
    Stability,
    #[serde(rename = "difficulty")]
    Difficulty,
    #[serde(rename = "retrievability")]
    Retrievability,
}

/// Sort order of the card browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reordering {
    pub order: Order,
    pub column_id: Column,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ease_is_numeric() {
        assert_eq!(serde_json::to_value(Ease::Good).unwrap(), json!(3));
        assert_eq!(serde_json::from_value::<Ease>(json!(1)).unwrap(), Ease::Again);
        assert!(serde_json::from_value::<Ease>(json!(5)).is_err());
    }

    #[test]
    fn test_card_answer_wire_shape() {
        let answer = CardAnswer {
            card_id: CardId::new(1498938915662),
            ease: Ease::Easy,
        };
        assert_eq!(
            serde_json::to_value(answer).unwrap(),
            json!({"cardId": 1498938915662i64, "ease": 4})
        );
    }

    #[test]
    fn test_default_reordering() {
        assert_eq!(
            serde_json::to_value(Reordering::default()).unwrap(),
            json!({"order": "ascending", "columnId": "cardDue"})
        );

        let custom = Reordering {
            order: Order::Descending,
            column_id: Column::Interval,
        };
        assert_eq!(
            serde_json::to_value(custom).unwrap(),
            json!({"order": "descending", "columnId": "cardIvl"})
        );
    }
}
