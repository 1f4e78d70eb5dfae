// Card and List records, their identifiers, and validated create inputs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::errors::ValidationError;

/// Identifier of a Card
///
/// Opaque to callers. The store mints UUID v4 strings, but any string can be
/// presented for lookup; unknown values simply miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a List
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ListId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ListId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which collection a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Card,
    List,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Card => "card",
            RecordKind::List => "list",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf content record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub content: String,
}

/// Named, ordered grouping of Card references
///
/// `card_ids` keeps the order it was created with and may hold the same id
/// more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub header: String,
    #[serde(rename = "cardIds", default)]
    pub card_ids: Vec<CardId>,
}

/// Required text: present and not blank after trimming.
fn required(value: Option<String>, missing: ValidationError) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing),
    }
}

/// Validated input for creating a Card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCardInput {
    title: String,
    content: String,
}

impl CreateCardInput {
    /// Check required fields. Title is checked before content.
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ValidationError> {
        let title = required(title, ValidationError::TitleRequired)?;
        let content = required(content, ValidationError::ContentRequired)?;
        Ok(Self { title, content })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn into_card(self, id: CardId) -> Card {
        Card {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// Validated input for creating a List
///
/// Only the header is checked here. Whether the referenced Cards exist can
/// only be answered by the store, under its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListInput {
    header: String,
    card_ids: Vec<CardId>,
}

impl CreateListInput {
    pub fn new(header: Option<String>, card_ids: Vec<CardId>) -> Result<Self, ValidationError> {
        let header = required(header, ValidationError::HeaderRequired)?;
        Ok(Self { header, card_ids })
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn card_ids(&self) -> &[CardId] {
        &self.card_ids
    }

    pub(crate) fn into_list(self, id: ListId) -> List {
        List {
            id,
            header: self.header,
            card_ids: self.card_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_input_requires_title_first() {
        let err = CreateCardInput::new(None, None).unwrap_err();
        assert_eq!(err, ValidationError::TitleRequired);
    }

    #[test]
    fn test_card_input_requires_content() {
        let err = CreateCardInput::new(Some("Buy milk".to_string()), Some(String::new())).unwrap_err();
        assert_eq!(err, ValidationError::ContentRequired);
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let err = CreateCardInput::new(Some("   ".to_string()), Some("2%".to_string())).unwrap_err();
        assert_eq!(err, ValidationError::TitleRequired);

        let err = CreateListInput::new(Some("\t\n".to_string()), vec![]).unwrap_err();
        assert_eq!(err, ValidationError::HeaderRequired);
    }

    #[test]
    fn test_text_is_kept_as_supplied() {
        let input = CreateCardInput::new(Some(" Buy milk ".to_string()), Some("2%".to_string())).unwrap();
        assert_eq!(input.title(), " Buy milk ");
        assert_eq!(input.content(), "2%");
    }

    #[test]
    fn test_list_serializes_card_ids_in_camel_case() {
        let list = List {
            id: ListId::from("l1"),
            header: "Groceries".to_string(),
            card_ids: vec![CardId::from("c1"), CardId::from("c2")],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["cardIds"], serde_json::json!(["c1", "c2"]));
        assert_eq!(json["id"], "l1");
    }

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::Card.to_string(), "card");
        assert_eq!(RecordKind::List.to_string(), "list");
    }
}
