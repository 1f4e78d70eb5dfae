// Request bodies, converted into validated store inputs

use serde::Deserialize;

use crate::core::errors::ValidationError;
use crate::core::models::{CardId, CreateCardInput, CreateListInput};

/// Body of `POST /card`
///
/// Fields are optional here so a missing field surfaces as a validation
/// failure rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCardRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl TryFrom<CreateCardRequest> for CreateCardInput {
    type Error = ValidationError;

    fn try_from(request: CreateCardRequest) -> Result<Self, Self::Error> {
        CreateCardInput::new(request.title, request.content)
    }
}

/// Body of `POST /list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateListRequest {
    pub header: Option<String>,
    #[serde(rename = "cardIds")]
    pub card_ids: Option<Vec<CardId>>,
}

impl TryFrom<CreateListRequest> for CreateListInput {
    type Error = ValidationError;

    fn try_from(request: CreateListRequest) -> Result<Self, Self::Error> {
        CreateListInput::new(request.header, request.card_ids.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ids_default_to_empty() {
        let request: CreateListRequest = serde_json::from_str(r#"{"header":"Groceries"}"#).unwrap();
        let input = CreateListInput::try_from(request).unwrap();
        assert!(input.card_ids().is_empty());

        let request: CreateListRequest =
            serde_json::from_str(r#"{"header":"Groceries","cardIds":null}"#).unwrap();
        let input = CreateListInput::try_from(request).unwrap();
        assert!(input.card_ids().is_empty());
    }

    #[test]
    fn test_card_ids_keep_order_and_duplicates() {
        let request: CreateListRequest =
            serde_json::from_str(r#"{"header":"h","cardIds":["b","a","b"]}"#).unwrap();
        let input = CreateListInput::try_from(request).unwrap();
        let ids: Vec<&str> = input.card_ids().iter().map(CardId::as_str).collect();
        assert_eq!(ids, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_missing_card_fields_fail_validation() {
        let request: CreateCardRequest = serde_json::from_str(r#"{"content":"2%"}"#).unwrap();
        assert_eq!(
            CreateCardInput::try_from(request).unwrap_err(),
            ValidationError::TitleRequired
        );
    }
}
