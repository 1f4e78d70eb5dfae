// In-memory store - both collections behind one lock

use std::collections::HashSet;

use tokio::sync::RwLock;
use tracing::error;

use crate::core::errors::{StoreError, ValidationError};
use crate::core::models::{
    Card, CardId, CreateCardInput, CreateListInput, List, ListId, RecordKind,
};
use crate::store::ids::{IdSource, UuidIdSource};
use crate::store::{BoardStore, StoreCounts, StoreSnapshot};

/// Draws allowed before a colliding id source is treated as broken
const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Default)]
struct Collections {
    cards: Vec<Card>,
    lists: Vec<List>,
    // Every id ever handed out, per kind. Never shrinks.
    issued_cards: HashSet<String>,
    issued_lists: HashSet<String>,
}

impl Collections {
    fn card_index(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }

    fn list_index(&self, id: &ListId) -> Option<usize> {
        self.lists.iter().position(|list| &list.id == id)
    }
}

/// Process-local store for Cards and Lists
///
/// Cards and Lists share a single `RwLock`: a card delete and the scrub of
/// its references from every List happen under one write guard. Nothing is
/// awaited while a guard is held.
pub struct InMemoryStore {
    inner: RwLock<Collections>,
    ids: Box<dyn IdSource>,
}

impl InMemoryStore {
    /// Create an empty store minting UUID v4 identifiers
    pub fn new() -> Self {
        Self::with_id_source(UuidIdSource)
    }

    /// Create an empty store with a custom identifier source
    pub fn with_id_source(ids: impl IdSource + 'static) -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
            ids: Box::new(ids),
        }
    }

    /// Draw an id `kind` has never issued, and record it in `issued`.
    ///
    /// Ids of deleted records stay in `issued`, so they are never reused.
    /// A collision means the id source is broken. It is reported to the
    /// operator and never surfaces to the caller as a store error.
    fn fresh_id(&self, kind: RecordKind, issued: &mut HashSet<String>) -> String {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if issued.insert(id.clone()) {
                return id;
            }
            error!(
                kind = %kind,
                id = %id,
                attempt,
                "Identifier collision - id source produced a duplicate"
            );
        }
        panic!("{kind} id source produced {MAX_ID_ATTEMPTS} colliding identifiers in a row");
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BoardStore for InMemoryStore {
    async fn create_card(&self, input: CreateCardInput) -> Card {
        let mut inner = self.inner.write().await;
        let id = self.fresh_id(RecordKind::Card, &mut inner.issued_cards);
        let card = input.into_card(CardId::from(id));
        inner.cards.push(card.clone());
        card
    }

    async fn list_cards(&self) -> Vec<Card> {
        self.inner.read().await.cards.clone()
    }

    async fn get_card(&self, id: &CardId) -> Result<Card, StoreError> {
        let inner = self.inner.read().await;
        inner
            .cards
            .iter()
            .find(|card| &card.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(RecordKind::Card, id.as_str()))
    }

    async fn delete_card(&self, id: &CardId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .card_index(id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Card, id.as_str()))?;

        inner.cards.remove(index);
        // Every occurrence goes, duplicates included; survivors keep their order.
        for list in inner.lists.iter_mut() {
            list.card_ids.retain(|card_id| card_id != id);
        }
        Ok(())
    }

    async fn create_list(&self, input: CreateListInput) -> Result<List, StoreError> {
        let mut inner = self.inner.write().await;

        if !input.card_ids().is_empty() {
            let known: HashSet<&CardId> = inner.cards.iter().map(|card| &card.id).collect();
            let unresolved: Vec<CardId> = input
                .card_ids()
                .iter()
                .filter(|card_id| !known.contains(card_id))
                .cloned()
                .collect();
            if !unresolved.is_empty() {
                return Err(ValidationError::InvalidCardReference { unresolved }.into());
            }
        }

        let id = self.fresh_id(RecordKind::List, &mut inner.issued_lists);
        let list = input.into_list(ListId::from(id));
        inner.lists.push(list.clone());
        Ok(list)
    }

    async fn list_lists(&self) -> Vec<List> {
        self.inner.read().await.lists.clone()
    }

    async fn get_list(&self, id: &ListId) -> Result<List, StoreError> {
        let inner = self.inner.read().await;
        inner
            .lists
            .iter()
            .find(|list| &list.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(RecordKind::List, id.as_str()))
    }

    async fn delete_list(&self, id: &ListId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .list_index(id)
            .ok_or_else(|| StoreError::not_found(RecordKind::List, id.as_str()))?;
        inner.lists.remove(index);
        Ok(())
    }

    async fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.read().await;
        StoreSnapshot {
            cards: inner.cards.clone(),
            lists: inner.lists.clone(),
        }
    }

    async fn counts(&self) -> StoreCounts {
        let inner = self.inner.read().await;
        StoreCounts {
            cards: inner.cards.len(),
            lists: inner.lists.len(),
        }
    }
}
