// Card and List storage - the single authority over both collections

pub mod ids;
pub mod memory;

pub use ids::{IdSource, UuidIdSource};
pub use memory::InMemoryStore;

use crate::core::errors::StoreError;
use crate::core::models::{Card, CardId, CreateCardInput, CreateListInput, List, ListId};

/// Number of records currently held, read from one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCounts {
    pub cards: usize,
    pub lists: usize,
}

/// Both collections as they stood at one instant
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreSnapshot {
    pub cards: Vec<Card>,
    pub lists: Vec<List>,
}

/// Trait for Card/List store operations
///
/// Implementations guard both collections as one unit: no reader may see a
/// Card gone while a List still references it. Reads return clones and have
/// no side effects.
#[async_trait::async_trait]
pub trait BoardStore: Send + Sync {
    /// Append a Card under a freshly minted id.
    async fn create_card(&self, input: CreateCardInput) -> Card;

    /// All Cards in insertion order.
    async fn list_cards(&self) -> Vec<Card>;

    async fn get_card(&self, id: &CardId) -> Result<Card, StoreError>;

    /// Remove the Card and every reference to it from every List.
    async fn delete_card(&self, id: &CardId) -> Result<(), StoreError>;

    /// Store a List after checking every referenced Card exists.
    ///
    /// Fails with `ValidationError::InvalidCardReference` listing all
    /// unresolved ids; nothing is stored in that case.
    async fn create_list(&self, input: CreateListInput) -> Result<List, StoreError>;

    /// All Lists in insertion order.
    async fn list_lists(&self) -> Vec<List>;

    async fn get_list(&self, id: &ListId) -> Result<List, StoreError>;

    /// Remove the List. Cards are untouched.
    async fn delete_list(&self, id: &ListId) -> Result<(), StoreError>;

    /// Cards and Lists read under one guard.
    async fn snapshot(&self) -> StoreSnapshot;

    async fn counts(&self) -> StoreCounts;
}
