// Identifier generation

/// Source of fresh record identifiers
///
/// The store checks each drawn id against its collection and draws again on
/// a collision, so a source only has to be unique in practice.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_distinct() {
        let source = UuidIdSource;
        let ids: HashSet<String> = (0..1000).map(|_| source.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_uuid_id_format() {
        let id = UuidIdSource.next_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
