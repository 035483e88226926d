//! Tag directories and the container seam.

use super::value::TagValue;
use crate::error::DirectoryError;
use std::collections::BTreeMap;

/// Read-only mapping from tag id to raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDirectory {
    entries: BTreeMap<u16, TagValue>,
}

impl TagDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u16) -> Option<&TagValue> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &TagValue)> + '_ {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    /// Resolve every id through `name_of`, keeping the values.
    pub fn resolve<F, S>(&self, name_of: F) -> BTreeMap<String, TagValue>
    where
        F: Fn(u16) -> S,
        S: Into<String>,
    {
        self.iter()
            .map(|(id, value)| (name_of(id).into(), value.clone()))
            .collect()
    }
}

impl FromIterator<(u16, TagValue)> for TagDirectory {
    fn from_iter<I: IntoIterator<Item = (u16, TagValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Anything that exposes image metadata as tag directories.
///
/// Implement this trait to feed the extractor from another source
/// (e.g., an in-memory fixture in tests).
pub trait MetadataContainer {
    /// The primary directory, or `None` when the image has no metadata
    fn primary_directory(&self) -> Option<TagDirectory>;

    /// Fetch the sub-directory addressed by a pointer tag
    fn sub_directory(&self, pointer: u16) -> Result<TagDirectory, DirectoryError>;
}

/// Container for images that carry no metadata at all
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContainer;

impl MetadataContainer for EmptyContainer {
    fn primary_directory(&self) -> Option<TagDirectory> {
        None
    }

    fn sub_directory(&self, pointer: u16) -> Result<TagDirectory, DirectoryError> {
        Err(DirectoryError::Missing { pointer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn collects_and_iterates_in_id_order() {
        let directory: TagDirectory = vec![
            (0x0132, TagValue::Text("b".to_string())),
            (0x010F, TagValue::Text("a".to_string())),
        ]
        .into_iter()
        .collect();

        let ids: Vec<u16> = directory.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0x010F, 0x0132]);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn resolve_applies_names() {
        let directory: TagDirectory = vec![(7, TagValue::Integers(vec![1]))].into_iter().collect();
        let resolved = directory.resolve(|id| Cow::<str>::Owned(format!("tag{}", id)));
        assert_eq!(resolved.get("tag7"), Some(&TagValue::Integers(vec![1])));
    }

    #[test]
    fn empty_container_has_nothing() {
        let container = EmptyContainer;
        assert!(container.primary_directory().is_none());
        assert_eq!(
            container.sub_directory(0x8825),
            Err(DirectoryError::Missing { pointer: 0x8825 })
        );
    }
}
