use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of the chapter catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub id: u32,
    pub name: String,
}

impl ChapterRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

const GITA_CHAPTERS: &[(u32, &str)] = &[
    (0, "Gita Dhayna Slokas"),
    (1, "Arjuna Vishadha Yoga"),
    (2, "Sankhya Yoga"),
    (3, "Karma Yoga"),
    (4, "Jnana Yoga"),
    (5, "Karma Sanyasa Yoga"),
    (6, "Ātma-Saṁyama Yoga"),
    (7, "Jnana Vijnana Yoga"),
    (8, "Aksara Brahma Yoga"),
    (9, "Raja Vidya Raja Guhya Yoga"),
    (10, "Vibhuti Yoga"),
    (11, "Visvarupa Darsana Yoga"),
    (12, "Bhakti Yoga"),
    (13, "Ksetra Ksetrajna Vibhaga Yoga"),
    (14, "Gunatraya Vibhaga Yoga"),
    (15, "Purushottama Yoga"),
    (16, "Daivasura Sampad Vibhaga Yoga"),
    (17, "Sraddhatraya Vibhaga Yoga"),
    (18, "Moksha Sanyasa Yoga"),
];

/// Fixed, ordered chapter list built once at startup.
///
/// Membership is answered from an id set, never from a numeric range,
/// so a catalog with gaps behaves correctly.
#[derive(Debug, Clone)]
pub struct Catalog {
    chapters: Vec<ChapterRecord>,
    ids: HashSet<u32>,
}

impl Catalog {
    /// Build a catalog from an explicit record list, preserving its order
    pub fn new(chapters: Vec<ChapterRecord>) -> Self {
        let ids = chapters.iter().map(|c| c.id).collect();
        Self { chapters, ids }
    }

    /// The known Bhagavad Gita catalog, chapters 0 through 18
    pub fn gita() -> Self {
        Self::new(
            GITA_CHAPTERS
                .iter()
                .map(|(id, name)| ChapterRecord::new(*id, *name))
                .collect(),
        )
    }

    pub fn chapters(&self) -> &[ChapterRecord] {
        &self.chapters
    }

    /// Check whether a caller-supplied id is in the catalog.
    ///
    /// Takes a signed id so negative or oversized inputs are simply absent.
    pub fn contains(&self, id: i64) -> bool {
        u32::try_from(id).is_ok_and(|id| self.ids.contains(&id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::gita()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gita_catalog_membership() {
        let catalog = Catalog::gita();
        assert_eq!(catalog.chapters().len(), 19);
        for id in 0..=18 {
            assert!(catalog.contains(id), "chapter {id} should be known");
        }
        assert!(!catalog.contains(-1));
        assert!(!catalog.contains(19));
        assert!(!catalog.contains(1000));
        assert!(!catalog.contains(i64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_order_is_preserved() {
        let catalog = Catalog::gita();
        let ids: Vec<u32> = catalog.chapters().iter().map(|c| c.id).collect();
        assert_eq!(ids, (0..=18).collect::<Vec<_>>());
        assert_eq!(catalog.chapters()[2].name, "Sankhya Yoga");
    }

    #[test]
    fn test_membership_is_enumerated_not_ranged() {
        let catalog = Catalog::new(vec![
            ChapterRecord::new(7, "Seven"),
            ChapterRecord::new(3, "Three"),
        ]);
        assert!(catalog.contains(3));
        assert!(catalog.contains(7));
        assert!(!catalog.contains(5));
        assert_eq!(catalog.chapters()[0].id, 7);
    }
}
