//! Per-kind remaining piece counts.

use std::collections::BTreeMap;

use havenisle_core::{ItemCatalog, ItemKind};

/// Remaining inventory per item kind.
///
/// Counts never go negative: `reserve` is the gate that prevents placing more
/// pieces than owned. Only creation and deletion touch the counts; successful
/// relocation never does.
#[derive(Clone, Debug, Default)]
pub(crate) struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    /// Seeds the inventory from the catalog's initial counts.
    pub(crate) fn from_catalog(catalog: &ItemCatalog) -> Self {
        Self {
            counts: catalog
                .iter()
                .map(|(kind, spec)| (kind.clone(), spec.initial_count))
                .collect(),
        }
    }

    /// Units remaining for the provided kind.
    pub(crate) fn remaining(&self, kind: &ItemKind) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Consumes one unit of the provided kind.
    ///
    /// Returns `true` and decrements iff at least one unit remains; otherwise
    /// returns `false` without touching the count.
    pub(crate) fn reserve(&mut self, kind: &ItemKind) -> bool {
        match self.counts.get_mut(kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns one unit of the provided kind, unconditionally.
    pub(crate) fn release(&mut self, kind: &ItemKind) {
        *self.counts.entry(kind.clone()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use havenisle_core::ItemSpec;

    fn kind(name: &str) -> ItemKind {
        ItemKind::new(name)
    }

    #[test]
    fn seeds_counts_from_catalog() {
        let catalog = ItemCatalog::from_entries([(
            kind("hut"),
            ItemSpec {
                initial_count: 2,
                ..ItemSpec::FALLBACK
            },
        )]);
        let inventory = Inventory::from_catalog(&catalog);
        assert_eq!(inventory.remaining(&kind("hut")), 2);
        assert_eq!(inventory.remaining(&kind("shrine")), 0);
    }

    #[test]
    fn reserve_stops_at_zero() {
        let catalog = ItemCatalog::from_entries([(
            kind("hut"),
            ItemSpec {
                initial_count: 1,
                ..ItemSpec::FALLBACK
            },
        )]);
        let mut inventory = Inventory::from_catalog(&catalog);

        assert!(inventory.reserve(&kind("hut")));
        assert!(!inventory.reserve(&kind("hut")));
        assert_eq!(inventory.remaining(&kind("hut")), 0);
    }

    #[test]
    fn release_restores_and_creates_counts() {
        let mut inventory = Inventory::default();
        inventory.release(&kind("temple"));
        inventory.release(&kind("temple"));
        assert_eq!(inventory.remaining(&kind("temple")), 2);
    }
}
