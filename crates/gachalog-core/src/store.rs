// Per-category pull data held by the client.
//
// The key set is fixed at construction: one entry per `CategoryCode`. A
// successful analysis replaces every pool at once; nothing mutates a pool
// field by field.

use std::collections::HashMap;

use tracing::debug;

use crate::category::{CategoryCode, ALL_CATEGORIES, DISPLAY_ORDER};
use crate::protocol::{Pool, PoolCollection, PullRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct PoolDataStore {
    pools: HashMap<CategoryCode, Pool>,
}

impl Default for PoolDataStore {
    fn default() -> Self {
        Self::initialize()
    }
}

impl PoolDataStore {
    /// Every known category with an empty pool under its default name.
    pub fn initialize() -> Self {
        PoolDataStore {
            pools: ALL_CATEGORIES
                .into_iter()
                .map(|c| (c, Pool::empty(c.default_name())))
                .collect(),
        }
    }

    /// Swap in a complete new set of pools.
    ///
    /// The input is cloned, so the caller may keep mutating it afterwards.
    /// Categories missing from `data` reset to an empty pool; codes the
    /// client does not know are dropped.
    pub fn replace_all(&mut self, data: &PoolCollection) {
        for code in data.keys() {
            if CategoryCode::from_code(code).is_none() {
                debug!("Ignoring unknown category code {code:?} in analysis data");
            }
        }

        let next: HashMap<CategoryCode, Pool> = ALL_CATEGORIES
            .into_iter()
            .map(|c| {
                let pool = data
                    .get(c.code())
                    .cloned()
                    .unwrap_or_else(|| Pool::empty(c.default_name()));
                (c, pool)
            })
            .collect();

        self.pools = next;
    }

    /// Pool for a wire code. Unknown codes resolve to `None`.
    pub fn pool(&self, code: &str) -> Option<&Pool> {
        CategoryCode::from_code(code).and_then(|c| self.pools.get(&c))
    }

    pub fn get(&self, category: CategoryCode) -> &Pool {
        // The constructor and replace_all both populate every category.
        &self.pools[&category]
    }

    /// Five-star records, most recent first.
    pub fn recent_five_star_pulls(&self, code: &str) -> Vec<&PullRecord> {
        self.pool(code)
            .map(|p| p.pulls.iter().rev().collect())
            .unwrap_or_default()
    }

    /// Four-star records, most recent first.
    pub fn recent_four_star_pulls(&self, code: &str) -> Vec<&PullRecord> {
        self.pool(code)
            .map(|p| p.four_star_pulls.iter().rev().collect())
            .unwrap_or_default()
    }

    /// Pools in tab order.
    pub fn display_order(&self) -> impl Iterator<Item = (CategoryCode, &Pool)> {
        DISPLAY_ORDER.into_iter().map(|c| (c, self.get(c)))
    }

    /// Wire-shaped copy of the whole store.
    pub fn to_collection(&self) -> PoolCollection {
        self.pools
            .iter()
            .map(|(c, p)| (c.code().to_string(), p.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PoolStats;

    fn record(name: &str, pulls: u32) -> PullRecord {
        PullRecord {
            name: name.into(),
            rank_type: "5".into(),
            pulls,
            ..PullRecord::default()
        }
    }

    fn pool_with(name: &str, records: Vec<PullRecord>, total: u64) -> Pool {
        Pool {
            name: name.into(),
            pulls: records,
            four_star_pulls: vec![],
            stats: PoolStats {
                total_pulls: total,
                total_primogems: total * 160,
                ..PoolStats::default()
            },
        }
    }

    #[test]
    fn initialize_has_every_category_empty() {
        let store = PoolDataStore::initialize();
        let collection = store.to_collection();
        let mut codes: Vec<&str> = collection.keys().map(String::as_str).collect();
        codes.sort();
        assert_eq!(codes, vec!["200", "301", "302", "500"]);
        for (category, pool) in store.display_order() {
            assert_eq!(pool.name, category.default_name());
            assert!(pool.pulls.is_empty());
            assert_eq!(pool.stats, PoolStats::default());
        }
    }

    #[test]
    fn replace_all_copies_input() {
        let mut store = PoolDataStore::initialize();
        let mut data = PoolCollection::new();
        data.insert("301".into(), pool_with("A", vec![record("Keqing", 80)], 80));

        store.replace_all(&data);

        data.get_mut("301").unwrap().stats.total_pulls = 9999;
        data.get_mut("301").unwrap().pulls.clear();

        let pool = store.pool("301").unwrap();
        assert_eq!(pool.stats.total_pulls, 80);
        assert_eq!(pool.pulls.len(), 1);
    }

    #[test]
    fn replace_all_keeps_key_set_fixed() {
        let mut store = PoolDataStore::initialize();
        let mut data = PoolCollection::new();
        data.insert("999".into(), pool_with("Mystery", vec![], 3));
        data.insert("302".into(), pool_with("Weapons", vec![], 12));

        store.replace_all(&data);

        assert_eq!(store.display_order().count(), 4);
        assert!(store.pool("999").is_none());
        assert_eq!(store.pool("302").unwrap().stats.total_pulls, 12);
    }

    #[test]
    fn replace_all_resets_missing_categories() {
        let mut store = PoolDataStore::initialize();
        let mut first = PoolCollection::new();
        first.insert("200".into(), pool_with("Standard", vec![], 40));
        store.replace_all(&first);
        assert_eq!(store.pool("200").unwrap().stats.total_pulls, 40);

        store.replace_all(&PoolCollection::new());
        let pool = store.pool("200").unwrap();
        assert_eq!(pool.stats.total_pulls, 0);
        assert_eq!(pool.name, CategoryCode::Permanent.default_name());
    }

    #[test]
    fn recent_views_are_reversed() {
        let mut store = PoolDataStore::initialize();
        let mut pool = pool_with("A", vec![record("first", 70), record("second", 85)], 155);
        pool.four_star_pulls = vec![record("f1", 9), record("f2", 3), record("f3", 10)];
        let mut data = PoolCollection::new();
        data.insert("301".into(), pool);
        store.replace_all(&data);

        let five: Vec<&str> = store
            .recent_five_star_pulls("301")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(five, vec!["second", "first"]);

        let four: Vec<&str> = store
            .recent_four_star_pulls("301")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(four, vec!["f3", "f2", "f1"]);

        // Underlying order is untouched.
        assert_eq!(store.pool("301").unwrap().pulls[0].name, "first");
    }

    #[test]
    fn unknown_active_key_gives_empty_views() {
        let store = PoolDataStore::initialize();
        assert!(store.pool("").is_none());
        assert!(store.recent_five_star_pulls("nope").is_empty());
        assert!(store.recent_four_star_pulls("nope").is_empty());
    }

    #[test]
    fn to_collection_round_trips_into_another_store() {
        let mut store = PoolDataStore::initialize();
        let mut data = PoolCollection::new();
        data.insert("500".into(), pool_with("Chronicled", vec![record("x", 60)], 60));
        store.replace_all(&data);

        let mut mirror = PoolDataStore::initialize();
        mirror.replace_all(&store.to_collection());
        assert_eq!(mirror, store);
    }
}
