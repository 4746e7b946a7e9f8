// Merge of a user's tracked records into the discovery list

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use shelf_models::{DisplayItem, ExternalItem, TrackedRecord};
use tracing::debug;

use crate::alias::AliasMap;
use crate::matching::find_fallback_match;


/// How a tracked record found its canonical id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Internal id is itself a canonical id
    Direct,
    /// External id is a registered alias
    Alias,
    /// External id is itself a canonical id
    ExternalId,
    /// Internal id is a registered alias
    InternalAlias,
    /// Title/year fallback against the discovery list
    Fallback,
    /// Nothing matched; the record got its own entry
    TrackedOnly,
}

/// Counters for one reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub external: usize,
    pub tracked: usize,
    pub direct: usize,
    pub alias: usize,
    pub external_id: usize,
    pub internal_alias: usize,
    pub fallback: usize,
    pub tracked_only: usize,
    /// External items folded into an earlier item with the same id
    pub duplicate_external: usize,
}

impl ReconcileStats {
    fn count(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Direct => self.direct += 1,
            Resolution::Alias => self.alias += 1,
            Resolution::ExternalId => self.external_id += 1,
            Resolution::InternalAlias => self.internal_alias += 1,
            Resolution::Fallback => self.fallback += 1,
            Resolution::TrackedOnly => self.tracked_only += 1,
        }
    }

    /// Tracked records merged into an existing entry
    pub fn merged(&self) -> usize {
        self.direct + self.alias + self.external_id + self.internal_alias + self.fallback
    }
}

/// Merge tracked records into the discovery list.
///
/// The result keeps the discovery order, followed by the tracked records that
/// matched nothing in the order they were seen. Each canonical id appears once.
pub fn reconcile(external: &[ExternalItem], tracked: &[TrackedRecord]) -> Vec<DisplayItem> {
    reconcile_with_stats(external, tracked).0
}

/// Same as [`reconcile`], also returning how each record was resolved
pub fn reconcile_with_stats(
    external: &[ExternalItem],
    tracked: &[TrackedRecord],
) -> (Vec<DisplayItem>, ReconcileStats) {
    let mut merge = Merge::seed(external);
    for record in tracked {
        merge.apply(record);
    }
    merge.finish()
}

struct Merge<'a> {
    external: &'a [ExternalItem],
    /// Canonical id of each external item, by index
    external_keys: Vec<String>,
    entries: HashMap<String, DisplayItem>,
    /// Rating each entry had in the discovery feed
    feed_ratings: HashMap<String, f64>,
    external_order: Vec<String>,
    tracked_only: Vec<String>,
    aliases: AliasMap,
    /// Entries some tracked record has already merged into
    claimed: HashSet<String>,
    stats: ReconcileStats,
}

impl<'a> Merge<'a> {
    fn seed(external: &'a [ExternalItem]) -> Self {
        let mut merge = Self {
            external,
            external_keys: Vec::with_capacity(external.len()),
            entries: HashMap::with_capacity(external.len()),
            feed_ratings: HashMap::new(),
            external_order: Vec::with_capacity(external.len()),
            tracked_only: Vec::new(),
            aliases: AliasMap::new(),
            claimed: HashSet::new(),
            stats: ReconcileStats {
                external: external.len(),
                ..ReconcileStats::default()
            },
        };

        for (index, item) in external.iter().enumerate() {
            let id = item.id.trim();
            let key = if id.is_empty() {
                format!("external-{}", index)
            } else {
                id.to_string()
            };
            merge.external_keys.push(key.clone());

            if merge.entries.contains_key(&key) {
                merge.stats.duplicate_external += 1;
                debug!("reconcile: external id {} repeated at position {}, keeping first", key, index);
                continue;
            }

            for alias in &item.alias_ids {
                merge.aliases.register(alias, &key);
            }
            if let Some(rating) = item.rating {
                merge.feed_ratings.insert(key.clone(), rating);
            }
            merge.entries.insert(
                key.clone(),
                DisplayItem {
                    id: key.clone(),
                    title: item.title.clone(),
                    media_type: item.media_type,
                    year: item.year,
                    cover_url: item.cover_url.clone(),
                    href: item.href.clone(),
                    status: None,
                    rating: item.rating,
                    tracked: false,
                },
            );
            merge.external_order.push(key);
        }

        merge
    }

    /// Canonical id for a record, in priority order: direct id, alias of the
    /// external id, external id, alias of the internal id, title/year fallback.
    fn resolve(&self, record: &TrackedRecord) -> Option<(String, Resolution)> {
        let internal = record.internal_id();
        let external_id = record.external_id();

        if let Some(id) = internal.filter(|id| self.entries.contains_key(*id)) {
            return Some((id.to_string(), Resolution::Direct));
        }
        if let Some(canonical) = external_id.and_then(|id| self.aliases.resolve(id)) {
            return Some((canonical.to_string(), Resolution::Alias));
        }
        if let Some(id) = external_id.filter(|id| self.entries.contains_key(*id)) {
            return Some((id.to_string(), Resolution::ExternalId));
        }
        if let Some(canonical) = internal.and_then(|id| self.aliases.resolve(id)) {
            return Some((canonical.to_string(), Resolution::InternalAlias));
        }

        // Items already claimed by an earlier record are not reconsidered
        find_fallback_match(self.external, record, |index| {
            !self.claimed.contains(&self.external_keys[index])
        })
        .map(|index| (self.external_keys[index].clone(), Resolution::Fallback))
    }

    fn apply(&mut self, record: &TrackedRecord) {
        self.stats.tracked += 1;

        let Some((canonical, resolution)) = self.resolve(record) else {
            self.insert_tracked_only(record);
            return;
        };

        debug!(
            "reconcile: '{}' resolved to {} via {:?}",
            record.title, canonical, resolution
        );
        self.stats.count(resolution);

        if matches!(
            resolution,
            Resolution::ExternalId | Resolution::InternalAlias | Resolution::Fallback
        ) {
            self.register_record_ids(record, &canonical);
        }
        self.claimed.insert(canonical.clone());

        if let Some(entry) = self.entries.get_mut(&canonical) {
            if record.status.is_some() {
                entry.status = record.status;
            }
            entry.tracked = true;
            // A record without a rating shows the feed's, not an earlier record's
            entry.rating = record
                .rating
                .or_else(|| self.feed_ratings.get(&canonical).copied());
            let target = record
                .internal_id()
                .or_else(|| record.external_id())
                .unwrap_or(canonical.as_str());
            entry.href = record.media_type.href_for(target);
        }
    }

    fn insert_tracked_only(&mut self, record: &TrackedRecord) {
        let base = record
            .internal_id()
            .or_else(|| record.external_id())
            .map(str::to_string)
            .or_else(|| {
                let row_id = record.row_id.trim();
                (!row_id.is_empty()).then(|| row_id.to_string())
            })
            .unwrap_or_else(|| format!("tracked-{}", self.tracked_only.len()));
        let key = self.unused_key(base);

        debug!("reconcile: '{}' matched nothing, tracked-only entry {}", record.title, key);
        self.stats.count(Resolution::TrackedOnly);
        self.register_record_ids(record, &key);

        let target = record
            .internal_id()
            .or_else(|| record.external_id())
            .unwrap_or(key.as_str());
        let entry = DisplayItem {
            id: key.clone(),
            title: record.title.clone(),
            media_type: record.media_type,
            year: record.year(),
            cover_url: String::new(),
            href: record.media_type.href_for(target),
            status: record.status,
            rating: record.rating,
            tracked: true,
        };
        self.entries.insert(key.clone(), entry);
        self.tracked_only.push(key);
    }

    fn register_record_ids(&mut self, record: &TrackedRecord, canonical: &str) {
        for id in [record.internal_id(), record.external_id()].into_iter().flatten() {
            self.aliases.register(id, canonical);
        }
    }

    fn unused_key(&self, base: String) -> String {
        if !self.entries.contains_key(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}#{}", base, n);
            if !self.entries.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn finish(mut self) -> (Vec<DisplayItem>, ReconcileStats) {
        let items: Vec<DisplayItem> = self
            .external_order
            .iter()
            .chain(self.tracked_only.iter())
            .filter_map(|key| self.entries.remove(key))
            .collect();

        debug!(
            "reconcile: {} external, {} tracked -> {} items ({} merged, {} fallback, {} tracked-only)",
            self.stats.external,
            self.stats.tracked,
            items.len(),
            self.stats.merged(),
            self.stats.fallback,
            self.stats.tracked_only
        );

        (items, self.stats)
    }
}
