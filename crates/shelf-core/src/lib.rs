pub mod alias;
pub mod matching;
pub mod reconcile;

pub use alias::AliasMap;
pub use matching::{find_fallback_match, normalize_title, titles_match};
pub use reconcile::{reconcile, reconcile_with_stats, ReconcileStats, Resolution};
