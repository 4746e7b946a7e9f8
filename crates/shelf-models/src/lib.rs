pub mod media;
pub mod status;
pub mod external_item;
pub mod tracked_record;
pub mod display_item;
pub mod wire;

pub use media::{parse_year, MediaType};
pub use status::TrackStatus;
pub use external_item::ExternalItem;
pub use tracked_record::TrackedRecord;
pub use display_item::DisplayItem;
pub use wire::{records_from_value, DiscoveryRecord, MediaRef, UserMediaRecord};
