pub mod api;
pub mod decode;
pub mod error;
pub mod file;
pub mod traits;

pub use api::ApiClient;
pub use decode::{decode_discovery, decode_user_media};
pub use error::SourceError;
pub use file::FileSource;
pub use traits::ShelfSource;
