pub mod enums;
pub mod error;
pub mod payload;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{AssetClass, Interval, PriceRange};
pub use error::CoreError;
pub use payload::ProviderPayload;
pub use structs::{PricePoint, ReturnPoint};
