pub mod address;
pub mod course;
pub mod resource;
pub mod tag_utils;
pub mod zap_receipt;

pub use address::{AddressParseError, EventAddress};
pub use course::Course;
pub use resource::{Resource, ResourceType};
pub use zap_receipt::ZapReceipt;
