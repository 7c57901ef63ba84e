pub mod profiles;
pub mod seed;
pub mod store;

pub use profiles::{Profile, ProfileError, ProfileLoad, ProfileService, ProfileStep};
pub use store::{ProfileStore, SeaProfileStore};
