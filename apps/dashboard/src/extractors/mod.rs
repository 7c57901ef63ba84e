pub mod current_user;

pub use current_user::{bearer_token, AuthId, CurrentUser};
