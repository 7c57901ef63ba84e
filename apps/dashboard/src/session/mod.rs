//! Client-side session state and the profile copy that follows it.

pub mod mirror;
pub mod provider;

pub use mirror::{ProfileMirror, ProfileSnapshot};
pub use provider::{
    SessionClosed, SessionProvider, SessionSubscription, SessionUser, WeakSessionProvider,
};
