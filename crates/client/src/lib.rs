//! Client pages for the Daypack REST surface.
//!
//! [`ApiClient`] is a typed HTTP client with one method per route. The page
//! types ([`TasksPage`], [`MediaPage`], [`RemindersPage`]) each hold a cached
//! copy of their collection, fetch it lazily, and invalidate it after every
//! successful mutation so the next read refetches from the server.

mod api;
mod cache;
mod error;
mod media;
mod reminders;
mod tasks;
#[cfg(test)]
mod test_support;

pub use api::*;
pub use cache::*;
pub use error::*;
pub use media::*;
pub use reminders::*;
pub use tasks::*;
