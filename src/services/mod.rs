pub mod cancellation;
pub mod debounce;
pub mod detail;
pub mod providers;
pub mod recommendations;
pub mod search;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use cancellation::{RequestController, RequestToken};
pub use debounce::{Debouncer, PendingCommit};
pub use detail::{DetailSession, DetailView};
pub use providers::{MetadataProvider, OmdbProvider};
pub use search::{SearchSession, SearchView};
