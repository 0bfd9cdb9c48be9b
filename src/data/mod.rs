//! Input layer
//!
//! Everything the table derivation reads from the outside world:
//! - Viewport size (terminal measurements, resize events)
//! - The persisted dark-mode preference
//! - The one-shot leaderboard fetch
//! - The terminal event subscription

pub mod events;
pub mod fetch;
pub mod preference;
pub mod viewport;

pub use events::{Event, EventReader};
pub use fetch::{FetchError, Fetcher, HttpSource, LeaderboardSource, LoadState};
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use viewport::{CrosstermProbe, ViewportSize, ViewportTracker};
