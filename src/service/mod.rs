pub mod discovery;
pub mod leaderboard;
pub mod lookup;

pub use discovery::RecentAddressDiscovery;
pub use leaderboard::LeaderboardService;
pub use lookup::LookupOutcome;
pub use lookup::LookupService;
