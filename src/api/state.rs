use std::sync::Arc;

use crate::service::LeaderboardService;
use crate::service::LookupService;
use crate::service::RecentAddressDiscovery;

// Services shared by every worker
pub struct AppState {
    pub discovery: Arc<RecentAddressDiscovery>,
    pub lookup: Arc<LookupService>,
    pub leaderboard: Arc<LeaderboardService>,
}
