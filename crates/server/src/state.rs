use std::sync::Arc;

use service::period::Clock;
use service::repository::MessRepository;
use service::{MealService, MemberService, RateService};

/// Shared handler state: services over one injected data-access handle.
#[derive(Clone)]
pub struct ServerState {
    pub members: Arc<MemberService<dyn MessRepository>>,
    pub meals: Arc<MealService<dyn MessRepository>>,
    pub rate: Arc<RateService<dyn MessRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn MessRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            members: Arc::new(MemberService::new(Arc::clone(&repo))),
            meals: Arc::new(MealService::new(Arc::clone(&repo), clock)),
            rate: Arc::new(RateService::new(repo)),
        }
    }
}
