use crate::config::AppConfig;
use crate::store::SubscriptionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: SubscriptionStore,
}
