use std::ops::Deref;
use std::rc::Rc;

use api::settings::DashboardSettings;

use crate::mock::MockContract;
use crate::mock::MockWallet;

/// Startup configuration and the collaborators every screen talks to.
pub struct AppStateData {
    /// Settings as read from the environment at launch.
    pub startup_settings: DashboardSettings,
    pub wallet: MockWallet,
    pub contract: MockContract,
}

#[derive(Clone)]
pub struct AppState(Rc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(startup_settings: DashboardSettings) -> Self {
        let contract = MockContract::new(startup_settings.network);
        Self(Rc::new(AppStateData {
            startup_settings,
            wallet: MockWallet::default(),
            contract,
        }))
    }
}
