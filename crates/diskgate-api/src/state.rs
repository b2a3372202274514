//! Application state shared by all handlers.

use crate::admission::UploadAdmissions;
use diskgate_core::Config;
use diskgate_storage::Disk;
use std::sync::Arc;

/// Main application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub disk: Arc<dyn Disk>,
    pub admissions: UploadAdmissions,
    /// Client used to proxy file bytes from backend download links
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, disk: Arc<dyn Disk>) -> Self {
        AppState {
            config,
            disk,
            admissions: UploadAdmissions::new(),
            http: reqwest::Client::new(),
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
