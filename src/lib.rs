pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::services::appointment_service::AppointmentService;
use reqwest::Client;

#[derive(Clone)]
pub struct ClientState {
    pub appointment_service: AppointmentService,
}

impl ClientState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap();

        let appointment_service = AppointmentService::new(
            http_client,
            config.api_base_url.clone(),
            config.api_auth_token.clone(),
        );

        Self {
            appointment_service,
        }
    }
}
