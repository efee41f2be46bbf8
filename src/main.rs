// src/main.rs
//! Showroom viewer entry point.
//!
//! The backend base URL comes from `SHOWROOM_BACKEND` (for example
//! `http://127.0.0.1:8000`); without it the viewer runs standalone with an
//! empty room.

use showroom::backend::BackendClient;
use showroom::ShowroomApp;

fn main() {
    env_logger::init();

    let backend = match std::env::var("SHOWROOM_BACKEND") {
        Ok(url) if !url.trim().is_empty() => {
            log::info!("using backend at {}", url);
            Some(BackendClient::new(url))
        }
        _ => {
            log::info!("SHOWROOM_BACKEND not set; running without a backend");
            None
        }
    };

    let app = pollster::block_on(ShowroomApp::new(backend));
    app.run();
}
