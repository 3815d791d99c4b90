pub mod config;
pub mod store;
pub mod types;

mod adapters;
mod app;
mod assets;
mod ports;
mod push;
mod state;
mod templates;

pub use app::app;
pub use push::{VapidCredentials, generate_vapid_credentials};

use std::net::SocketAddr;

pub async fn serve(addr: SocketAddr, config: config::AppConfig) {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app(config)).await.expect("server error");
}
