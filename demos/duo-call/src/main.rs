//! Two call sessions negotiating through an in-process signaling server.
//! Run with `cargo run` and watch the handshake in the logs.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use switchboard::client::{
    CallConfig, CallEvent, CallHandle, CallSession, CallStatus, RtcTransportFactory,
    WsSignalingChannel,
};
use switchboard::server::{ServerConfig, serve};
use tokio::task::JoinHandle;
use tracing::{Level, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let bind: SocketAddr = "127.0.0.1:3400".parse().expect("hardcoded address");
    let config = ServerConfig {
        bind,
        // Loopback needs no STUN.
        ice_servers: Vec::new(),
        ..Default::default()
    };

    tokio::spawn(async move {
        if let Err(e) = serve(config).await {
            eprintln!("signaling server exited: {e}");
        }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;

    let url = format!("ws://{bind}/ws");
    let factory = Arc::new(RtcTransportFactory);

    let (counsel, counsel_log) = join_call("counsel", &url, factory.clone()).await;
    let (_client, client_log) = join_call("client", &url, factory).await;

    // Give the pair a moment on the line, then end the consultation.
    tokio::time::sleep(Duration::from_secs(5)).await;
    info!("[counsel] hanging up");
    counsel.hang_up();

    let _ = counsel_log.await;
    let _ = client_log.await;
    info!("Consultation over.");
}

async fn join_call(
    name: &'static str,
    url: &str,
    factory: Arc<RtcTransportFactory>,
) -> (CallHandle, JoinHandle<()>) {
    let channel = WsSignalingChannel::connect(url)
        .await
        .expect("failed to reach the signaling server");

    let mut config = CallConfig::new("demo-consultation");
    config.label = Some(name.to_owned());

    let (handle, mut events) = CallSession::spawn(channel, config, factory);

    let log = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                CallEvent::Registered { session_id } => {
                    info!("[{name}] registered as {session_id}");
                }
                CallEvent::PeerJoined { session_id, label } => {
                    info!("[{name}] {} joined as {session_id}", label.as_deref().unwrap_or("peer"));
                }
                CallEvent::Status(status) => {
                    info!("[{name}] call is {status:?}");
                    if status != CallStatus::Connected {
                        break;
                    }
                }
                CallEvent::Rejected { code, detail } => {
                    info!("[{name}] rejected: {code} ({detail})");
                }
            }
        }
    });

    (handle, log)
}
