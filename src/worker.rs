use tokio::net::UdpSocket;
use tokio::sync::watch;
use tracing::Instrument;

use crate::relay::BUFFER_SIZE;
use crate::store::RecordStore;
use crate::submission::pipeline;

/// Spawn the receive loop on its own task, inside the `relay` span.
pub fn spawn(
    socket: UdpSocket,
    store: RecordStore,
    shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run(socket, store, shutdown).instrument(tracing::info_span!("relay")))
}

/// Receive datagrams until shutdown is signaled, storing each one in turn.
/// The socket is dropped when the loop returns.
pub async fn run(socket: UdpSocket, store: RecordStore, mut shutdown: watch::Receiver<bool>) {
    match socket.local_addr() {
        Ok(addr) => tracing::info!("Starting relay listener on {addr}"),
        Err(e) => tracing::info!("Starting relay listener (address unavailable: {e})"),
    }

    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        if *shutdown.borrow() {
            break;
        }

        let received = tokio::select! {
            received = socket.recv_from(&mut buf) => received,
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        };

        match received {
            Ok((len, peer)) => {
                tracing::debug!("Received {len} bytes from {peer}");
                if let Err(e) = pipeline::run(&store, &buf[..len]).await {
                    tracing::error!("Dropped submission: {e}");
                }
            }
            Err(e) => {
                tracing::error!("Relay receive error: {e}");
            }
        }
    }

    drop(socket);
    tracing::info!("Relay listener stopped");
}
