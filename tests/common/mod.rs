use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};
use tempfile::TempDir;
use tokio::sync::watch;

use formrelay::config::Config;
use formrelay::relay;
use formrelay::store::RecordStore;
use formrelay::worker;

pub const INDEX_HTML: &str = "<html><body><form method=\"post\" action=\"/contact\"></form></body></html>";
pub const MESSAGE_HTML: &str = "<html><body>Thanks!</body></html>";
pub const ERROR_HTML: &str = "<html><body>Not here</body></html>";
pub const STYLE_CSS: &str = "body { color: #333; }\n";

/// A running front end and relay worker rooted in a temporary directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: RecordStore,
    pub root: TempDir,
    shutdown: watch::Sender<bool>,
    worker: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Poll the store until it holds at least `count` records.
    pub async fn wait_for_records(&self, count: usize) -> Map<String, Value> {
        for _ in 0..100 {
            let records = self.store.load().await.expect("load store");
            if records.len() >= count {
                return records;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("store never reached {count} records");
    }
}

/// Spawn the app on ephemeral ports with fixture templates and assets.
pub async fn spawn_app() -> TestApp {
    let root = tempfile::tempdir().expect("tempdir");
    let base = root.path();

    std::fs::create_dir_all(base.join("templates")).unwrap();
    std::fs::create_dir_all(base.join("assets/assets")).unwrap();
    std::fs::write(base.join("templates/index.html"), INDEX_HTML).unwrap();
    std::fs::write(base.join("templates/message.html"), MESSAGE_HTML).unwrap();
    std::fs::write(base.join("templates/error.html"), ERROR_HTML).unwrap();
    std::fs::write(base.join("assets/assets/style.css"), STYLE_CSS).unwrap();

    let socket = relay::bind("127.0.0.1:0".parse().unwrap())
        .await
        .expect("Failed to bind relay socket");
    let relay_addr = socket.local_addr().unwrap();

    let config = Config {
        http_host: "127.0.0.1".parse().unwrap(),
        http_port: 0, // unused, we bind to random port
        relay_addr,
        templates_dir: base.join("templates"),
        assets_dir: base.join("assets"),
        storage_dir: base.join("storage"),
        log_level: "warn".to_string(),
    };

    let store = RecordStore::new(&config.storage_dir);
    let (shutdown, shutdown_rx) = watch::channel(false);
    let worker = worker::spawn(socket, store.clone(), shutdown_rx);

    let app = formrelay::build_app(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        store,
        root,
        shutdown,
        worker,
    }
}

/// Stop the relay worker and wait for it to release its socket.
pub async fn cleanup(app: TestApp) {
    let _ = app.shutdown.send(true);
    let _ = tokio::time::timeout(Duration::from_secs(2), app.worker).await;
}
