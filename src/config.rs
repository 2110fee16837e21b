use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Fixed HTML documents served by logical route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Message,
    Error,
}

impl Page {
    pub fn file_name(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Message => "message.html",
            Page::Error => "error.html",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: IpAddr,
    pub http_port: u16,
    pub relay_addr: SocketAddr,
    pub templates_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub storage_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    /// `0.0.0.0:3000` for HTTP, `127.0.0.1:5000` for the relay, and
    /// `templates/`, `assets/`, `storage/` relative to the working directory.
    fn default() -> Self {
        Config {
            http_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 3000,
            relay_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
            templates_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("assets"),
            storage_dir: PathBuf::from("storage"),
            log_level: "debug".to_string(),
        }
    }
}

impl Config {
    /// Defaults, with any `FORMRELAY_*` variable overriding its field.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Config::default();

        let http_host: IpAddr = match env_opt("FORMRELAY_HTTP_HOST") {
            Some(v) => v
                .parse()
                .map_err(|e| format!("Invalid FORMRELAY_HTTP_HOST: {e}"))?,
            None => defaults.http_host,
        };

        let http_port: u16 = match env_opt("FORMRELAY_HTTP_PORT") {
            Some(v) => v
                .parse()
                .map_err(|e| format!("Invalid FORMRELAY_HTTP_PORT: {e}"))?,
            None => defaults.http_port,
        };

        let relay_addr: SocketAddr = match env_opt("FORMRELAY_RELAY_ADDR") {
            Some(v) => v
                .parse()
                .map_err(|e| format!("Invalid FORMRELAY_RELAY_ADDR: {e}"))?,
            None => defaults.relay_addr,
        };

        let templates_dir = env_opt("FORMRELAY_TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.templates_dir);
        let assets_dir = env_opt("FORMRELAY_ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.assets_dir);
        let storage_dir = env_opt("FORMRELAY_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let log_level = env_opt("FORMRELAY_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            http_host,
            http_port,
            relay_addr,
            templates_dir,
            assets_dir,
            storage_dir,
            log_level,
        })
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    pub fn template_path(&self, page: Page) -> PathBuf {
        self.templates_dir.join(page.file_name())
    }

    pub fn store_file(&self) -> PathBuf {
        self.storage_dir.join(crate::store::STORE_FILE)
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
