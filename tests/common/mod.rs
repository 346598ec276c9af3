//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use redirector::config::RedirectorConfig;
use redirector::rules::{RedirectRule, RuleSet, RuleStore};
use redirector::{HttpServer, Shutdown};

/// A running redirect server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub rules: Arc<RuleStore>,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Default test configuration: site at https://www.example.com/.
pub fn test_config() -> RedirectorConfig {
    let mut config = RedirectorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.site.base_url = "https://www.example.com/".into();
    config
        .site
        .pages
        .insert("contact".into(), "/contact-us/".into());
    config
}

/// Start a server with `rules` and `config`.
pub async fn start_server(config: RedirectorConfig, rules: Vec<RedirectRule>) -> TestServer {
    let store = Arc::new(RuleStore::new(RuleSet::new(rules)));
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store.clone()).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        rules: store,
        shutdown,
    }
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// The `Location` header of a response, if any.
pub fn location(res: &reqwest::Response) -> Option<&str> {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
