use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use docflow::app::AppState;
use docflow::db::models::DocumentDto;
use docflow::db::repository::{DocumentRepository, MongoDocumentRepository};

/// Holds a running MongoDB container and the Axum router wired to it.
///
/// The container lives as long as this struct. When dropped, it is stopped
/// and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub router: Router,
    pub repo: Arc<dyn DocumentRepository>,
}

impl TestEnv {
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("docflow_test");

        let repo: Arc<dyn DocumentRepository> = Arc::new(MongoDocumentRepository::new(
            &mongo_db,
            Duration::from_secs(10),
        ));

        let router = docflow::api::router(AppState::new(repo.clone()));

        Self {
            _mongo: mongo_container,
            router,
            repo,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }

    /// Helper: seed the demo fixture via the API.
    pub async fn seed(&self, server: &axum_test::TestServer, reset: bool) -> u64 {
        let response = server
            .post("/api/documents/seed")
            .add_query_param("reset", reset)
            .await;
        let body: serde_json::Value = response.json();
        body["inserted"].as_u64().expect("seed response should carry inserted")
    }

    /// Helper: list documents via the API, optionally filtered.
    pub async fn list(
        &self,
        server: &axum_test::TestServer,
        status: Option<&str>,
    ) -> Vec<DocumentDto> {
        let mut request = server.get("/api/documents");
        if let Some(status) = status {
            request = request.add_query_param("status", status);
        }
        let body: serde_json::Value = request.await.json();
        serde_json::from_value(body["data"].clone()).expect("data should be a list of documents")
    }

    /// Helper: ids of documents currently in `status`.
    pub async fn ids_with_status(
        &self,
        server: &axum_test::TestServer,
        status: &str,
    ) -> Vec<String> {
        self.list(server, Some(status))
            .await
            .into_iter()
            .map(|d| d.id)
            .collect()
    }
}
