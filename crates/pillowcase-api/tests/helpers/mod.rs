pub mod fixtures;

use axum_test::TestServer;
use pillowcase_api::setup::routes::setup_routes;
use pillowcase_api::AppState;
use pillowcase_core::Config;
use pillowcase_storage::LocalImageStorage;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application backed by a throwaway image directory
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn image_directory(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Number of entries currently in the image directory
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.image_directory())
            .expect("Failed to list image directory")
            .count()
    }
}

/// Setup a test application with an isolated image directory
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

/// Same as [`setup_test_app`] with extra configuration entries
pub fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let directory = temp_dir.path().to_string_lossy().to_string();

    let mut settings: Vec<(String, String)> = vec![("IMAGE_DIRECTORY".to_string(), directory)];
    settings.extend(
        overrides
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    );

    let config = Config::from_lookup(|key| {
        settings
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("Failed to build test config");

    let storage = LocalImageStorage::new(config.image_directory.clone())
        .expect("Failed to open image directory");
    let state = Arc::new(AppState::new(config.clone(), Arc::new(storage)));
    let router = setup_routes(&config, state).expect("Failed to build router");

    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, temp_dir }
}
