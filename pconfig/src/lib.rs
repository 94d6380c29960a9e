//! Persisted settings layer: defaults, lenient merge on load, and write-through field edits.
//!
//! ```rust
//! use pconfig::{ConfigStore, SettingKey};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), pconfig::ConfigError> {
//! let store = ConfigStore::in_memory();
//! store.load().await?;
//! store.set_from_text(SettingKey::MaxTokens, "256").await?;
//!
//! assert_eq!(store.snapshot()?.max_tokens, Some(256));
//! # Ok(())
//! # }
//! ```

mod backend;
mod backends;
mod error;
mod models;
mod settings;
mod store;

pub mod prelude {
    pub use crate::{
        AVAILABLE_MODELS, ConfigError, ConfigErrorKind, ConfigStore, DEFAULT_MODEL,
        FilesystemSettingsBackend, InMemorySettingsBackend, SettingKey, Settings,
        SettingsBackend, SettingsBackendConfig, create_default_settings_backend,
        create_settings_backend, default_settings_path, is_known_model,
    };
}

pub use backend::{
    FilesystemSettingsBackend, InMemorySettingsBackend, SettingsBackend, SettingsBackendConfig,
    create_default_settings_backend, create_settings_backend,
};
pub use backends::filesystem::default_settings_path;
pub use error::{ConfigError, ConfigErrorKind};
pub use models::{AVAILABLE_MODELS, DEFAULT_MODEL, is_known_model};
pub use settings::{
    DEFAULT_MAX_TOKENS, DEFAULT_PRESENCE_PENALTY, DEFAULT_TEMPERATURE, SettingKey, Settings,
    parse_float_prefix, parse_int_prefix,
};
pub use store::ConfigStore;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::{
        ConfigStore, FilesystemSettingsBackend, InMemorySettingsBackend, SettingsBackend,
        SettingsBackendConfig, create_settings_backend,
    };

    fn temp_path(prefix: &str) -> std::path::PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir()
            .join(format!("pconfig-{prefix}-{unique}"))
            .join("settings.json")
    }

    #[tokio::test]
    async fn in_memory_backend_returns_what_was_saved() {
        let backend = InMemorySettingsBackend::new();
        assert_eq!(backend.load_raw().await.expect("load"), None);

        backend
            .save_raw(json!({ "modelName": "llama-3.1-8b-instruct" }))
            .await
            .expect("save");

        assert_eq!(
            backend.load_raw().await.expect("load"),
            Some(json!({ "modelName": "llama-3.1-8b-instruct" }))
        );
    }

    #[tokio::test]
    async fn filesystem_backend_round_trips_document() {
        let path = temp_path("roundtrip");
        let backend = FilesystemSettingsBackend::new(&path).expect("backend should build");
        assert_eq!(backend.load_raw().await.expect("missing file loads"), None);

        backend
            .save_raw(json!({ "apiKey": "k", "temperature": null }))
            .await
            .expect("save should write file");
        backend
            .save_raw(json!({ "apiKey": "k2", "temperature": 0.5 }))
            .await
            .expect("second save should replace file");

        assert_eq!(
            backend.load_raw().await.expect("load"),
            Some(json!({ "apiKey": "k2", "temperature": 0.5 }))
        );

        let root = path.parent().expect("path has parent").to_path_buf();
        std::fs::remove_dir_all(root).expect("temporary directory should be removable");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn replacing_settings_file_never_exposes_missing_document() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let path = temp_path("replace");
        let writer = FilesystemSettingsBackend::new(&path).expect("writer should build");
        writer
            .save_raw(json!({ "apiKey": "k-0" }))
            .await
            .expect("initial save");

        let done = Arc::new(AtomicBool::new(false));
        let reader = tokio::spawn({
            let path = path.clone();
            let done = Arc::clone(&done);
            async move {
                let reader = FilesystemSettingsBackend::new(&path).expect("reader should build");
                while !done.load(Ordering::Relaxed) {
                    let document = reader.load_raw().await.expect("load should succeed");
                    assert!(document.is_some(), "settings file vanished during a save");
                    tokio::task::yield_now().await;
                }
            }
        });

        for index in 1..=200 {
            writer
                .save_raw(json!({ "apiKey": format!("k-{index}") }))
                .await
                .expect("save should replace file");
        }
        done.store(true, Ordering::Relaxed);
        reader.await.expect("reader should join");

        assert_eq!(
            writer.load_raw().await.expect("load"),
            Some(json!({ "apiKey": "k-200" }))
        );
        assert!(!path.with_extension("json.tmp").exists());

        let root = path.parent().expect("path has parent").to_path_buf();
        std::fs::remove_dir_all(root).expect("temporary directory should be removable");
    }

    #[tokio::test]
    async fn filesystem_backend_reports_corrupt_file() {
        let path = temp_path("corrupt");
        let root = path.parent().expect("path has parent").to_path_buf();
        std::fs::create_dir_all(&root).expect("create dir");
        std::fs::write(&path, b"{ not json").expect("write corrupt file");

        let backend = FilesystemSettingsBackend::new(&path).expect("backend should build");
        let error = backend.load_raw().await.expect_err("corrupt file must fail");
        assert_eq!(error.kind, crate::ConfigErrorKind::Serialization);

        std::fs::remove_dir_all(root).expect("temporary directory should be removable");
    }

    #[tokio::test]
    async fn created_backend_feeds_config_store() {
        let backend = create_settings_backend(SettingsBackendConfig::InMemory)
            .expect("in-memory backend should build");
        let store = ConfigStore::new(Arc::clone(&backend));

        store.set_api_key("pplx-123").await.expect("set should persist");
        let reopened = ConfigStore::open(backend).await.expect("reopen should load");

        assert_eq!(reopened.snapshot().expect("snapshot").api_key, "pplx-123");
    }
}
