use anyhow::Context;
use aquachat::config::{default_config_path, load_config};
use aquachat::constants::{API_KEY_ENV, STORAGE_FILE};
use aquachat::controller::{ChatController, ControllerOptions};
use aquachat::logging::init_logging;
use aquachat::message_store::MessageStore;
use aquachat::settings::Settings;
use aquachat::storage::{FileStore, KeyValueStore};
use aquachat::transcript::TranscriptView;
use aquachat::translation::{GoogleTranslateProvider, TranslationManager};
use aquachat::ui::run_ui;
use aquachat::App;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config_path = default_config_path().context("failed to locate config directory")?;
    let config = load_config(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let log_path = init_logging(&config).context("failed to initialize logging")?;
    log::info!("aquachat starting; logging to {}", log_path.display());

    let storage: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(config.data_dir.join(STORAGE_FILE)).context("failed to open storage")?,
    );
    let settings = Settings::new(storage.clone());

    if settings.api_key().is_none() {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            settings
                .set_api_key(&key)
                .context("failed to store translation API key")?;
            log::info!("translation API key loaded from {}", API_KEY_ENV);
        }
    }

    let provider = GoogleTranslateProvider::new(config.translate_url.clone(), config.translate_timeout())
        .context("failed to build translation client")?;
    let translator = Arc::new(TranslationManager::new(
        Box::new(provider),
        settings.clone(),
        config.translation_cache_size,
    ));

    let transcript = Arc::new(TranscriptView::new());
    let controller = ChatController::new(
        MessageStore::new(storage),
        translator.clone(),
        settings.clone(),
        transcript.clone(),
        ControllerOptions::from(&config),
    );

    let mut app = App::new(controller, transcript, settings, translator);
    app.load_labels().await;

    run_ui(app).await.context("terminal UI failed")?;
    log::info!("aquachat exiting");
    Ok(())
}
