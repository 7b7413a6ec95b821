use std::sync::{Arc, Mutex};

use engine_logging::{engine_debug, engine_info};
use fitbeat_core::{update, AppState, AppViewModel, Msg};
use fitbeat_engine::{RecommenderApi, ReqwestRecommender};
use tokio::sync::mpsc;

use super::config::AppConfig;
use super::effects::{spawn_event_pump, EffectRunner};
use super::logging;
use super::ui;

pub async fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load();
    logging::initialize(config.log_to_file);

    engine_info!(
        "Starting FitBeat UI v{} (recommender at {})",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );

    let client = ReqwestRecommender::new(config.client_settings())?;
    let host = SessionHost::start(
        AppState::with_settings(config.session_settings()),
        Arc::new(client),
    );

    let router = ui::build_router(ui::WebState { host });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    engine_info!("FitBeat UI listening on http://{}", config.listen_addr);
    axum::serve(listener, router).await?;

    Ok(())
}

/// Owns the core state machine: one dispatcher task applies messages in
/// arrival order and hands the resulting effects to the runner. Web handlers
/// only enqueue messages and read the view.
#[derive(Clone)]
pub(crate) struct SessionHost {
    shared: Arc<Mutex<AppState>>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl SessionHost {
    pub(crate) fn start(state: AppState, api: Arc<dyn RecommenderApi>) -> Self {
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();
        let (engine, events) = fitbeat_engine::EngineHandle::start(api);
        spawn_event_pump(events, msg_tx.clone());
        let runner = EffectRunner::new(msg_tx.clone(), engine);
        let shared = Arc::new(Mutex::new(state));

        let dispatch_shared = shared.clone();
        tokio::spawn(async move {
            while let Some(msg) = msg_rx.recv().await {
                let effects = {
                    let mut guard = dispatch_shared.lock().expect("lock app state");
                    let state = std::mem::take(&mut *guard);
                    let (mut state, effects) = update(state, msg);
                    if state.consume_dirty() {
                        engine_debug!("view updated (session {})", state.session());
                    }
                    *guard = state;
                    effects
                };
                runner.run(effects);
            }
        });

        Self { shared, msg_tx }
    }

    pub(crate) fn dispatch(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    pub(crate) fn view(&self) -> AppViewModel {
        self.shared.lock().expect("lock app state").view()
    }
}
