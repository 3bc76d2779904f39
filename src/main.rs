//! Regrisk HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use regrisk::config::Config;
use regrisk::gateway::{HandlerState, create_router_with_state};
use regrisk::model::{CompanyProfile, Regulation, load_profile, load_regulations};
use regrisk::narrative::{NarrativeGenerator, OllamaClient, generate_indicators};
use regrisk::report::{build_report, format_report};
use regrisk::scoring::RelevanceScorer;
use regrisk::storage::{AnalysisStore, FileAnalysisStore, persist_ranking};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let scorer = Arc::new(
        RelevanceScorer::new(config.weights())?.with_text_scan(config.scan_text),
    );
    let narrator = build_narrator(&config)?;

    let regulations = match &config.regulations_path {
        Some(path) => load_regulations(path)?,
        None => Vec::new(),
    };
    let profile = config
        .profile_path
        .as_deref()
        .map(load_profile)
        .transpose()?;

    if std::env::args().any(|arg| arg == "--report") {
        let profile = profile.context("--report needs REGRISK_PROFILE_PATH")?;
        if regulations.is_empty() {
            anyhow::bail!("--report needs a non-empty REGRISK_REGULATIONS_PATH");
        }
        return run_report(&config, &scorer, narrator.as_deref(), &regulations, &profile).await;
    }

    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        regulations = regulations.len(),
        profile = profile.is_some(),
        narrative = narrator.is_some(),
        "Regrisk starting"
    );

    let store = FileAnalysisStore::new(config.storage_path.clone());
    store.ensure_root()?;
    let store: Arc<dyn AnalysisStore> = Arc::new(store);

    let mut state = HandlerState::new(scorer, store)
        .with_storage_path(config.storage_path.clone())
        .with_default_regulations(regulations);
    if let Some(profile) = profile {
        state = state.with_default_profile(profile);
    }
    if let Some(narrator) = narrator {
        state = state.with_narrator(narrator);
    }

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Regrisk shutdown complete");
    Ok(())
}

fn build_narrator(config: &Config) -> anyhow::Result<Option<Arc<dyn NarrativeGenerator>>> {
    let Some(url) = &config.llm_url else {
        tracing::info!("No REGRISK_LLM_URL configured, narrative generation disabled");
        return Ok(None);
    };

    let client = OllamaClient::new(url, config.llm_model.clone(), config.llm_timeout())?;
    tracing::info!(
        endpoint = client.endpoint(),
        model = %config.llm_model,
        "Narrative generation enabled"
    );
    Ok(Some(Arc::new(client)))
}

/// Scores the configured files once, persists the analyses and prints the text report.
async fn run_report(
    config: &Config,
    scorer: &RelevanceScorer,
    narrator: Option<&dyn NarrativeGenerator>,
    regulations: &[Regulation],
    profile: &CompanyProfile,
) -> anyhow::Result<()> {
    let ranked = scorer.rank(regulations, profile);

    let store = FileAnalysisStore::new(config.storage_path.clone());
    store.ensure_root()?;
    let persisted = persist_ranking(&store, &ranked, profile)?;

    let report = build_report(&ranked, profile);
    println!("{}", format_report(&report));

    for change in &persisted.significant_changes {
        println!(
            "ALERT: {} moved {:+.2} (from {:.2} to {:.2})",
            change.regulation_id, change.delta, change.previous_total, change.new_total
        );
    }

    if let Some(narrator) = narrator {
        match generate_indicators(narrator, &report, profile, regulations).await {
            Ok(extraction) => {
                let summary = extraction.summary();
                println!();
                println!("LLM INDICATORS ({}):", narrator.model_name());
                for indicator in &extraction.indicators {
                    println!(
                        "  - {} [financial {}/10, reputation {}/10, operational {}/10] {}",
                        indicator.law_name,
                        indicator.impact_financial,
                        indicator.impact_reputation,
                        indicator.impact_operational,
                        indicator.notes
                    );
                }
                if let Some(reason) = &extraction.error {
                    println!("  (model output not usable: {reason})");
                }
                println!(
                    "  {} law(s), {} high financial impact, {} with deadlines",
                    summary.total, summary.high_impact_laws, summary.laws_with_deadlines
                );
            }
            Err(e) => tracing::warn!(error = %e, "Narrative generation failed"),
        }
    }

    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("REGRISK_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
