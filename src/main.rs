mod app;
mod classifier;
mod config;
mod error;
mod event;
mod growth;
mod session;
mod theme;
mod ui;
mod worker;

use app::SproutApp;
use config::AppConfig;
use eframe::egui;
use session::onboarding::OnboardingScript;
use session::Session;
use std::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use worker::ClassifierWorker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprout=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(
        classifier = ?config.classifier,
        guided_onboarding = config.guided_onboarding,
        "starting sprout"
    );

    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("sprout-runtime")
        .build()?;

    let classifier = classifier::from_config(&config)?;
    let worker = ClassifierWorker::new(runtime.handle().clone(), tx, classifier);
    let session = Session::new(OnboardingScript::default(), config.guided_onboarding);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 780.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sprout",
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(SproutApp::new(
                &creation_context.egui_ctx,
                rx,
                worker,
                session,
            )))
        }),
    )?;

    Ok(())
}
