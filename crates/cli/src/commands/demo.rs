//! Headless demo of the page runtime: loads config, initializes logging,
//! then drives a short scripted interaction sequence through the real event
//! loop with a surface that narrates every render call.

use std::sync::Arc;
use std::time::Duration;

use nutrisite_core::config::{LoadOptions, SiteConfig};
use nutrisite_core::links::DeliveryPlatform;
use nutrisite_page::{PageEvent, PageRuntime, TracingSurface, TracingTrackingSink};

use crate::commands::CommandResult;

const DEMO_VIEWPORT_WIDTH_PX: u32 = 1280;
const DEMO_SHUTDOWN_AFTER: Duration = Duration::from_millis(2_000);

fn init_logging(config: &SiteConfig) {
    use nutrisite_core::config::LogFormat::{Compact, Json, Pretty};
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> CommandResult {
    let config = match SiteConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("demo", "config", error.to_string(), 3),
    };
    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "demo",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                4,
            )
        }
    };

    let outcome = runtime.block_on(async move {
        let mut page = PageRuntime::new(
            config,
            Arc::new(TracingSurface),
            Arc::new(TracingTrackingSink),
            DEMO_VIEWPORT_WIDTH_PX,
        );
        let events = page.sender();

        page.start().await.map_err(|error| error.to_string())?;

        let script = [
            PageEvent::DotPressed(1),
            PageEvent::AssistantToggled,
            PageEvent::ChatSubmitted("how much protein per serving?".to_owned()),
            PageEvent::RecommendationRequested { age: Some(30), activity: None },
            PageEvent::PincodeChecked("560001".to_owned()),
            PageEvent::PlatformLinkPressed(DeliveryPlatform::Blinkit),
        ];
        for event in script {
            events.send(event).await.map_err(|error| error.to_string())?;
        }

        // Leave enough time for the scheduled bot reply to land.
        let shutdown = events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(DEMO_SHUTDOWN_AFTER).await;
            let _ = shutdown.send(PageEvent::Shutdown).await;
        });

        page.run().await;
        Ok::<(), String>(())
    });

    match outcome {
        Ok(()) => CommandResult::success("demo", "scripted interaction sequence completed"),
        Err(message) => CommandResult::failure("demo", "demo_failure", message, 4),
    }
}
