use anyhow::Result;
use eframe::egui;
use reqminer::repository::{self, Repository};
use reqminer::ui::ReqMinerApp;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create a runtime for session store initialization
    let rt = tokio::runtime::Runtime::new()?;

    // Initialize the session database
    let pool = rt.block_on(repository::database::init_database("reqminer.db"))?;
    let repository = Repository::new(pool);

    // Shutdown the initialization runtime
    drop(rt);

    // Run the native app
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ReqMiner - App Review Analysis",
        options,
        Box::new(move |cc| Box::new(ReqMinerApp::new(cc, repository))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
