#![windows_subsystem = "windows"]

use clap::Parser;
use eframe::egui;

mod api;
mod app;
mod models;
mod ui;
mod utils;

use crate::api::ApiClient;
use crate::app::DetectionApp;

/// Desktop client for the PPE detection service: upload an image, review
/// helmet compliance detections, collect the generated PDF reports.
#[derive(Parser, Debug)]
#[command(name = "ppe-vision", version)]
struct Args {
    /// Base URL of the detection/report service.
    #[arg(long, env = "PPE_API_BASE", default_value = "http://localhost:8000")]
    api_base: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::info!("using detection service at {}", args.api_base);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("PPE Vision Detection System"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "PPE Vision Detection System",
        options,
        Box::new(move |_cc| Ok(Box::new(DetectionApp::new(ApiClient::new(&args.api_base))))),
    ) {
        eprintln!("Error running native application: {}", e);
    }
}
