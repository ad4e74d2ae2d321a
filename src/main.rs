mod app;
mod storage;

use app::MathDrillApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 460.0])
            .with_min_inner_size([350.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Math Drill",
        options,
        Box::new(|cc| Ok(Box::new(MathDrillApp::new(cc)))),
    )
}
