mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::anyhow;
use app::DashboardApp;
use clap::Parser;
use data::filter::FilterSelection;
use eframe::egui;
use state::AppState;

const DEFAULT_SOURCE: &str = "kecanduan_siswa_terhadap_medsos.csv";

#[derive(Parser, Debug)]
#[command(name = "student-social-dashboard")]
#[command(about = "Explore student social-media usage, sleep and mental health", long_about = None)]
struct Cli {
    /// Survey CSV (12 columns, positional)
    #[arg(long, env = "DASHBOARD_DATA", default_value = DEFAULT_SOURCE)]
    data: PathBuf,

    /// Write the dashboard view as JSON and exit without opening a window
    #[arg(long)]
    export: Option<PathBuf>,

    /// Countries to include in the export (repeatable; none = all)
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Academic levels to include in the export (repeatable; none = all)
    #[arg(long = "level")]
    levels: Vec<String>,

    /// Genders to include in the export (repeatable; none = all)
    #[arg(long = "gender")]
    genders: Vec<String>,
}

impl Cli {
    fn selection(&self) -> FilterSelection {
        FilterSelection {
            countries: self.countries.iter().cloned().collect(),
            academic_levels: self.levels.iter().cloned().collect(),
            genders: self.genders.iter().cloned().collect(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(out) = &cli.export {
        export::run_headless(&cli.data, &cli.selection(), out)?;
        println!("View written to {}.", out.display());
        return Ok(());
    }

    let mut state = AppState::new(&cli.data);
    state.open(&cli.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Social-Media Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("failed to start the dashboard window: {e}"))
}
