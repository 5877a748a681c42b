use std::{process, rc::Rc};

use egui::mutex::RwLock;
use log::error;
use pie_view::{
    analyzer::{Analyzer, Scan},
    config::PieConfig,
    stats::UsageSource,
    PieError, PieView,
};

use crate::app::App;

mod app;
mod cli;

fn main() {
    env_logger::init();
    let args = cli::get_args();

    let mut config = match PieConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };
    if let Some(speed) = args.animation_speed {
        config.animation_speed = speed;
    }

    let analyzer = match Analyzer::new(args.root(), &args.ignore, args.hidden) {
        Ok(analyzer) => analyzer,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    if args.report {
        if let Err(err) = report(&analyzer, &config) {
            error!("{}", err);
            process::exit(1);
        }
        return;
    }

    App::run(analyzer, config);
}

/// Scans in the foreground and prints the pie as a table.
fn report(analyzer: &Analyzer, config: &PieConfig) -> Result<(), PieError> {
    let scan = RwLock::new(Scan::new(analyzer.root().display().to_string()));
    analyzer.analyze(&scan)?;

    let source = Rc::new(UsageSource::new());
    source.update(scan.read().stats.clone());

    let mut view = PieView::new();
    config.apply(&mut view);
    view.set_data_source(&source);
    view.reload_data();

    println!("Scanned {}", analyzer.root().display());
    source.print_breakdown(&view);
    Ok(())
}
