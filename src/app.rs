use std::{cell::Cell, path::PathBuf, rc::Rc, sync::Arc, thread};

use eframe::egui;
use egui::{mutex::RwLock, Button, CentralPanel, Sense, SidePanel, TopBottomPanel, Ui, Vec2};
use log::{debug, error, info};
use pie_view::{
    analyzer::{Analyzer, Scan},
    config::PieConfig,
    pie_chart::to_color32,
    stats::{Category, UsageSource},
    utils::bytes_to_human,
    PieChart, PieView, PieViewDelegate,
};

/// Seconds between pie reloads while a scan is still running.
const RELOAD_INTERVAL: f64 = 0.5;

/// Remembers which category the user picked in the pie.
#[derive(Default)]
struct SelectionTracker {
    selected: Cell<Option<usize>>,
}

impl PieViewDelegate for SelectionTracker {
    fn will_select_slice(&self, _view: &PieView, index: usize) {
        debug!("selecting slice {}", index);
    }

    fn did_select_slice(&self, _view: &PieView, index: usize) {
        if let Some(category) = Category::ALL.get(index) {
            info!("selected {}", category.label());
        }
        self.selected.set(Some(index));
    }

    fn will_deselect_slice(&self, _view: &PieView, index: usize) {
        debug!("deselecting slice {}", index);
    }

    fn did_deselect_slice(&self, _view: &PieView, _index: usize) {
        self.selected.set(None);
    }
}

pub struct App {
    scan: Arc<RwLock<Scan>>,
    analyzer: Analyzer,
    source: Rc<UsageSource>,
    selection: Rc<SelectionTracker>,
    view: PieView,
    last_reload: f64,
    showed_final: bool,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input().time;
        self.refresh(now);

        let state = self.scan.read().clone();

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Disk Usage");
        });

        SidePanel::left("controls").show(ctx, |ui| {
            let scan_button = Button::new("Scan…");
            if ui.add_enabled(!state.is_running(), scan_button).clicked() {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    self.start_scan(dir);
                }
            }
            let stop_button = Button::new("Stop");
            if ui.add_enabled(state.is_running(), stop_button).clicked() {
                self.scan.write().stop_requested = true;
            }

            ui.separator();
            self.legend(ui, &state);
        });

        CentralPanel::default().show(ctx, |ui| {
            if let Some(current_file) = &state.current_file {
                ui.label(format!("Scanning {}", state.dir));
                ui.label(format!("Usage (seen): {}", bytes_to_human(state.stats.total_bytes())));
                ui.label(current_file.clone());
            } else if let Some(completed_at) = state.completed_at {
                ui.label(format!("Scanned {}", state.dir));
                let duration = completed_at.signed_duration_since(state.started_at);
                ui.label(format!(
                    "Completed at {} (took {}.{:03}s)",
                    completed_at.format("%a %b %e %T %Y"),
                    duration.num_seconds(),
                    duration.num_milliseconds() % 1000
                ));
                ui.label(format!("Total usage: {}", bytes_to_human(state.stats.total_bytes())));
            }
            if let Some(err) = &state.error {
                ui.colored_label(egui::Color32::RED, err.as_str());
            }

            ui.separator();
            let side = ui.available_size().min_elem().max(64.0);
            ui.add(PieChart::new(&mut self.view).size(Vec2::splat(side)));
        });

        if state.is_running() {
            // still scanning, so repaint
            ctx.request_repaint();
        }
    }
}

impl App {
    pub fn run(analyzer: Analyzer, config: PieConfig) {
        let options = eframe::NativeOptions::default();

        eframe::run_native(
            "Disk Usage",
            options,
            Box::new(move |_cc| Box::new(App::new(analyzer, config))),
        );
    }

    fn new(analyzer: Analyzer, config: PieConfig) -> Self {
        let source = Rc::new(UsageSource::new());
        let selection = Rc::new(SelectionTracker::default());

        let mut view = PieView::new();
        config.apply(&mut view);
        view.set_data_source(&source);
        view.set_delegate(&selection);

        let root = analyzer.root().to_path_buf();
        let mut app = App {
            scan: Arc::new(RwLock::new(Scan::new(root.display().to_string()))),
            analyzer,
            source,
            selection,
            view,
            last_reload: f64::NEG_INFINITY,
            showed_final: false,
        };
        app.start_scan(root);
        app
    }

    fn start_scan(&mut self, dir: PathBuf) {
        *self.scan.write() = Scan::new(dir.display().to_string());
        self.showed_final = false;

        let analyzer = self.analyzer.with_root(dir);
        let scan = Arc::clone(&self.scan);
        thread::spawn(move || {
            if let Err(err) = analyzer.analyze(&scan) {
                error!("scan of {} failed: {}", analyzer.root().display(), err);
                scan.write().error = Some(err.to_string());
            }
        });
    }

    /// Pushes fresh totals into the pie every so often while scanning, and
    /// once more when the scan finishes.
    fn refresh(&mut self, now: f64) {
        let (stats, done) = {
            let scan = self.scan.read();
            (scan.stats.clone(), !scan.is_running())
        };

        let due = now - self.last_reload >= RELOAD_INTERVAL;
        if (done && !self.showed_final) || (!done && due) {
            self.source.update(stats);
            self.view.reload_data();
            self.last_reload = now;
            self.showed_final = done;
        }
    }

    fn legend(&mut self, ui: &mut Ui, state: &Scan) {
        let total = state.stats.total_bytes();

        for category in Category::ALL {
            let index = category.index();
            let bytes = state.stats.total(category);
            let share = if total > 0 {
                100.0 * bytes as f64 / total as f64
            } else {
                0.0
            };

            ui.horizontal(|ui| {
                let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                let color = to_color32(self.view.color_for_slice(index));
                ui.painter().rect_filled(swatch, 2.0, color);

                let selected = self.selection.selected.get() == Some(index);
                let text = format!("{} {} ({:.1}%)", category.label(), bytes_to_human(bytes), share);
                if ui.selectable_label(selected, text).clicked() {
                    if selected {
                        self.view.deselect_slice(index);
                    } else {
                        self.view.select_slice(index);
                    }
                }
            });
        }
    }
}
