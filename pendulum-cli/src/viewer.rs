//! Interactive viewer for the pendulum chain
//!
//! Owns the configuration controls and the frame tick. The simulation runs
//! in canvas pixels with the pivot at the horizontal midpoint of the canvas.
//! When started with `--config`, the file is watched and every edit rebuilds
//! the chain from the new values.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use pendulum_core::config::{ANGLE_RANGE, BOB_COUNT_RANGE, DRAG_RANGE, LENGTH_RANGE, MASS_RANGE};
use pendulum_core::glam::DVec2;
use pendulum_core::{ChainConfig, FixedStepClock, Simulation, TIME_STEP};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Distance of the pivot below the top of the canvas, in pixels
pub const PIVOT_TOP: f64 = 50.0;
const BOB_RADIUS: f32 = 10.0;
/// Upper bound on catch-up steps after a slow frame
const MAX_STEPS_PER_FRAME: u32 = 8;

pub struct PendulumApp {
    config_path: Option<PathBuf>,
    /// Values bound to the controls. Drag is read every tick; the rest
    /// take effect on the next start.
    config: ChainConfig,
    sim: Simulation,
    playing: bool,
    clock: FixedStepClock,
    canvas_width: Option<f32>,
    last_load_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl PendulumApp {
    pub fn new(
        config: ChainConfig,
        config_path: Option<PathBuf>,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let config_path = config_path.map(|p| watch_target(&p));
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), config_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        Self {
            config_path,
            config,
            sim: Simulation::initialize(config, DVec2::new(0.0, PIVOT_TOP)),
            playing: false,
            clock: FixedStepClock::new(TIME_STEP, MAX_STEPS_PER_FRAME),
            canvas_width: None,
            last_load_error: None,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    /// Rebuild the chain from the controls and start ticking
    fn start(&mut self) {
        self.config = self.config.clamped();
        self.sim.reinitialize(self.config);
        self.clock.reset();
        self.playing = true;
    }

    fn toggle_pause(&mut self) {
        self.playing = !self.playing;
        self.clock.reset();
    }

    fn reload_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            return;
        };
        match ChainConfig::load(&path) {
            Ok(config) => {
                log::info!("reloaded {}", path.display());
                self.config = config.clamped();
                self.sim.reinitialize(self.config);
                self.clock.reset();
                self.last_load_error = None;
            }
            Err(e) => {
                self.last_load_error = Some(format!("{}", e));
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.config_path {
                        needs_reload |= is_config_event(&paths, path);
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_config();
        }
    }

    /// Keep the pivot at the canvas midpoint. A width change rebuilds the
    /// chain from the current control values.
    fn track_canvas(&mut self, width: f32) {
        if self.canvas_width != Some(width) {
            self.canvas_width = Some(width);
            self.config = self.config.clamped();
            self.sim.rebuild_at(self.config, DVec2::new(width as f64 / 2.0, PIVOT_TOP));
        }
    }

    /// Run as many fixed steps as wall-clock time allows
    fn advance(&mut self, frame_dt: f64) {
        for _ in 0..self.clock.ticks(frame_dt) {
            self.sim.step(self.config.drag);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.add(
                egui::Slider::new(&mut self.config.bob_count, BOB_COUNT_RANGE).text("bobs"),
            );
            ui.add(egui::Slider::new(&mut self.config.mass, MASS_RANGE).text("mass (kg)"));
            ui.add(
                egui::Slider::new(&mut self.config.length_m, LENGTH_RANGE).text("length (m)"),
            );
            ui.add(egui::Slider::new(&mut self.config.angle_deg, ANGLE_RANGE).text("angle (°)"));
            ui.add(
                egui::Slider::new(&mut self.config.drag, DRAG_RANGE)
                    .step_by(0.01)
                    .text("drag"),
            );

            ui.separator();

            if ui.button("▶ Start").clicked() {
                self.start();
            }
            if ui
                .button(if self.playing { "⏸ Pause" } else { "⏵ Resume" })
                .clicked()
            {
                self.toggle_pause();
            }
            if ui.button("⏭ Step").clicked() {
                self.sim.step(self.config.drag);
            }
        });
    }

    fn draw(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let to_screen = |p: DVec2| origin + egui::vec2(p.x as f32, p.y as f32);

        let positions: Vec<egui::Pos2> = self.sim.positions().into_iter().map(to_screen).collect();

        for pair in positions.windows(2) {
            painter.line_segment([pair[0], pair[1]], egui::Stroke::new(2.0, egui::Color32::BLACK));
        }
        painter.circle_filled(positions[0], 3.0, egui::Color32::BLACK);
        for &bob in &positions[1..] {
            painter.circle_filled(bob, BOB_RADIUS, egui::Color32::RED);
        }

        let energies = self.sim.energies();
        let lines = [
            format!("bobs: {}", self.sim.chain().len()),
            format!("kinetic: {:.3} J", energies.kinetic),
            format!("potential: {:.3} J", energies.potential),
            format!("mechanical: {:.3} J", energies.total()),
            format!("time: {:.2} s", self.sim.elapsed()),
        ];
        for (i, line) in lines.iter().enumerate() {
            painter.text(
                origin + egui::vec2(10.0, 10.0 + 20.0 * i as f32),
                egui::Align2::LEFT_TOP,
                line,
                egui::FontId::default(),
                egui::Color32::BLACK,
            );
        }
    }
}

impl eframe::App for PendulumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.controls(ui);
        });

        if let Some(error) = &self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                );
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.track_canvas(rect.width());

                if self.playing {
                    let frame_dt = ctx.input(|i| i.stable_dt) as f64;
                    self.advance(frame_dt);
                }

                self.draw(ui.painter(), rect.min);
            });

        if self.playing {
            ctx.request_repaint();
        }
    }
}

/// Absolute form of the config path, so it compares equal to the paths
/// notify reports. Falls back to the path as given if it cannot be resolved.
fn watch_target(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn is_config_event(paths: &[PathBuf], target: &Path) -> bool {
    paths.iter().any(|p| watch_target(p).as_path() == target)
}
