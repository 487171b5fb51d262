// InternDesk - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the screens, the fetch worker, and session persistence.

use crate::app::fetch::{FetchManager, Screen};
use crate::app::session::{self, SessionData};
use crate::app::state::AppState;
use crate::ui;
use crate::util::error::ExportError;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Repaint interval while requests are outstanding.
const BUSY_REPAINT: Duration = Duration::from_millis(50);

/// The InternDesk application.
pub struct InternDeskApp {
    pub state: AppState,
    pub fetch: FetchManager,
    session_path: PathBuf,
    api_base: String,
    font_size: f32,
}

impl InternDeskApp {
    pub fn new(
        state: AppState,
        fetch: FetchManager,
        session_path: PathBuf,
        api_base: String,
        font_size: f32,
    ) -> Self {
        Self {
            state,
            fetch,
            session_path,
            api_base,
            font_size,
        }
    }

    fn today() -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Hand queued requests to the worker.
    fn dispatch_requests(&mut self) {
        for request in self.state.take_requests() {
            self.fetch.submit(request);
        }
    }

    fn switch_to(&mut self, screen: Screen) {
        if self.state.active_screen == screen {
            return;
        }
        self.state.active_screen = screen;
        // Each screen reloads when it is opened.
        self.state.refresh(screen, Self::today());
    }

    fn save_session(&self) {
        let data = SessionData::capture(&self.state);
        if let Err(e) = session::save(&data, &self.session_path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    fn export(&mut self, json: bool) {
        let (filter_name, ext) = if json { ("JSON", "json") } else { ("CSV", "csv") };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, &[ext])
            .set_file_name(format!("interns.{ext}"))
            .save_file()
        else {
            return;
        };

        let visible = self.state.interns.visible();
        match write_export(&visible, &dest, json) {
            Ok(n) => {
                tracing::info!(path = %dest.display(), interns = n, "Roster exported");
                self.state.status_message = format!("Exported {n} interns to {filter_name}.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Roster export failed");
                self.state.status_message = format!("{filter_name} export failed: {e}");
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_interns = !self.state.interns.filtered.is_empty();
                    ui.add_enabled_ui(has_interns, |ui| {
                        ui.menu_button("Export roster", |ui| {
                            if ui.button("CSV\u{2026}").clicked() {
                                self.export(false);
                                ui.close_menu();
                            }
                            if ui.button("JSON\u{2026}").clicked() {
                                self.export(true);
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Refresh all (F5)").clicked() {
                        self.state.refresh_all(Self::today());
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.checkbox(&mut self.state.dark_mode, "Dark mode").changed() {
                        ui::theme::apply(ctx, self.state.dark_mode, self.font_size);
                    }
                    ui.checkbox(&mut self.state.animations, "Animations");
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn tab_bar(&mut self, ctx: &egui::Context) {
        let mut selected = None;
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for &screen in Screen::all() {
                    let label = match screen {
                        Screen::Notifications if self.state.notifications.unread_count > 0 => {
                            format!("{} ({})", screen.label(), self.state.notifications.unread_count)
                        }
                        _ => screen.label().to_string(),
                    };
                    let active = self.state.active_screen == screen;
                    let text = egui::RichText::new(label).size(15.0);
                    let text = if active {
                        text.strong().color(ui::theme::ACCENT)
                    } else {
                        text
                    };
                    if ui.selectable_label(active, text).clicked() {
                        selected = Some(screen);
                    }
                }
            });
        });
        if let Some(screen) = selected {
            self.switch_to(screen);
        }
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.fetch.is_busy() {
                    ui.spinner();
                }
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.state.warnings.is_empty() {
                        let tip = self.state.warnings.join("\n");
                        ui.colored_label(
                            ui::theme::WARNING,
                            format!("\u{26a0} {} config warning(s)", self.state.warnings.len()),
                        )
                        .on_hover_text(tip);
                    }
                });
            });
        });
    }
}

fn write_export(
    interns: &[&crate::core::model::Intern],
    dest: &Path,
    json: bool,
) -> Result<usize, ExportError> {
    let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;
    if json {
        crate::core::export::export_json(interns, file, dest)
    } else {
        crate::core::export::export_csv(interns, file, dest)
    }
}

impl eframe::App for InternDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        for result in self.fetch.poll_results() {
            self.state.apply_result(result, now);
        }

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.state.refresh_all(Self::today());
        }

        self.menu_bar(ctx);
        self.tab_bar(ctx);
        self.status_bar(ctx);

        let today = Self::today();
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_screen {
            Screen::Dashboard => ui::panels::dashboard::render(ui, &mut self.state, now),
            Screen::Interns => ui::panels::interns::render(ui, &mut self.state, today),
            Screen::Notifications => ui::panels::notifications::render(ui, &mut self.state),
        });

        ui::panels::intern_modal::render(ctx, &mut self.state);
        ui::panels::alert::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state, &self.api_base);

        // Clicks made this frame go out immediately.
        self.dispatch_requests();

        if self.state.dashboard.is_animating(now) {
            ctx.request_repaint();
        } else if self.fetch.is_busy() || self.state.is_loading() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }

    /// Save the session so the next launch reopens the same screen.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_session();
    }
}
