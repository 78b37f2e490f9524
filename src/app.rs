use crate::classifier::Classification;
use crate::error::ClassifyError;
use crate::event::AppEvent;
use crate::growth::PlantState;
use crate::session::{Session, SubmitRejected, TurnId};
use crate::theme::Theme;
use crate::ui::{chat, plant};
use crate::worker::ClassifierWorker;
use eframe::egui::{self, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::warn;

const GROW_STEP: f64 = 15.0;
const ANIMATION_FRAME: Duration = Duration::from_millis(33);

pub struct SproutApp {
    rx: Receiver<AppEvent>,
    worker: ClassifierWorker,
    session: Session,
    theme: Theme,
    input_buffer: String,
    show_test_controls: bool,
    diagnostics_log: Vec<String>,
    scroll_to_bottom: bool,
    started: Instant,
}

impl SproutApp {
    pub fn new(
        ctx: &egui::Context,
        rx: Receiver<AppEvent>,
        worker: ClassifierWorker,
        session: Session,
    ) -> Self {
        let theme = Theme::default();
        theme.apply_visuals(ctx);

        let mut app = Self {
            rx,
            worker,
            session,
            theme,
            input_buffer: String::new(),
            show_test_controls: false,
            diagnostics_log: Vec::new(),
            scroll_to_bottom: false,
            started: Instant::now(),
        };
        let classifier = app.worker.classifier_name();
        app.log_diagnostic(format!("using {classifier} classifier"));
        app
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn submit_message(&mut self, ctx: &egui::Context) {
        match self.session.submit(&self.input_buffer) {
            Ok(turn) => {
                self.log_diagnostic(format!("turn {} submitted", turn.id.0));
                self.worker.dispatch(turn);
                self.input_buffer.clear();
                self.scroll_to_bottom = true;
                ctx.request_repaint();
            }
            Err(SubmitRejected::Empty) => {}
            Err(SubmitRejected::Busy) => {
                self.log_diagnostic("still waiting for the previous reply");
            }
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event, ctx),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.session.is_composing() {
                        warn!("classifier channel disconnected with a turn in flight");
                    }
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent, ctx: &egui::Context) {
        match event {
            AppEvent::ClassificationFinished { turn, outcome } => {
                let line = complete_turn(&mut self.session, turn, outcome);
                self.log_diagnostic(line);
                self.scroll_to_bottom = true;
                ctx.request_repaint();
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Sprout");
                ui.separator();
                ui.label(
                    RichText::new(format!("{} classifier", self.worker.classifier_name()))
                        .color(self.theme.text_muted),
                );
            });
        });
    }

    fn render_plant_panel(&mut self, ctx: &egui::Context) {
        let state = PlantState::from_health(self.session.health());
        let seconds = self.elapsed_seconds();

        egui::SidePanel::left("plant_panel")
            .resizable(true)
            .default_width(ctx.screen_rect().width() / 2.0)
            .show(ctx, |ui| {
                self.theme.card_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.heading("Growth Visualization");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let label = if self.show_test_controls {
                                "Hide Test Controls"
                            } else {
                                "Show Test Controls"
                            };
                            if ui.small_button(label).clicked() {
                                self.show_test_controls = !self.show_test_controls;
                            }
                        });
                    });
                    ui.separator();

                    let plant_size = egui::vec2(
                        ui.available_width(),
                        (ui.available_height() - 160.0).max(200.0),
                    );
                    ui.allocate_ui(plant_size, |ui| {
                        plant::paint_plant(ui, &state, seconds, &self.theme);
                    });

                    let health = self.session.health();
                    ui.add(
                        egui::ProgressBar::new((health / 100.0) as f32)
                            .fill(self.theme.health_fill)
                            .desired_height(8.0),
                    );
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(format!("Plant Health: {health:.1}%"))
                                .color(self.theme.text_muted)
                                .small(),
                        );
                    });

                    if self.show_test_controls {
                        self.render_test_controls(ui);
                    }
                });
            });

        if state.sway {
            ctx.request_repaint_after(ANIMATION_FRAME);
        }
    }

    fn render_test_controls(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.label(RichText::new("Test Controls").strong());
        let mut adjustment = None;
        ui.columns(2, |columns| {
            let wilt_label = RichText::new("− Wilt Plant").color(self.theme.wilt_text);
            let wilt = egui::Button::new(wilt_label).fill(self.theme.wilt_fill);
            let width = columns[0].available_width();
            if columns[0].add_sized([width, 32.0], wilt).clicked() {
                adjustment = Some(-GROW_STEP);
            }
            let grow_label = RichText::new("+ Grow Plant").color(self.theme.grow_text);
            let grow = egui::Button::new(grow_label).fill(self.theme.grow_fill);
            if columns[1].add_sized([width, 32.0], grow).clicked() {
                adjustment = Some(GROW_STEP);
            }
        });
        if let Some(delta) = adjustment {
            let health = self.session.adjust_health(delta);
            self.log_diagnostic(format!("manual adjustment {delta:+.0} -> {health:.1}"));
        }

        if let Some(target) = health_slider(ui, self.session.health()) {
            self.session.set_health(target);
        }
    }

    fn render_chat_panel(&mut self, ctx: &egui::Context) {
        let seconds = self.elapsed_seconds();
        let composing = self.session.is_composing();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("CBT Therapy Chat");
            ui.separator();

            let transcript_height = (ui.available_height() - 150.0).max(120.0);
            ScrollArea::vertical()
                .id_salt("chat_transcript")
                .max_height(transcript_height)
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for message in self.session.messages() {
                        chat::message_bubble(ui, message, &self.theme);
                    }
                    if composing {
                        chat::typing_indicator(ui, seconds, &self.theme);
                    }
                    if self.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
            self.scroll_to_bottom = false;

            ui.separator();
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(RichText::new(entry).small());
                            }
                        });
                });

            let hint = if composing {
                "Waiting for response..."
            } else {
                "Type your message..."
            };
            let mut send_now = false;
            self.theme.composer_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let input_width = ui.available_width() - 70.0;
                    let response = ui.add_enabled(
                        !composing,
                        egui::TextEdit::singleline(&mut self.input_buffer)
                            .desired_width(input_width)
                            .hint_text(hint),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }
                    let clicked = ui
                        .add_enabled(
                            !composing && !self.input_buffer.trim().is_empty(),
                            egui::Button::new("Send"),
                        )
                        .clicked();
                    send_now |= clicked;
                });
            });

            if send_now {
                self.submit_message(ctx);
            }
        });

        if composing {
            ctx.request_repaint_after(ANIMATION_FRAME);
        }
    }
}

/// Applies a finished turn and returns the diagnostics line for it. Stale
/// turns only report that they were dropped.
fn complete_turn(
    session: &mut Session,
    turn: TurnId,
    outcome: Result<Classification, ClassifyError>,
) -> String {
    let summary = match &outcome {
        Ok(classification) => format!(
            "turn {} classified: delta {:+.1}",
            turn.0, classification.delta
        ),
        Err(err) => format!("turn {} failed: {err}", turn.0),
    };
    if session.complete(turn, outcome) {
        summary
    } else {
        format!("turn {} result dropped (stale)", turn.0)
    }
}

/// Health slider for the test controls. The slider snaps its bound value to
/// the step grid on its own, so only a change the user made is returned.
fn health_slider(ui: &mut egui::Ui, health: f64) -> Option<f64> {
    let mut target = health;
    let slider = ui.add(egui::Slider::new(&mut target, 0.0..=99.9).step_by(0.1));
    let touched = slider.dragged() || slider.clicked() || slider.has_focus();
    (slider.changed() && touched).then_some(target)
}

impl eframe::App for SproutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        self.render_top_bar(ctx);
        self.render_plant_panel(ctx);
        self.render_chat_panel(ctx);
    }
}
