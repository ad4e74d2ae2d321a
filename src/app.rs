use crate::storage::{self, AppStore};
use drill_core::level::target_range;
use drill_core::{Feedback, LevelRequirement, Phase, RoundController, RoundState};
use eframe::egui;
use std::time::Instant;

const GREEN: egui::Color32 = egui::Color32::from_rgb(34, 139, 34);
const RED: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);
const AMBER: egui::Color32 = egui::Color32::from_rgb(218, 165, 32);

struct ShownFeedback {
    feedback: Feedback,
    shown_at: Instant,
}

pub struct MathDrillApp {
    controller: RoundController<AppStore>,
    answer_input: String,
    feedback: Option<ShownFeedback>,
}

impl Default for MathDrillApp {
    fn default() -> Self {
        Self {
            controller: RoundController::new(AppStore::open(), storage::load_config()),
            answer_input: String::new(),
            feedback: None,
        }
    }
}

impl MathDrillApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn start_round(&mut self) {
        self.controller.start_round();
        self.answer_input.clear();
        self.feedback = None;
    }

    fn submit_answer(&mut self) {
        let Some(feedback) = self.controller.submit_answer(&self.answer_input) else {
            return;
        };
        if feedback.is_correct.is_some() {
            self.answer_input.clear();
        }
        self.feedback = Some(ShownFeedback {
            feedback,
            shown_at: Instant::now(),
        });
    }

    fn expire_feedback(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(shown) = &self.feedback else {
            return;
        };
        let elapsed = now.duration_since(shown.shown_at);
        if elapsed >= shown.feedback.clear_after {
            self.feedback = None;
        } else {
            ctx.request_repaint_after(shown.feedback.clear_after - elapsed);
        }
    }

    fn intro(&mut self, ui: &mut egui::Ui, state: &RoundState, req: &LevelRequirement) {
        ui.label("Mixed operations (+ - × ÷)");
        ui.label(format!("Answers will be between 0 and {}", target_range(state.level)));
        ui.label(format!(
            "Answer {}+ questions in {} seconds",
            req.min_correct,
            self.controller.config().round_secs
        ));
        ui.label(format!("No more than {} mistakes", req.max_mistakes));
        ui.add_space(20.0);

        if ui
            .add_sized([160.0, 40.0], egui::Button::new("Start Level"))
            .clicked()
        {
            self.start_round();
        }
    }

    fn round(&mut self, ui: &mut egui::Ui, state: &RoundState) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("Correct: {}", state.correct_answers)).color(GREEN));
            ui.separator();
            ui.label(egui::RichText::new(format!("Mistakes: {}", state.mistakes)).color(RED));
        });
        ui.add_space(20.0);

        let Some(problem) = state.current_problem else {
            return;
        };
        ui.label(egui::RichText::new(problem.display()).size(48.0).strong());
        ui.add_space(20.0);

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.answer_input)
                .hint_text("Enter your answer")
                .font(egui::TextStyle::Heading)
                .desired_width(150.0)
                .horizontal_align(egui::Align::Center),
        );

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.submit_answer();
        }

        response.request_focus();

        ui.add_space(15.0);

        if ui
            .add_sized([120.0, 40.0], egui::Button::new("Submit"))
            .clicked()
        {
            self.submit_answer();
        }
    }

    fn summary(&mut self, ui: &mut egui::Ui) {
        let Some(summary) = self.controller.last_summary().cloned() else {
            return;
        };

        let (title, color) = if summary.passed() {
            ("Level Complete!", GREEN)
        } else {
            ("Level Failed", RED)
        };
        ui.label(egui::RichText::new(title).size(32.0).color(color));
        ui.add_space(10.0);

        let mark = |ok: bool| if ok { "✓" } else { "✗" };
        ui.label(format!(
            "Questions Answered: {}/{} {}",
            summary.correct_answers,
            summary.requirement.min_correct,
            mark(summary.correct_met())
        ));
        ui.label(format!(
            "Mistakes: {}/{} {}",
            summary.mistakes,
            summary.requirement.max_mistakes,
            mark(summary.mistakes_met())
        ));
        if summary.new_level != summary.level_played {
            ui.label(format!("Level {} → {}", summary.level_played, summary.new_level));
        }
        ui.label(
            egui::RichText::new(format!(
                "Finished at {}",
                summary.finished_at.with_timezone(&chrono::Local).format("%H:%M:%S")
            ))
            .small(),
        );
        ui.add_space(20.0);

        let label = if summary.passed() {
            "Start Next Level"
        } else {
            "Retry Level"
        };
        if ui
            .add_sized([160.0, 40.0], egui::Button::new(label))
            .clicked()
        {
            self.start_round();
        }
    }
}

impl eframe::App for MathDrillApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.poll_timer(now);
        if let Some(wait) = self.controller.until_next_tick(now) {
            ctx.request_repaint_after(wait);
        }
        self.expire_feedback(ctx, now);

        let state = self.controller.state().clone();
        let req = self.controller.requirement();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading("Math Drill");
                ui.horizontal(|ui| {
                    ui.label(format!("Level {}", state.level));
                    if state.phase == Phase::Active {
                        ui.separator();
                        ui.label(format!("⏱ {}s", state.time_left_secs));
                    }
                });
                ui.add_space(30.0);

                match state.phase {
                    Phase::Idle => self.intro(ui, &state, &req),
                    Phase::Active => self.round(ui, &state),
                    Phase::Complete => self.summary(ui),
                }

                if let Some(shown) = &self.feedback {
                    let color = match shown.feedback.is_correct {
                        Some(true) => GREEN,
                        Some(false) => RED,
                        None => AMBER,
                    };
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new(shown.feedback.message)
                            .size(24.0)
                            .color(color),
                    );
                }
            });
        });
    }
}
