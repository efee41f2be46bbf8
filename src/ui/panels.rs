// src/ui/panels.rs
//! UI panels: the description overlay, the chat window, and the
//! scene-generation controls.
//!
//! Panels are pure over their state structs and return the action the user
//! triggered (if any); the application performs the side effects. This keeps
//! network and scene mutation out of the UI layer.

use imgui::Condition;

/// State of the proximity description overlay.
///
/// Driven entirely by interaction-engine focus changes: `show` on enter,
/// `hide` on leave.
#[derive(Debug, Default)]
pub struct OverlayState {
    visible: bool,
    title: String,
    body: String,
}

/// Overlay text used when a focused object has no description.
pub const MISSING_DESCRIPTION: &str = "No description available.";

impl OverlayState {
    pub fn show(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.title = title.into();
        self.body = body.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Draws the description overlay at the bottom center of the display.
pub fn description_overlay(ui: &imgui::Ui, overlay: &OverlayState) {
    if !overlay.visible {
        return;
    }
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    let width = (display_size[0] * 0.4).clamp(320.0, 560.0);
    ui.window("##description_overlay")
        .position(
            [display_size[0] * 0.5 - width * 0.5, display_size[1] - 140.0],
            Condition::Always,
        )
        .size([width, 0.0], Condition::Always)
        .title_bar(false)
        .resizable(false)
        .movable(false)
        .bg_alpha(0.72)
        .build(|| {
            ui.text(&overlay.title);
            ui.separator();
            ui.text_wrapped(&overlay.body);
        });
}

/// One line of chat history.
#[derive(Debug, Clone)]
pub struct ChatLine {
    pub from_user: bool,
    pub text: String,
}

/// Chat window state.
#[derive(Debug, Default)]
pub struct ChatState {
    pub input: String,
    pub lines: Vec<ChatLine>,
    /// A request is in flight; input stays open, sending is disabled.
    pub waiting: bool,
}

impl ChatState {
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.lines.push(ChatLine {
            from_user: true,
            text: text.into(),
        });
    }

    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.lines.push(ChatLine {
            from_user: false,
            text: text.into(),
        });
    }
}

/// Draws the chat panel; returns a message when the user sends one.
pub fn chat_panel(ui: &imgui::Ui, state: &mut ChatState) -> Option<String> {
    let display_size = ui.io().display_size;
    let mut sent = None;

    ui.window("Assistant")
        .size([360.0, 320.0], Condition::FirstUseEver)
        .position(
            [display_size[0] - 380.0, display_size[1] - 340.0],
            Condition::FirstUseEver,
        )
        .build(|| {
            ui.child_window("##chat_history")
                .size([0.0, -34.0])
                .build(|| {
                    for line in &state.lines {
                        if line.from_user {
                            ui.text_colored([0.55, 0.78, 1.0, 1.0], "You:");
                        } else {
                            ui.text_colored([0.65, 1.0, 0.7, 1.0], "Assistant:");
                        }
                        ui.same_line();
                        ui.text_wrapped(&line.text);
                    }
                    // Follow the newest message
                    if ui.scroll_y() >= ui.scroll_max_y() - 1.0 {
                        ui.set_scroll_here_y_with_ratio(1.0);
                    }
                });

            let entered = ui
                .input_text("##chat_input", &mut state.input)
                .enter_returns_true(true)
                .hint("Ask about the room...")
                .build();
            ui.same_line();
            let clicked = ui.button("Send");

            if (entered || clicked) && !state.waiting {
                let message = state.input.trim().to_string();
                if !message.is_empty() {
                    state.input.clear();
                    sent = Some(message);
                }
            }
            if state.waiting {
                ui.text_disabled("waiting for reply...");
            }
        });

    sent
}

/// Scene-generation panel state.
#[derive(Debug, Default)]
pub struct GenerateState {
    pub prompt: String,
    pub status: String,
    pub busy: bool,
}

/// Action requested from the generation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateAction {
    Generate(String),
    ClearScene,
}

/// Draws the generation panel; returns the triggered action, if any.
pub fn generate_panel(ui: &imgui::Ui, state: &mut GenerateState) -> Option<GenerateAction> {
    let mut action = None;

    ui.window("Generate")
        .size([340.0, 150.0], Condition::FirstUseEver)
        .position([20.0, 20.0], Condition::FirstUseEver)
        .build(|| {
            let entered = ui
                .input_text("##generate_prompt", &mut state.prompt)
                .enter_returns_true(true)
                .hint("a red armchair")
                .build();
            ui.same_line();
            let clicked = ui.button("Generate");

            if entered || clicked {
                let prompt = state.prompt.trim().to_string();
                if !prompt.is_empty() {
                    action = Some(GenerateAction::Generate(prompt));
                }
            }

            if ui.button("Clear room") {
                action = Some(GenerateAction::ClearScene);
            }

            if state.busy {
                ui.text_disabled("generating...");
            } else if !state.status.is_empty() {
                ui.text_wrapped(&state.status);
            }
        });

    action
}
