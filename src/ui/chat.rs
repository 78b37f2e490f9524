use crate::session::{Message, Sender};
use crate::theme::Theme;
use egui::{Align, Layout, RichText, Ui};

const BUBBLE_WIDTH_FRACTION: f32 = 0.7;

pub fn message_bubble(ui: &mut Ui, message: &Message, theme: &Theme) {
    let (_, text_color, _) = theme.bubble_colors(message);
    let max_width = ui.available_width() * BUBBLE_WIDTH_FRACTION;
    let layout = match message.sender {
        Sender::User => Layout::right_to_left(Align::TOP),
        Sender::Therapist => Layout::left_to_right(Align::TOP),
    };

    ui.push_id(message.id.0, |ui| {
        ui.with_layout(layout, |ui| {
            theme.bubble_frame(message).show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(RichText::new(&message.text).color(text_color));
            });
        });
    });
}

/// "Therapist is typing" with one to three dots cycling over time.
pub fn typing_label(seconds: f64) -> String {
    let dots = (seconds * 3.0).floor().rem_euclid(3.0) as usize + 1;
    format!("Therapist is typing{}", ".".repeat(dots))
}

pub fn typing_indicator(ui: &mut Ui, seconds: f64, theme: &Theme) {
    ui.with_layout(Layout::left_to_right(Align::TOP), |ui| {
        ui.label(
            RichText::new(typing_label(seconds))
                .italics()
                .color(theme.text_muted),
        );
    });
}
