use crate::session::{Message, MessageKind, Sender};
use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub border_subtle: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub accent_primary: Color32,
    pub user_bubble: Color32,
    pub therapist_bubble: Color32,
    pub onboarding_bubble: Color32,
    pub onboarding_border: Color32,
    pub health_fill: Color32,
    pub wilt_fill: Color32,
    pub wilt_text: Color32,
    pub grow_fill: Color32,
    pub grow_text: Color32,
    pub pot_outer: Color32,
    pub pot_inner: Color32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub radius_8: u8,
    pub radius_12: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            surface_1: Color32::WHITE,
            surface_2: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            border_subtle: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            text_primary: Color32::from_rgb(0x11, 0x18, 0x27),
            text_muted: Color32::from_rgb(0x4B, 0x55, 0x63),
            text_on_accent: Color32::WHITE,
            accent_primary: Color32::from_rgb(0x3B, 0x82, 0xF6),
            user_bubble: Color32::from_rgb(0x3B, 0x82, 0xF6),
            therapist_bubble: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            onboarding_bubble: Color32::from_rgb(0xDC, 0xFC, 0xE7),
            onboarding_border: Color32::from_rgb(0x86, 0xEF, 0xAC),
            health_fill: Color32::from_rgb(0x22, 0xC5, 0x5E),
            wilt_fill: Color32::from_rgb(0xFE, 0xE2, 0xE2),
            wilt_text: Color32::from_rgb(0xB9, 0x1C, 0x1C),
            grow_fill: Color32::from_rgb(0xDC, 0xFC, 0xE7),
            grow_text: Color32::from_rgb(0x15, 0x80, 0x3D),
            pot_outer: Color32::from_rgb(0x8B, 0x45, 0x13),
            pot_inner: Color32::from_rgb(0xA0, 0x52, 0x2D),
            spacing_12: 12.0,
            spacing_16: Self::P16,
            radius_8: Self::R8,
            radius_12: Self::R12,
        }
    }
}

impl Theme {
    pub const R8: u8 = 8;
    pub const R12: u8 = 12;
    pub const P16: f32 = 16.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_0;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface_1;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.weak_bg_fill = self.surface_2;
        visuals.widgets.hovered.bg_fill = self.border_subtle;
        visuals.widgets.active.bg_fill = self.accent_primary;
        visuals.selection.bg_fill = self.accent_primary;
        visuals.window_fill = self.surface_1;
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(18.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32, inner_padding: i8) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(inner_padding))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::NONE)
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 16,
                spread: 0,
                color: Color32::from_rgba_premultiplied(0, 0, 0, 24),
            })
    }

    pub fn card_frame(&self) -> Frame {
        self.panel_frame(self.surface_1, self.spacing_16 as i8)
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_1)
            .inner_margin(Margin::symmetric(self.spacing_12 as i8, 8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    /// Bubble fill and text colour: user right in blue, onboarding tinted green,
    /// other therapist replies grey.
    pub fn bubble_colors(&self, message: &Message) -> (Color32, Color32, Stroke) {
        match (message.sender, message.kind) {
            (Sender::User, _) => (self.user_bubble, self.text_on_accent, Stroke::NONE),
            (Sender::Therapist, MessageKind::Onboarding) => (
                self.onboarding_bubble,
                self.text_primary,
                Stroke::new(1.0, self.onboarding_border),
            ),
            (Sender::Therapist, MessageKind::Conversation) => {
                (self.therapist_bubble, self.text_primary, Stroke::NONE)
            }
        }
    }

    pub fn bubble_frame(&self, message: &Message) -> Frame {
        let (fill, _, stroke) = self.bubble_colors(message);
        Frame::new()
            .fill(fill)
            .stroke(stroke)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;
    use crate::session::{MessageKind, Sender, Session};

    #[test]
    fn onboarding_bubbles_are_tinted() {
        let theme = Theme::default();
        let session = Session::default();
        let intro = &session.messages()[0];
        assert_eq!(intro.kind, MessageKind::Onboarding);
        let (fill, _, stroke) = theme.bubble_colors(intro);
        assert_eq!(fill, theme.onboarding_bubble);
        assert_eq!(stroke.color, theme.onboarding_border);
    }

    #[test]
    fn user_bubbles_use_accent() {
        let theme = Theme::default();
        let mut session = Session::default();
        session.submit("hi").expect("accepted");
        let message = &session.messages()[1];
        assert_eq!(message.sender, Sender::User);
        let (fill, text, _) = theme.bubble_colors(message);
        assert_eq!(fill, theme.user_bubble);
        assert_eq!(text, theme.text_on_accent);
    }
}
