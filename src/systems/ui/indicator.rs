use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

// short status message that fades out at the bottom of the screen
#[derive(Resource)]
pub struct Toast {
    pub message: String,
    pub timer: f32,
    pub duration: f32,
}

impl Default for Toast {
    fn default() -> Self {
        Self {
            message: String::new(),
            timer: 0.0,
            duration: 2.5,
        }
    }
}

impl Toast {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.timer = self.duration;
    }

    pub fn tick(&mut self, delta_secs: f32) {
        self.timer = (self.timer - delta_secs).max(0.0);
    }

    pub fn alpha(&self) -> f32 {
        (self.timer / self.duration).clamp(0.0, 1.0)
    }

    pub fn visible(&self) -> bool {
        self.timer > 0.0
    }
}

#[derive(Event)]
pub struct ToastEvent(pub String);

pub fn update_toast(
    mut toast: ResMut<Toast>,
    mut events: EventReader<ToastEvent>,
    time: Res<Time>,
) {
    // newest message wins
    if let Some(event) = events.read().last() {
        toast.show(event.0.clone());
    }

    if toast.visible() {
        toast.tick(time.delta_secs());
    }
}

pub fn render_toast(
    toast: Res<Toast>,
    mut contexts: EguiContexts,
) {
    if !toast.visible() {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        // hold full opacity for the first half, then fade
        let alpha = (toast.alpha() * 2.0).clamp(0.0, 1.0);
        let bg_color = egui::Color32::from_rgb(40, 44, 52);

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(
                        bg_color.r(), bg_color.g(), bg_color.b(),
                        (220.0 * alpha) as u8
                    ))
                    .stroke(egui::Stroke::new(
                        1.5,
                        egui::Color32::from_rgba_unmultiplied(217, 33, 42, (200.0 * alpha) as u8)
                    ))
                    .inner_margin(egui::Margin::symmetric(14, 8))
                    .corner_radius(egui::CornerRadius::same(6));

                frame.show(ui, |ui| {
                    ui.label(egui::RichText::new(&toast.message)
                        .size(15.0)
                        .color(egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8)));
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fades_and_expires() {
        let mut toast = Toast::default();
        assert!(!toast.visible());

        toast.show("Saved");
        assert_eq!(toast.alpha(), 1.0);

        toast.tick(toast.duration / 2.0);
        assert!((toast.alpha() - 0.5).abs() < 1e-6);

        toast.tick(10.0);
        assert!(!toast.visible());
        assert_eq!(toast.timer, 0.0);
    }
}
