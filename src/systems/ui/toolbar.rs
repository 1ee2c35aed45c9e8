use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use bevy_rts_camera::RtsCamera;

use crate::systems::cabinet::engine::ResolvedLayout;
use crate::systems::cabinet::{ConfigHistory, CurrentLayout, DoorState, RebuildEvent, ShowMeasurements};
use crate::systems::export::{export_filename, ExportEvent};
use super::indicator::ToastEvent;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Measure,
    Doors,
    FrontView,
    Home,
    Undo,
    Redo,
    Export,
}

#[derive(Resource, Default)]
pub struct FrontView(pub bool);

const HOME_ZOOM: f32 = 0.35;
const FRONT_ZOOM: f32 = 0.75;

// Ctrl+Z / Ctrl+Y (Ctrl+Shift+Z), M measure, O doors
pub fn key_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut actions: EventWriter<ToolbarAction>,
) {
    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight, KeyCode::SuperLeft, KeyCode::SuperRight]);
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if ctrl && keyboard.just_pressed(KeyCode::KeyZ) {
        actions.write(if shift { ToolbarAction::Redo } else { ToolbarAction::Undo });
    } else if ctrl && keyboard.just_pressed(KeyCode::KeyY) {
        actions.write(ToolbarAction::Redo);
    } else if !ctrl && keyboard.just_pressed(KeyCode::KeyM) {
        actions.write(ToolbarAction::Measure);
    } else if !ctrl && keyboard.just_pressed(KeyCode::KeyO) {
        actions.write(ToolbarAction::Doors);
    }
}

pub fn render_toolbar(
    mut contexts: EguiContexts,
    mut actions: EventWriter<ToolbarAction>,
    history: Res<ConfigHistory>,
    show: Res<ShowMeasurements>,
    door_state: Res<DoorState>,
    front_view: Res<FrontView>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("toolbar"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 10.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(40, 44, 52, 220))
                    .inner_margin(egui::Margin::symmetric(8, 4))
                    .corner_radius(egui::CornerRadius::same(6))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let buttons = [
                                (ToolbarAction::Measure, "Measure", show.0, true, "Show dimension lines (M)"),
                                (ToolbarAction::Doors, "Doors", door_state.visible(), true, "Show or hide the doors (O)"),
                                (ToolbarAction::FrontView, "Front", front_view.0, true, "Look straight at the front"),
                                (ToolbarAction::Home, "Home", false, true, "Reset the camera"),
                                (ToolbarAction::Undo, "Undo", false, history.can_undo(), "Undo (Ctrl+Z)"),
                                (ToolbarAction::Redo, "Redo", false, history.can_redo(), "Redo (Ctrl+Y)"),
                                (ToolbarAction::Export, "Export", false, true, "Save the configuration as JSON"),
                            ];
                            for (action, text, selected, enabled, hint) in buttons {
                                let button = egui::Button::new(text).selected(selected);
                                if ui.add_enabled(enabled, button).on_hover_text(hint).clicked() {
                                    actions.write(action);
                                }
                            }
                        });
                    });
            });
    }
}

// focus point and zoom for the home and front views
pub fn camera_target(layout: Option<&ResolvedLayout>, front: bool) -> (Transform, f32) {
    let focus = layout
        .map(|layout| Vec3::new(layout.translation.x, 0.0, layout.translation.z))
        .unwrap_or(Vec3::ZERO);
    let zoom = if front { FRONT_ZOOM } else { HOME_ZOOM };
    (Transform::from_translation(focus), zoom)
}

pub fn handle_toolbar_action(
    mut actions: EventReader<ToolbarAction>,
    mut history: ResMut<ConfigHistory>,
    mut show: ResMut<ShowMeasurements>,
    mut door_state: ResMut<DoorState>,
    mut front_view: ResMut<FrontView>,
    mut cameras: Query<&mut RtsCamera>,
    mut rebuild: EventWriter<RebuildEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut exports: EventWriter<ExportEvent>,
    current: Res<CurrentLayout>,
) {
    for action in actions.read() {
        match action {
            ToolbarAction::Measure => {
                show.0 = !show.0;
            }
            ToolbarAction::Doors => match door_state.toggle() {
                Some(true) => {
                    toasts.write(ToastEvent("Doors shown".into()));
                }
                Some(false) => {
                    toasts.write(ToastEvent("Doors hidden, interior visible".into()));
                }
                None => {
                    toasts.write(ToastEvent("The cabinet is open, pick a door style under Doors".into()));
                }
            },
            ToolbarAction::FrontView | ToolbarAction::Home => {
                front_view.0 = *action == ToolbarAction::FrontView && !front_view.0;
                let (focus, zoom) = camera_target(current.0.as_ref(), front_view.0);
                for mut camera in cameras.iter_mut() {
                    camera.target_focus = focus;
                    camera.target_zoom = zoom;
                }
                let message = if *action == ToolbarAction::Home { "Camera reset" } else { "Camera view changed" };
                toasts.write(ToastEvent(message.into()));
            }
            ToolbarAction::Undo => {
                if history.undo() {
                    info!("undo, {} steps left", history.past_len());
                    rebuild.write(RebuildEvent);
                    toasts.write(ToastEvent("Undone".into()));
                }
            }
            ToolbarAction::Redo => {
                if history.redo() {
                    info!("redo, {} steps left", history.future_len());
                    rebuild.write(RebuildEvent);
                    toasts.write(ToastEvent("Redone".into()));
                }
            }
            ToolbarAction::Export => {
                exports.write(ExportEvent { filename: export_filename() });
            }
        }
    }
}
