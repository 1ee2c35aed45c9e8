use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use bevy_rts_camera::RtsCamera;

use crate::config::*;
use crate::systems::cabinet::build::measurement_guides;
use crate::systems::cabinet::engine::{
    Addon, Configuration, Dimension, DoorStyle, MaterialSlot, PlacementIntent, Swatch, SwatchCatalog, ALL_CATEGORIES,
};
use crate::systems::cabinet::{ActiveColumn, Catalogs, ConfigHistory, CurrentLayout, RebuildEvent, RoomSettings, ShowMeasurements};
use crate::systems::export::{handle_export, ExportEvent};

pub mod indicator;
pub mod toolbar;

// re-export the main items that other modules need
pub use indicator::{Toast, ToastEvent, update_toast, render_toast};
pub use toolbar::{FrontView, ToolbarAction};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .insert_resource(Toast::default())
            .insert_resource(FrontView::default())
            .add_event::<ToastEvent>()
            .add_event::<ToolbarAction>()
            .add_event::<ExportEvent>()
            .add_systems(Update, (toolbar::key_input, toolbar::handle_toolbar_action, handle_export, update_toast).chain())
            .add_systems(EguiPrimaryContextPass, (ui_main, toolbar::render_toolbar, measurement_labels, render_toast, fps)); // UI rendering here
    }
}

// swatch category picked per material slot, panel state only
#[derive(Default)]
struct MaterialFilters {
    cabinet: Option<String>,
    interior: Option<String>,
    door: Option<String>,
}

impl MaterialFilters {
    fn slot(&mut self, slot: MaterialSlot) -> &mut Option<String> {
        match slot {
            MaterialSlot::Cabinet => &mut self.cabinet,
            MaterialSlot::Interior => &mut self.interior,
            MaterialSlot::Door => &mut self.door,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commit {
    Step,
    Amend,
}

// one undo step per slider drag, later frames of the drag amend it
#[derive(Default)]
struct SliderDrag(Option<Dimension>);

impl SliderDrag {
    fn commit(&mut self, dimension: Dimension, dragging: bool) -> Commit {
        if dragging && self.0 == Some(dimension) {
            return Commit::Amend;
        }
        self.0 = if dragging { Some(dimension) } else { None };
        Commit::Step
    }

    fn release(&mut self, dimension: Dimension) {
        if self.0 == Some(dimension) {
            self.0 = None;
        }
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    mut history: ResMut<ConfigHistory>,
    mut active: ResMut<ActiveColumn>,
    mut rebuild: EventWriter<RebuildEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut exports: EventWriter<ExportEvent>,
    mut filters: Local<MaterialFilters>,
    mut drag: Local<SliderDrag>,
    catalogs: Res<Catalogs>,
    room: Res<RoomSettings>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let config = history.present().clone();
    let mut next: Option<Configuration> = None;
    let mut amend: Option<Configuration> = None;
    let mut message: Option<String> = None;
    let mut active_changed = false;

    egui::SidePanel::left("config_panel")
        .default_width(280.0)
        .min_width(260.0)
        .max_width(420.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                // camera
                ui.label("Camera: ");
                ui.label("WASD - Move");
                ui.label("Scroll - Zoom");
                ui.label("MMB - Rotate");
                ui.label("Click a column to select it");

                ui.separator();

                egui::CollapsingHeader::new("Cabinet")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.label("Position:");
                    ui.horizontal_wrapped(|ui| {
                        for intent in PlacementIntent::ALL {
                            if ui.selectable_label(config.position == intent, intent.label()).clicked()
                                && config.position != intent
                            {
                                next = Some(config.with_position(intent, &room.0));
                                message = Some("Cabinet position updated".into());
                            }
                        }
                    });

                    ui.add_space(4.0);
                    for dimension in Dimension::ALL {
                        let (min, max) = dimension.range();
                        let mut value = config.dimension(dimension);
                        let enabled = !(dimension == Dimension::Height && config.full_height);
                        let slider = egui::Slider::new(&mut value, min..=max)
                            .text(dimension.label())
                            .suffix(" cm")
                            .step_by(1.0);
                        let response = ui.add_enabled(enabled, slider);
                        if response.changed() {
                            let edited = config.with_dimension(dimension, value);
                            match drag.commit(dimension, response.dragged()) {
                                Commit::Step => {
                                    next = Some(edited);
                                    message = Some(format!("Updated {}", dimension.label()));
                                }
                                Commit::Amend => amend = Some(edited),
                            }
                        }
                        if response.drag_stopped() {
                            drag.release(dimension);
                        }
                    }

                    let mut full_height = config.full_height;
                    if ui.checkbox(&mut full_height, format!("Full height ({} cm)", FULL_HEIGHT))
                        .on_hover_text("Pins the cabinet to the ceiling")
                        .changed()
                    {
                        next = Some(config.with_full_height(full_height));
                    }

                    ui.add_space(4.0);
                    ui.label("Add-ons:");
                    for addon in Addon::ALL {
                        let mut on = config.addon(addon);
                        if ui.checkbox(&mut on, addon.label()).changed() {
                            next = Some(config.with_addon(addon, on));
                        }
                    }

                    ui.add_space(4.0);
                    if let Some(id) = material_picker(ui, &catalogs.swatches, filters.slot(MaterialSlot::Cabinet), config.material(MaterialSlot::Cabinet), "cabinet") {
                        next = Some(config.with_material(MaterialSlot::Cabinet, &id));
                    }
                });

                egui::CollapsingHeader::new("Interior")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Columns:")
                            .on_hover_text("Number of vertical compartments.");
                        ui.label(config.column_count.to_string());
                        if ui.button("-").clicked() && config.column_count > 1 {
                            next = Some(config.with_column_count(config.column_count - 1, &catalogs.modules));
                        }
                        if ui.button("+").clicked() && config.column_count < MAX_COLUMNS {
                            next = Some(config.with_column_count(config.column_count + 1, &catalogs.modules));
                        }
                    });

                    ui.horizontal_wrapped(|ui| {
                        for column in 0..config.column_count {
                            if ui.selectable_label(active.0 == column, format!("Column {}", column + 1)).clicked()
                                && active.0 != column
                            {
                                active.0 = column;
                                active_changed = true;
                            }
                        }
                    });

                    ui.add_space(4.0);
                    let column = active.0.min(config.column_count.saturating_sub(1));
                    let assigned = config.modules.get(column).map(String::as_str).unwrap_or_default();
                    ui.label(format!("Module for column {}:", column + 1));
                    for module in catalogs.modules.iter() {
                        let response = ui
                            .selectable_label(module.id == assigned, module.label.as_str())
                            .on_hover_text(module.summary.as_str());
                        if response.clicked() && module.id != assigned {
                            next = Some(config.with_module(column, &module.id));
                            message = Some(format!("Column {}: {}", column + 1, module.label));
                        }
                    }

                    ui.add_space(4.0);
                    if let Some(id) = material_picker(ui, &catalogs.swatches, filters.slot(MaterialSlot::Interior), config.material(MaterialSlot::Interior), "interior") {
                        next = Some(config.with_material(MaterialSlot::Interior, &id));
                    }
                });

                egui::CollapsingHeader::new("Doors")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for style in DoorStyle::ALL {
                            if ui.selectable_label(config.door_style == style, style.label()).clicked()
                                && config.door_style != style
                            {
                                next = Some(config.with_door_style(style));
                            }
                        }
                    });

                    ui.add_space(4.0);
                    ui.add_enabled_ui(config.door_style.has_doors(), |ui| {
                        if let Some(id) = material_picker(ui, &catalogs.swatches, filters.slot(MaterialSlot::Door), config.material(MaterialSlot::Door), "door") {
                            next = Some(config.with_material(MaterialSlot::Door, &id));
                        }
                    });
                });

                egui::CollapsingHeader::new("Summary")
                    .default_open(false)
                    .show(ui, |ui| {
                    ui.label(format!("{:.0} x {:.0} x {:.0} cm", config.width, config.height, config.depth));
                    ui.label(format!("Position: {}", config.position.label()));
                    ui.label(format!("Doors: {}", config.door_style.label()));
                    for (index, id) in config.modules.iter().enumerate() {
                        let label = catalogs.modules.get(id).map(|module| module.label.as_str()).unwrap_or(id);
                        ui.label(format!("Column {}: {}", index + 1, label));
                    }
                    ui.label(format!("Price: {:.0}", config.price));
                    ui.label(format!("Delivery: {}", config.delivery));
                });

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Export JSON")
                        .on_hover_text("Save the configuration to the current directory")
                        .clicked()
                    {
                        exports.write(ExportEvent { filename: crate::systems::export::export_filename() });
                    }
                });

                ui.separator();
                ui.label("Ctrl+Z / Ctrl+Y - Undo / Redo");
                ui.label("M - Measure, O - Doors");
                ui.label("ESC - Exit");
            });
        });

    // one history entry per applied edit, no-ops are dropped by the store
    if let Some(next) = next {
        if history.set(next) {
            rebuild.write(RebuildEvent);
            if let Some(message) = message {
                toasts.write(ToastEvent(message));
            }
        }
    }
    if let Some(amend) = amend {
        if history.amend(amend) {
            rebuild.write(RebuildEvent);
        }
    }
    if active_changed {
        rebuild.write(RebuildEvent);
    }
}

// returns the clicked swatch id, if any
fn material_picker(
    ui: &mut egui::Ui,
    swatches: &SwatchCatalog,
    filter: &mut Option<String>,
    selected: &str,
    slot: &str,
) -> Option<String> {
    let mut picked = None;

    let label = swatches.get(selected).map(|swatch| swatch.label.as_str()).unwrap_or(selected);
    ui.label(format!("Material: {}", label));

    let current = filter.clone().unwrap_or_else(|| ALL_CATEGORIES.to_string());
    egui::ComboBox::from_id_salt(("category", slot))
        .selected_text(current.as_str())
        .show_ui(ui, |ui| {
            for category in swatches.categories() {
                if ui.selectable_label(current == category, category).clicked() {
                    *filter = Some(category.to_string());
                }
            }
        });

    ui.horizontal_wrapped(|ui| {
        for swatch in swatches.filter(&current) {
            let mut button = egui::Button::new("")
                .fill(swatch_color(swatch))
                .min_size(egui::vec2(26.0, 26.0));
            if swatch.id == selected {
                button = button.stroke(egui::Stroke::new(2.0, egui::Color32::from_rgb(217, 33, 42)));
            }
            if ui.add(button).on_hover_text(swatch.label.as_str()).clicked() && swatch.id != selected {
                picked = Some(swatch.id.clone());
            }
        }
    });

    picked
}

fn swatch_color(swatch: &Swatch) -> egui::Color32 {
    match swatch.srgba() {
        Ok(color) => egui::Color32::from_rgb(
            (color.red * 255.0) as u8,
            (color.green * 255.0) as u8,
            (color.blue * 255.0) as u8,
        ),
        Err(_) => egui::Color32::from_rgb(255, 0, 255),
    }
}

// dimension labels next to the measurement gizmos
fn measurement_labels(
    mut contexts: EguiContexts,
    show: Res<ShowMeasurements>,
    current: Res<CurrentLayout>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
) {
    if !show.0 {
        return;
    }
    let Some(layout) = &current.0 else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    if let Ok(ctx) = contexts.ctx_mut() {
        for (index, guide) in measurement_guides(layout).iter().enumerate() {
            let Ok(screen) = camera.world_to_viewport(camera_transform, guide.midpoint()) else {
                continue;
            };
            egui::Area::new(egui::Id::new(("measurement", index)))
                .fixed_pos(egui::pos2(screen.x, screen.y))
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::new()
                        .fill(egui::Color32::from_rgba_unmultiplied(217, 33, 42, 220))
                        .inner_margin(egui::Margin::symmetric(6, 2))
                        .corner_radius(egui::CornerRadius::same(3))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(&guide.label)
                                .size(13.0)
                                .color(egui::Color32::WHITE)
                                .strong());
                        });
                });
        }
    }
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(egui::RichText::new(format!("{:.0}", fps))
                                .size(26.0)
                                .color(egui::Color32::WHITE));
                        }
                    }
                });
            });
    }
}
