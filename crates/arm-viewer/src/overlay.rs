//! Debug overlay window

use arm_core::Target;

/// What the overlay shows this frame
pub struct OverlayInfo<'a> {
    pub pick_status: &'a str,
    pub active: Option<Target>,
    pub alternate_mode: bool,
}

/// Changes requested through the overlay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayResponse {
    pub show_grid: Option<bool>,
    pub show_axes: Option<bool>,
}

/// Show the "Picking" window
pub fn show(
    ctx: &egui::Context,
    info: &OverlayInfo<'_>,
    mut show_grid: bool,
    mut show_axes: bool,
) -> OverlayResponse {
    let mut response = OverlayResponse::default();

    egui::Window::new("Picking")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Last picked object: {}", info.pick_status));
            ui.label(format!("Active target: {}", active_label(info.active)));
            ui.label(format!(
                "Pen mode: {}",
                if info.alternate_mode { "axial spin" } else { "longitude / latitude" }
            ));

            ui.separator();
            if ui.checkbox(&mut show_grid, "Show grid").changed() {
                response.show_grid = Some(show_grid);
            }
            if ui.checkbox(&mut show_axes, "Show axes").changed() {
                response.show_axes = Some(show_axes);
            }

            ui.collapsing("Controls", |ui| {
                ui.label("C / B / T / 1 / 2 / P: select camera, base, top, arm1, arm2, pen");
                ui.label("Drag or arrow keys: move the selection");
                ui.label("Shift: toggle pen mode");
                ui.label("Click: pick");
            });
        });

    response
}

fn active_label(active: Option<Target>) -> String {
    active.map_or_else(|| "none".to_string(), |t| t.to_string())
}

#[cfg(test)]
mod tests {
    use arm_core::PartId;

    use super::*;

    #[test]
    fn test_active_label() {
        assert_eq!(active_label(None), "none");
        assert_eq!(active_label(Some(Target::Camera)), "camera");
        assert_eq!(active_label(Some(Target::Part(PartId::Arm1))), "arm1");
    }
}
