use eframe::egui;

use crate::app::DetectionApp;
use crate::models::Section;

pub fn side_panel(app: &mut DetectionApp, ctx: &egui::Context) {
    egui::SidePanel::left("side_panel")
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("PPE Vision Detection System");
            ui.add_space(8.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("1. Load an image").strong());
                ui.label("↓");
                ui.label(egui::RichText::new("2. Identify compliants/violations").strong());
                ui.label("↓");
                ui.label(egui::RichText::new("3. Check & download the reports").strong());
            });

            ui.add_space(12.0);

            for (section, label) in [
                (Section::Detection, "Detection"),
                (Section::Reports, "Reports"),
            ] {
                let is_active = app.section == section;

                let button = egui::Button::new(egui::RichText::new(label).color(
                    if is_active {
                        egui::Color32::BLACK
                    } else {
                        egui::Color32::from_gray(200)
                    },
                ))
                .min_size(egui::vec2(ui.available_width(), 32.0))
                .fill(if is_active {
                    egui::Color32::from_gray(230)
                } else {
                    egui::Color32::from_gray(60)
                });

                if ui.add(button).clicked() {
                    app.section = section;
                }
                ui.add_space(4.0);
            }

            if app.loading || app.report_loading {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(if app.loading {
                        "Processing image..."
                    } else {
                        "Generating report..."
                    });
                });
            }

            // Status message pinned to the bottom of the sidebar.
            ui.add_space((ui.available_height() - 30.0).max(0.0));
            if let Some((message, _)) = &app.status_message {
                ui.label(message);
            }
        });
}
