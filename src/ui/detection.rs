use eframe::egui;

use crate::app::DetectionApp;
use crate::utils::format_timestamp;

pub fn detection_panel(app: &mut DetectionApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Detection");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Choose File").clicked() {
                app.select_file();
            }
            if let Some(file) = &app.selected_file {
                ui.label(format!("Selected File: {}", file.name));
            }
        });

        let submit_label = if app.loading {
            "Uploading..."
        } else {
            "Upload Image"
        };
        let can_submit = app.selected_file.is_some() && !app.loading;
        if ui
            .add_enabled(can_submit, egui::Button::new(submit_label))
            .clicked()
        {
            app.submit(ctx);
        }

        ui.add_space(8.0);
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if let Some(result) = &app.result {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Image ID:").strong());
                        ui.label(&result.image_id);
                        ui.add_space(16.0);
                        ui.label(egui::RichText::new("Timestamp:").strong());
                        ui.label(format_timestamp(&result.timestamp));
                    });
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Compliants:").strong());
                        ui.label(result.summary.helmet_count.to_string());
                        ui.add_space(16.0);
                        ui.label(egui::RichText::new("Violations:").strong());
                        ui.label(result.summary.no_helmet_count.to_string());
                    });

                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Detections:").strong());
                    for det in &result.detections {
                        ui.label(format!("• {}", det.display_line()));
                    }

                    ui.add_space(8.0);
                    if let Some(image) = &app.annotated {
                        let image_size =
                            egui::vec2(image.width() as f32, image.height() as f32);
                        let texture: &egui::TextureHandle =
                            app.texture.get_or_insert_with(|| {
                                ui.ctx().load_texture(
                                    "annotated_image",
                                    egui::ColorImage::from_rgb(
                                        [image.width() as _, image.height() as _],
                                        image.to_rgb8().as_raw(),
                                    ),
                                    Default::default(),
                                )
                            });

                        let scale = (ui.available_width() / image_size.x).min(1.0);
                        ui.image((texture.id(), image_size * scale));
                    }
                } else if let Some(error) = &app.last_error {
                    ui.colored_label(egui::Color32::RED, error);
                } else {
                    ui.label(egui::RichText::new("No image loaded").color(egui::Color32::GRAY));
                }
            });
    });
}
