use eframe::egui;

use crate::app::DetectionApp;

pub fn reports_panel(app: &mut DetectionApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Reports");
        ui.add_space(8.0);

        if app.reports.is_empty() {
            ui.label("No reports generated yet.");
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // Insertion order is generation order.
                for report in &app.reports {
                    ui.group(|ui| {
                        ui.label(egui::RichText::new(report.name.as_str()).strong());
                        ui.hyperlink_to("View PDF Report", &report.url);
                    });
                    ui.add_space(4.0);
                }
            });
    });
}
