use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use landing_guidance::sim::{self, presets, LandingRun};
use landing_guidance::types::GuidanceConfig;

fn main() -> eframe::Result {
    env_logger::init();
    let scenario = presets::lunar_hopper();
    let config = GuidanceConfig { cycle_limit: Some(1_000_000), ..Default::default() };
    let run = match sim::simulate_landing(&scenario, &config) {
        Ok(run) => run,
        Err(e) => {
            log::error!("{e}");
            return Ok(());
        }
    };

    let app = LandingViz { run };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Powered Descent Guidance", options, Box::new(|_| Ok(Box::new(app))))
}

struct LandingViz {
    run: LandingRun,
}

impl LandingViz {
    fn plot(ui: &mut egui::Ui, id: &str, label: &str, w: f32, h: f32, points: PlotPoints) {
        ui.vertical(|ui| {
            ui.label(label);
            Plot::new(id)
                .width(w)
                .height(h)
                .x_axis_label("Time (s)")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(label, points));
                });
        });
    }
}

impl eframe::App for LandingViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let traj = &self.run.trajectory;
        let step = (traj.len() / 2000).max(1);
        let sampled: Vec<_> = traj.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Scenario: {}", self.run.scenario));
            let vz = self.run.touchdown_velocity.map_or(0.0, |v| v.x);
            ui.label(format!(
                "Touchdown: {:.2} m/s  |  Situation: {:?}  |  Propellant used: {:.0} kg  |  Flight: {:.0} s",
                vz, self.run.report.situation, self.run.propellant_used, self.run.report.elapsed,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                let alt: PlotPoints = sampled.iter().map(|s| [s.time, s.altitude]).collect();
                Self::plot(ui, "altitude", "Altitude (m)", half_w, half_h, alt);
                let vs: PlotPoints = sampled.iter().map(|s| [s.time, s.vertical_speed]).collect();
                Self::plot(ui, "vspeed", "Vertical speed (m/s)", half_w, half_h, vs);
            });

            ui.horizontal(|ui| {
                let throttle: PlotPoints = sampled.iter().map(|s| [s.time, s.throttle]).collect();
                Self::plot(ui, "throttle", "Throttle", half_w, half_h, throttle);
                let pitch: PlotPoints = sampled.iter().map(|s| [s.time, s.pitch]).collect();
                Self::plot(ui, "pitch", "Pitch (deg)", half_w, half_h, pitch);
            });
        });
    }
}
