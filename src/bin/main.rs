use constellation::{
    DrawSurface, FrameScheduler, InputEvent, Rgba, Segment, Simulation, SimulationConfig, Viewport,
};
use eframe::egui;
use std::time::Instant;

const INITIAL_WIDTH: f32 = 1280.0;
const INITIAL_HEIGHT: f32 = 800.0;

fn color(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Draws into an egui painter, offsetting simulation coordinates by the
/// canvas origin.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl PainterSurface<'_> {
    fn to_screen(&self, v: cgmath::Vector2<f32>) -> egui::Pos2 {
        self.origin + egui::vec2(v.x, v.y)
    }
}

impl DrawSurface for PainterSurface<'_> {
    fn clear(&mut self, c: Rgba) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, color(c));
    }

    fn fill_circle(&mut self, center: cgmath::Vector2<f32>, radius: f32, c: Rgba) {
        self.painter.circle_filled(self.to_screen(center), radius, color(c));
    }

    fn stroke_segments(&mut self, segments: &[Segment], width: f32, c: Rgba) {
        let stroke = egui::Stroke::new(width, color(c));
        let shapes = segments
            .iter()
            .map(|[a, b]| egui::Shape::line_segment([self.to_screen(*a), self.to_screen(*b)], stroke))
            .collect();
        self.painter.add(egui::Shape::Vec(shapes));
    }
}

/// One repaint request per tick keeps the loop running at display rate.
struct RepaintScheduler<'a>(&'a egui::Context);

impl FrameScheduler for RepaintScheduler<'_> {
    fn schedule_next(&mut self) {
        self.0.request_repaint();
    }
}

struct ConstellationApp {
    simulation: Simulation,
    started: Instant,
}

impl ConstellationApp {
    fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            started: Instant::now(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn apply(&mut self, event: InputEvent) {
        let now = self.now_ms();
        if let Err(e) = self.simulation.handle(event, now) {
            log::debug!("ignoring {event:?}: {e}");
        }
    }

    /// Turn this frame's raw egui input into simulation events.
    fn bridge_input(&mut self, ctx: &egui::Context, rect: egui::Rect, clicked: bool) {
        let viewport = self.simulation.viewport();
        if rect.width() != viewport.width() || rect.height() != viewport.height() {
            self.apply(InputEvent::Resized {
                width: rect.width(),
                height: rect.height(),
            });
        }

        let moves: Vec<egui::Pos2> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::PointerMoved(pos) => Some(*pos),
                    _ => None,
                })
                .collect()
        });
        for pos in moves {
            let local = pos - rect.min;
            self.apply(InputEvent::PointerMoved {
                x: local.x,
                y: local.y,
            });
        }

        if clicked {
            self.apply(InputEvent::Click);
        }
    }
}

impl eframe::App for ConstellationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let rect = response.rect;

                self.bridge_input(ctx, rect, response.clicked());

                let now = self.now_ms();
                let mut surface = PainterSurface {
                    painter: &painter,
                    origin: rect.min,
                };
                self.simulation
                    .tick(now, &mut surface, &mut RepaintScheduler(ctx));
            });
    }
}

fn main() -> constellation::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting constellation...");
    let viewport = Viewport::new(INITIAL_WIDTH, INITIAL_HEIGHT)?;
    let simulation = Simulation::new(SimulationConfig::default(), viewport)?;

    eframe::run_native(
        "Constellation",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            initial_window_size: Some(egui::vec2(INITIAL_WIDTH, INITIAL_HEIGHT)),
            ..Default::default()
        },
        Box::new(|_cc| Box::new(ConstellationApp::new(simulation))),
    )
    .map_err(|e| constellation::Error::Host(e.to_string()))
}
