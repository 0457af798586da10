//! Interactive sandbox window
//!
//! Frame driver, input layer and presentation for the engine: mouse and
//! keyboard events become [`Command`]s, the simulation ticks at a fixed
//! rate and the body snapshot is drawn onto a pixel-space canvas.

use eframe::egui;
use glam::Vec2;
use orbit_core::{
    proximity_pairs, BodyState, Command, EngineConfig, Flow, Mobility, Simulation,
    SimulationMode,
};
use std::time::{Duration, Instant};

/// Height reserved for the control panel above the canvas
pub const PANEL_HEIGHT: f32 = 32.0;

/// Upper bound on ticks run in a single repaint after a stall
const MAX_CATCH_UP_TICKS: u32 = 4;

const MOVABLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xCC, 0xCC, 0xCC);
const FIXED_COLOR: egui::Color32 = egui::Color32::from_rgb(0x55, 0x55, 0x55);
const VELOCITY_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0x00, 0xFF);
const PROXIMITY_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFF, 0x00, 0x00);

const VELOCITY_LINE_SCALE: f32 = 1.5;
const PROXIMITY_FACTOR: f32 = 3.0;

pub struct SandboxApp {
    sim: Simulation,
    canvas_size: Vec2,
    tick_interval: Duration,
    accumulated: Duration,
    last_frame: Instant,
    playing: bool,
}

impl SandboxApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: EngineConfig,
        canvas_size: Vec2,
        fps: u32,
    ) -> Self {
        Self {
            sim: Simulation::new(config),
            canvas_size,
            tick_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            accumulated: Duration::ZERO,
            last_frame: Instant::now(),
            playing: true,
        }
    }

    /// Keyboard shortcuts, independent of pointer position
    fn keyboard_commands(ctx: &egui::Context, mode: SimulationMode) -> Vec<Command> {
        ctx.input(|i| {
            let mut commands = Vec::new();
            if i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Q) {
                commands.push(Command::Quit);
            }
            if i.key_pressed(egui::Key::C) {
                commands.push(Command::Clear);
            }
            if i.key_pressed(egui::Key::Num1) {
                commands.push(Command::AdjustMass(-1));
            }
            if i.key_pressed(egui::Key::Num2) {
                commands.push(Command::AdjustMass(1));
            }
            if i.key_pressed(egui::Key::Num3) {
                commands.push(Command::AdjustBounce(-1));
            }
            if i.key_pressed(egui::Key::Num4) {
                commands.push(Command::AdjustBounce(1));
            }
            if i.key_pressed(egui::Key::M) {
                commands.push(Command::SetMode(mode.toggled()));
            }
            commands
        })
    }

    /// Clicks and wheel over the canvas
    fn canvas_commands(ui: &egui::Ui, response: &egui::Response) -> Vec<Command> {
        let mut commands = Vec::new();

        let mobility = if response.clicked() {
            Some(Mobility::Movable)
        } else if response.secondary_clicked() {
            Some(Mobility::Fixed)
        } else {
            None
        };
        let pointer = response.interact_pointer_pos().or(response.hover_pos());
        if let (Some(mobility), Some(pointer)) = (mobility, pointer) {
            let local = pointer - response.rect.min;
            commands.push(Command::Spawn {
                pos: Vec2::new(local.x, local.y),
                mobility,
            });
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll > 0.0 {
                commands.push(Command::AdjustMass(1));
            } else if scroll < 0.0 {
                commands.push(Command::AdjustMass(-1));
            }
        }

        commands
    }

    /// Run as many ticks as the elapsed wall time calls for
    fn advance(&mut self) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        if !self.playing {
            self.accumulated = Duration::ZERO;
            return;
        }

        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.tick_interval {
            if ticks == MAX_CATCH_UP_TICKS {
                log::trace!("dropping {:?} of simulation lag", self.accumulated);
                self.accumulated = Duration::ZERO;
                break;
            }
            self.sim.tick();
            self.accumulated -= self.tick_interval;
            ticks += 1;
        }
    }

    fn apply_all(&mut self, ctx: &egui::Context, commands: Vec<Command>) {
        for command in commands {
            if self.sim.apply(command) == Flow::Exit {
                log::info!("exit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }

            if ui.button("⏭ Step").clicked() {
                self.sim.tick();
            }

            if ui.button("Clear").clicked() {
                self.sim.clear();
            }

            ui.separator();
            ui.label(format!("Bodies: {}", self.sim.world.len()));
            ui.separator();
            ui.label(format!("Mass: {:.0}", self.sim.config.default_spawn_mass()));
            ui.separator();
            ui.label(format!("Bounce: {:.1}", self.sim.config.bounce_coefficient()));
            ui.separator();
            if ui.button(format!("Mode: {}", self.sim.config.mode)).clicked() {
                self.sim.set_mode(self.sim.config.mode.toggled());
            }
            ui.separator();
            ui.label(format!("Tick: {}", self.sim.tick_count));
        });
    }
}

fn to_screen(origin: egui::Pos2, p: Vec2) -> egui::Pos2 {
    origin + egui::vec2(p.x, p.y)
}

fn draw_bodies(
    painter: &egui::Painter,
    origin: egui::Pos2,
    states: &[BodyState],
    mode: SimulationMode,
) {
    for state in states {
        let center = to_screen(origin, state.pos);
        let radius = state.mass.round();

        match state.mobility {
            Mobility::Fixed => {
                painter.circle_stroke(center, radius, egui::Stroke::new(1.0, FIXED_COLOR));
            }
            Mobility::Movable => {
                painter.circle_filled(center, radius, MOVABLE_COLOR);
                let tip = to_screen(origin, state.velocity_indicator(VELOCITY_LINE_SCALE));
                painter.line_segment([center, tip], egui::Stroke::new(1.0, VELOCITY_COLOR));
            }
        }
    }

    if mode == SimulationMode::CollisionOnly {
        for (i, j) in proximity_pairs(states, PROXIMITY_FACTOR) {
            painter.line_segment(
                [to_screen(origin, states[i].pos), to_screen(origin, states[j].pos)],
                egui::Stroke::new(1.0, PROXIMITY_COLOR),
            );
        }
    }
}

impl eframe::App for SandboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let keyboard = Self::keyboard_commands(ctx, self.sim.config.mode);
        self.apply_all(ctx, keyboard);

        egui::TopBottomPanel::top("controls")
            .exact_height(PANEL_HEIGHT)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let size = egui::vec2(self.canvas_size.x, self.canvas_size.y);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click());

                let commands = Self::canvas_commands(ui, &response);
                self.apply_all(ctx, commands);

                self.advance();

                let states = self.sim.snapshot();
                draw_bodies(&painter, response.rect.min, &states, self.sim.config.mode);
            });

        ctx.request_repaint_after(self.tick_interval);
    }
}
