//! eframe front end: home screen, game screen, pointer routing and canvas upload.

use std::time::Instant;

use egui::{Color32, ColorImage, Mesh, Pos2, Rect, TextureHandle, TextureOptions};
use swipe_core::{
    BackgroundGradient, GameState, RandomSource, RasterCanvas, Rgba, SwipeGame, WindowConfig,
};
use swipe_platform::PointerEvent;
use tracing::{debug, info};

/// Screen changes requested by buttons during a frame, applied after drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Play,
    Home,
}

pub fn run<R: RandomSource + 'static>(
    game: SwipeGame<R>,
    window: &WindowConfig,
) -> swipe_platform::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height]),
        ..Default::default()
    };
    info!(
        "opening {}x{} window \"{}\"",
        window.width, window.height, window.title
    );
    eframe::run_native(
        &window.title,
        native_options,
        Box::new(move |_creation_context| Ok(Box::new(SwipeApp::new(game)))),
    )
    .map_err(|e| format!("eframe failed: {e}"))?;
    Ok(())
}

pub struct SwipeApp<R: RandomSource> {
    game: SwipeGame<R>,
    canvas: RasterCanvas,
    texture: Option<TextureHandle>,
    home_button: Option<Rect>,
}

impl<R: RandomSource> SwipeApp<R> {
    pub fn new(game: SwipeGame<R>) -> Self {
        Self {
            game,
            canvas: RasterCanvas::new(0, 0, 1.0),
            texture: None,
            home_button: None,
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Play => {
                self.canvas.clear();
                self.game.start();
            }
            UiAction::Home => {
                self.game.go_home();
                self.home_button = None;
            }
        }
    }

    fn home_screen(&mut self, context: &egui::Context) -> Option<UiAction> {
        let mut action = None;
        egui::CentralPanel::default().show(context, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.heading("Sensory Swipe");
                ui.label("Swipe anywhere to paint with light and sound.");
                ui.add_space(24.0);
                if ui.button("Play").clicked() {
                    info!("UI: Play clicked");
                    action = Some(UiAction::Play);
                }
            });
        });
        action
    }

    fn game_screen(&mut self, context: &egui::Context) -> Option<UiAction> {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(context, |ui| {
                let rect = ui.max_rect();
                let pixels_per_point = context.pixels_per_point();
                let width = (rect.width() * pixels_per_point).round().max(0.0) as u32;
                let height = (rect.height() * pixels_per_point).round().max(0.0) as u32;
                if self.canvas.resize(width, height, pixels_per_point) {
                    debug!("canvas resized to {width}x{height} @ {pixels_per_point}");
                }

                let now = Instant::now();
                let events = context.input(|input| input.events.clone());
                for event in events {
                    if let Some(pointer) = self.pointer_event(&event, rect) {
                        self.game.handle(pointer, now);
                    }
                }
                self.game.frame(now, &mut self.canvas);

                let painter = ui.painter();
                painter.add(background_mesh(rect, self.game.background()));

                if self.canvas.width() == 0 || self.canvas.height() == 0 {
                    return;
                }
                let image = ColorImage::from_rgba_premultiplied(
                    [self.canvas.width() as usize, self.canvas.height() as usize],
                    self.canvas.as_bytes(),
                );
                if let Some(texture) = self.texture.as_mut() {
                    texture.set(image, TextureOptions::LINEAR);
                } else {
                    self.texture =
                        Some(context.load_texture("swipe-canvas", image, TextureOptions::LINEAR));
                }
                if let Some(texture) = &self.texture {
                    painter.image(
                        texture.id(),
                        rect,
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            });

        let mut action = None;
        let area = egui::Area::new(egui::Id::new("home_button"))
            .fixed_pos(Pos2::new(16.0, 16.0))
            .show(context, |ui| {
                if ui.button("Home").clicked() {
                    info!("UI: Home clicked");
                    action = Some(UiAction::Home);
                }
            });
        self.home_button = Some(area.response.rect);
        context.request_repaint();
        action
    }

    /// Surface-local pointer event for `event`, skipping presses on the Home button.
    fn pointer_event(&self, event: &egui::Event, surface: Rect) -> Option<PointerEvent> {
        let local = |pos: Pos2| pos - surface.min;
        match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                ..
            } => {
                if self.home_button.is_some_and(|button| button.contains(*pos)) {
                    return None;
                }
                let offset = local(*pos);
                Some(PointerEvent::Down {
                    x: offset.x,
                    y: offset.y,
                })
            }
            egui::Event::PointerButton {
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } => Some(PointerEvent::Up),
            egui::Event::PointerMoved(pos) => {
                let offset = local(*pos);
                Some(PointerEvent::Move {
                    x: offset.x,
                    y: offset.y,
                })
            }
            egui::Event::PointerGone => Some(PointerEvent::Leave),
            _ => None,
        }
    }
}

impl<R: RandomSource> eframe::App for SwipeApp<R> {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        let action = match self.game.state() {
            GameState::Home => self.home_screen(context),
            GameState::Playing => self.game_screen(context),
        };
        if let Some(action) = action {
            self.apply(action);
        }
    }
}

fn color32(color: Rgba) -> Color32 {
    let [r, g, b, a] = color.to_rgba8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// 135° two-stop gradient: the off-diagonal corners sit at the midpoint.
fn background_mesh(rect: Rect, gradient: BackgroundGradient) -> egui::Shape {
    let middle = color32(gradient.sample(0.5));
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), color32(gradient.from));
    mesh.colored_vertex(rect.right_top(), middle);
    mesh.colored_vertex(rect.right_bottom(), color32(gradient.to));
    mesh.colored_vertex(rect.left_bottom(), middle);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    egui::Shape::mesh(mesh)
}
