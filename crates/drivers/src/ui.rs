use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use eframe::egui;
use egui::load::SizedTexture;
use egui::{ColorImage, Key, TextureHandle, TextureOptions, ViewportCommand};
use log::{info, warn};
use sift_adapters::{build_viewer_session, present_export};
use sift_application::{ApplicationError, ViewerCommand, ViewerOutcome, ViewerSession};
use sift_domain::{display_budget, RenderedImage};

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    PickOrigin,
    PickDestination,
    About,
    Exit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeyPresses {
    next: bool,
    previous: bool,
    export: bool,
}

impl KeyPresses {
    fn commands(self) -> Vec<ViewerCommand> {
        let mut commands = Vec::new();
        if self.next {
            commands.push(ViewerCommand::Advance);
        }
        if self.previous {
            commands.push(ViewerCommand::Retreat);
        }
        if self.export {
            commands.push(ViewerCommand::ExportCurrent);
        }
        commands
    }
}

struct ViewerApp {
    config: AppConfig,
    session: ViewerSession,
    pending: VecDeque<ViewerCommand>,
    texture: Option<TextureHandle>,
    shown_path: Option<PathBuf>,
    status: Option<Status>,
    show_about: bool,
    applied_title: String,
}

impl ViewerApp {
    fn new(config: AppConfig, session: ViewerSession, pending: VecDeque<ViewerCommand>) -> Self {
        Self {
            applied_title: config.window_title.clone(),
            config,
            session,
            pending,
            texture: None,
            shown_path: None,
            status: None,
            show_about: false,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, command: ViewerCommand) {
        match self.session.handle(command) {
            Ok(outcome) => self.show_outcome(ctx, outcome),
            Err(error) => self.show_error(error),
        }
    }

    fn show_outcome(&mut self, ctx: &egui::Context, outcome: ViewerOutcome) {
        match outcome {
            ViewerOutcome::Unchanged => {}
            ViewerOutcome::Rendered(image) => self.upload(ctx, image),
            ViewerOutcome::Cleared => {
                self.texture = None;
                self.shown_path = None;
                self.status = Some(Status::Info("no images in this folder".to_string()));
            }
            ViewerOutcome::Exported(report) => {
                self.status = Some(Status::Info(present_export(&report)));
            }
            ViewerOutcome::ExportSkipped => {
                self.status = skipped_export_status(self.session.destination());
            }
        }
    }

    fn show_error(&mut self, error: ApplicationError) {
        warn!("{error}");
        if self.shown_path.as_deref() != self.session.current_path() {
            self.texture = None;
            self.shown_path = None;
        }
        self.status = Some(Status::Error(error.to_string()));
    }

    fn upload(&mut self, ctx: &egui::Context, image: RenderedImage) {
        let size = [image.width as usize, image.height as usize];
        let pixels = ColorImage::from_rgba_unmultiplied(size, &image.rgba);
        self.texture = Some(ctx.load_texture("current-image", pixels, TextureOptions::LINEAR));
        self.shown_path = Some(image.path);
    }

    fn sync_display_budget(&mut self, ctx: &egui::Context) {
        let monitor_height = ctx.input(|input| input.viewport().monitor_size.map(|size| size.y));
        let screen_height = screen_height_pixels(
            monitor_height,
            ctx.pixels_per_point(),
            self.config.fallback_screen_height,
        );
        let budget = display_budget(screen_height, self.config.display_margin);
        if !self.session.set_display_height(budget) {
            return;
        }

        info!("display height set to {budget}");
        match self.session.rerender() {
            Ok(Some(image)) => self.upload(ctx, image),
            Ok(None) => {}
            Err(error) => self.show_error(error),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let export_key = self.config.export_key;
        let presses = ctx.input(|input| KeyPresses {
            next: input.key_pressed(Key::ArrowRight),
            previous: input.key_pressed(Key::ArrowLeft),
            export: input.key_pressed(export_key),
        });
        for command in presses.commands() {
            self.apply(ctx, command);
        }
    }

    fn menu_bar(ctx: &egui::Context) -> Option<MenuAction> {
        let mut action = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Set Origin Folder").clicked() {
                        action = Some(MenuAction::PickOrigin);
                        ui.close_menu();
                    }
                    if ui.button("Set Destination Folder").clicked() {
                        action = Some(MenuAction::PickDestination);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        action = Some(MenuAction::Exit);
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        action = Some(MenuAction::About);
                        ui.close_menu();
                    }
                });
            });
        });
        action
    }

    fn run_menu_action(&mut self, ctx: &egui::Context, action: MenuAction) {
        match action {
            MenuAction::PickOrigin => {
                if let Some(folder) = pick_folder("Set Origin Folder", self.session.origin()) {
                    self.apply(ctx, ViewerCommand::SetOrigin(folder));
                }
            }
            MenuAction::PickDestination => {
                if let Some(folder) =
                    pick_folder("Set Destination Folder", self.session.destination())
                {
                    self.apply(ctx, ViewerCommand::SetDestination(folder));
                }
            }
            MenuAction::About => self.show_about = true,
            MenuAction::Exit => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Origin: {}", folder_label(self.session.origin())));
                ui.separator();
                ui.label(format!(
                    "Destination: {}",
                    folder_label(self.session.destination())
                ));
                match &self.status {
                    Some(Status::Info(text)) => {
                        ui.separator();
                        ui.label(text);
                    }
                    Some(Status::Error(text)) => {
                        ui.separator();
                        ui.colored_label(ui.visuals().error_fg_color, text);
                    }
                    None => {}
                }
            });
        });
    }

    fn image_area(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match &self.texture {
            Some(texture) => {
                let size = texture.size_vec2() / ui.ctx().pixels_per_point();
                ui.centered_and_justified(|ui| {
                    let sized = SizedTexture::new(texture.id(), size);
                    ui.add(egui::Image::new(sized).shrink_to_fit());
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    if self.session.origin().is_none() {
                        ui.label("Use File > Set Origin Folder to pick a folder of images");
                    } else {
                        ui.label("Nothing to show");
                    }
                });
            }
        });
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        let export_key = self.config.export_key;
        egui::Window::new("About")
            .open(&mut self.show_about)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Image Viewer {}", env!("CARGO_PKG_VERSION")));
                ui.label("Left/Right arrows browse the origin folder.");
                ui.label(format!(
                    "{} copies the current image to the destination folder.",
                    export_key.name()
                ));
            });
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        if self.session.title() == self.applied_title {
            return;
        }
        self.applied_title = self.session.title().to_string();
        ctx.send_viewport_cmd(ViewportCommand::Title(self.applied_title.clone()));
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_display_budget(ctx);

        while let Some(command) = self.pending.pop_front() {
            self.apply(ctx, command);
        }

        if let Some(action) = Self::menu_bar(ctx) {
            self.run_menu_action(ctx, action);
        }
        self.handle_keys(ctx);

        self.status_bar(ctx);
        self.image_area(ctx);
        self.about_window(ctx);
        self.sync_title(ctx);
    }
}

fn pick_folder(title: &str, start: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title(title);
    if let Some(start) = start {
        dialog = dialog.set_directory(start);
    }
    dialog.pick_folder()
}

/// egui reports the monitor in points; the display budget is in pixels.
fn screen_height_pixels(
    monitor_height: Option<f32>,
    pixels_per_point: f32,
    fallback: f32,
) -> f32 {
    match monitor_height {
        Some(points) if pixels_per_point.is_finite() && pixels_per_point > 0.0 => {
            points * pixels_per_point
        }
        Some(points) => points,
        None => fallback,
    }
}

fn folder_label(folder: Option<&Path>) -> String {
    folder
        .map(|folder| folder.display().to_string())
        .unwrap_or_else(|| "not set".to_string())
}

fn skipped_export_status(destination: Option<&Path>) -> Option<Status> {
    match destination {
        None => Some(Status::Info(
            "set a destination folder before exporting".to_string(),
        )),
        Some(_) => None,
    }
}

/// Destination is queued before origin so an export key pressed right after
/// startup already has somewhere to go.
fn startup_commands(
    origin: Option<PathBuf>,
    destination: Option<PathBuf>,
) -> VecDeque<ViewerCommand> {
    destination
        .map(ViewerCommand::SetDestination)
        .into_iter()
        .chain(origin.map(ViewerCommand::SetOrigin))
        .collect()
}

pub fn launch_window(
    config: AppConfig,
    origin: Option<PathBuf>,
    destination: Option<PathBuf>,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.initial_window_size),
        ..Default::default()
    };
    let app_name = config.window_title.clone();
    let session = build_viewer_session(config.export_quality);
    let pending = startup_commands(origin, destination);

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(config, session, pending)))),
    )
    .map_err(|error| anyhow!("failed to start UI: {error}"))
}
