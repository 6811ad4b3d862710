//! Main application

use std::time::Instant;

use arm_core::{InputRouter, JointState, KinematicChain, PickEngine, PickPhase};
use arm_renderer::{ArmScene, RenderError};

use crate::config::ConfigManager;
use crate::input::EguiInput;
use crate::overlay::{self, OverlayInfo};
use crate::stats::FrameStats;
use crate::viewport_state::ViewportState;

/// Fatal errors while creating the app
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("eframe was started without a wgpu render state")]
    NoRenderState,
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Interactive arm viewer
pub struct ArmViewerApp {
    viewport: ViewportState,
    chain: KinematicChain,
    joints: JointState,
    router: InputRouter,
    picking: PickEngine,
    input: EguiInput,
    config: ConfigManager,
    stats: FrameStats,
    last_frame: Instant,
}

impl ArmViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, StartupError> {
        let render_state = cc
            .wgpu_render_state
            .as_ref()
            .ok_or(StartupError::NoRenderState)?;

        let config = ConfigManager::new();
        let app_config = config.config();
        let viewport = ViewportState::new(
            render_state.device.clone(),
            render_state.queue.clone(),
            render_state.target_format,
            app_config.renderer,
            app_config.assets.mesh_source(),
        )?;
        let router = InputRouter::new(app_config.input);

        tracing::info!("Arm viewer ready");

        Ok(Self {
            viewport,
            chain: KinematicChain::robot_arm(),
            joints: JointState::new(),
            router,
            picking: PickEngine::new(),
            input: EguiInput::new(),
            config,
            stats: FrameStats::default(),
            last_frame: Instant::now(),
        })
    }

    fn show_overlay(&mut self, ctx: &egui::Context) {
        let info = OverlayInfo {
            pick_status: self.picking.status(),
            active: self.joints.active(),
            alternate_mode: self.router.alternate_mode(),
        };
        let renderer_config = self.viewport.renderer.config();
        let response = overlay::show(
            ctx,
            &info,
            renderer_config.show_grid,
            renderer_config.show_axes,
        );

        if let Some(show) = response.show_grid {
            self.viewport.renderer.set_show_grid(show);
            self.config.config_mut().renderer.show_grid = show;
        }
        if let Some(show) = response.show_axes {
            self.viewport.renderer.set_show_axes(show);
            self.config.config_mut().renderer.show_axes = show;
        }
    }

    fn show_viewport(&mut self, ui: &mut egui::Ui, frame: &eframe::Frame) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        for event in self.input.collect(ui.ctx(), &response) {
            self.router.handle(event, &mut self.joints);
        }
        if let Some(cursor) = self.router.take_pick_request() {
            self.picking.begin(cursor);
        }

        if let Some(delta) = self.router.take_camera_orbit(&self.joints) {
            self.viewport.renderer.orbit_camera(delta);
        }

        let transforms = self.chain.evaluate(&mut self.joints, &mut self.router);
        let scene = ArmScene::from_pose(&transforms, &self.joints);

        let Some(render_state) = frame.wgpu_render_state() else {
            return;
        };
        let ppp = ui.ctx().pixels_per_point();
        let width = (rect.width() * ppp).round() as u32;
        let height = (rect.height() * ppp).round() as u32;
        let texture_id = {
            let mut egui_renderer = render_state.renderer.write();
            self.viewport.ensure_texture(width, height, &mut egui_renderer)
        };

        if let PickPhase::Picking { cursor } = self.picking.phase() {
            let sample = self.viewport.pick(&scene, cursor);
            self.picking.resolve(sample);
        }

        self.viewport.render(&scene);

        ui.painter().image(
            texture_id,
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

impl eframe::App for ArmViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = Instant::now();
        let frame_time = now - self.last_frame;
        self.last_frame = now;
        self.stats.tick(frame_time);
        self.router.begin_frame(frame_time.as_secs_f32());

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.show_viewport(ui, frame));

        self.show_overlay(ctx);

        ctx.request_repaint();
    }

    fn on_exit(&mut self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}
