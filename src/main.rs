use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use scroll_story::cli::Cli;
use scroll_story::config::FogConfig;
use scroll_story::core::{Action, Clock, Throttled, WinitInput};
use scroll_story::math::Rgb;
use scroll_story::motion::RequestId;
use scroll_story::traits::{FogSink, HasFieldOfView, StoryObserver};
use scroll_story::{Camera, Story, StoryConfig};

// === Constants ===

const STATUS_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;
const WINDOW_TITLE: &str = "Scroll Story";

// === Host collaborators ===

/// Scene fog as last set by the story
#[derive(Debug)]
struct SceneFog {
    color: Rgb,
    near: f32,
    far: f32,
}

impl SceneFog {
    fn new(config: FogConfig) -> Self {
        Self {
            color: config.color,
            near: config.range.near,
            far: config.range.far,
        }
    }
}

impl FogSink for SceneFog {
    fn set_fog(&mut self, color: Rgb, near: f32, far: f32) {
        self.color = color;
        self.near = near;
        self.far = far;
        log::trace!("Fog {} near {:.3} far {:.3}", color, near, far);
    }
}

/// Caption and prompt state shown to the viewer
#[derive(Debug, Default)]
struct Overlay {
    caption_visible: bool,
    title: String,
    body: String,
    prompt: bool,
    dirty: bool,
}

impl Overlay {
    fn window_title(&self) -> String {
        if self.prompt {
            format!("{} - press Enter to continue", WINDOW_TITLE)
        } else if self.caption_visible && !self.title.is_empty() {
            format!("{} - {} {}", WINDOW_TITLE, self.title, self.body)
        } else {
            WINDOW_TITLE.to_string()
        }
    }
}

impl StoryObserver for Overlay {
    fn on_caption_change(&mut self, active: bool, view_index: usize) {
        log::debug!("Caption {} for view {}", if active { "shown" } else { "hidden" }, view_index);
        self.caption_visible = active;
        if active {
            self.title.clear();
            self.body.clear();
            self.prompt = false;
        }
        self.dirty = true;
    }

    fn on_caption_text(&mut self, title: &str, body: &str) {
        self.title = title.to_string();
        self.body = body.to_string();
        self.dirty = true;
    }

    fn on_sequence_complete(&mut self) {
        println!("Press Enter or Space to continue");
        self.prompt = true;
        self.dirty = true;
    }

    fn on_motion_complete(&mut self, id: RequestId) {
        log::debug!("Camera arrived for {:?}", id);
    }
}

// === Application ===

struct App {
    story: Story,
    camera: Camera,
    fog: SceneFog,
    overlay: Overlay,
    input: WinitInput,
    clock: Clock,
    status: Throttled,
    window: Option<Arc<Window>>,
    started: bool,
}

impl App {
    fn new(story: Story, camera: Camera, fog: FogConfig) -> Self {
        Self {
            story,
            camera,
            fog: SceneFog::new(fog),
            overlay: Overlay::default(),
            input: WinitInput::new(),
            clock: Clock::new(),
            status: Throttled::new(STATUS_INTERVAL),
            window: None,
            started: false,
        }
    }

    fn continue_story(&mut self) {
        if !self.story.continue_available() {
            log::debug!("Continue ignored, sequence still playing");
            return;
        }

        self.overlay.prompt = false;
        self.overlay.dirty = true;
        let now = self.clock.elapsed();
        if let Err(e) = self.story.trigger_finale(now, &self.camera, &mut self.overlay) {
            log::error!("Finale failed: {}", e);
        }
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        let now = self.clock.elapsed();

        self.story.frame(
            delta,
            now,
            &mut self.camera,
            &mut self.fog,
            &mut self.overlay,
        );

        if self.status.try_tick(delta) {
            log::info!(
                "\"{}\" camera {} fov {:.0} fog {:.2}..{:.2}",
                self.story.sequencer().current_view().caption.title,
                self.story.motion().live_pose(&self.camera),
                self.camera.fov(),
                self.fog.near,
                self.fog.far
            );
        }

        if self.overlay.dirty {
            if let Some(window) = &self.window {
                window.set_title(&self.overlay.window_title());
            }
            self.overlay.dirty = false;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(WINDOW_TITLE)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window);
        }

        if !self.started {
            self.story
                .start(&mut self.camera, &mut self.fog, &mut self.overlay);
            self.clock.reset();
            self.started = true;
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match self.input.process_event(&event) {
            Some(Action::Quit) => {
                self.story.stop(&mut self.overlay);
                event_loop.exit();
                return;
            }
            Some(Action::Continue) => self.continue_story(),
            None => {}
        }

        if let WindowEvent::RedrawRequested = event {
            self.redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// === Headless ===

fn run_headless(cli: &Cli, mut story: Story, mut camera: Camera, fog: FogConfig) -> Result<()> {
    let fps = if cli.fps.is_finite() && cli.fps > 0.0 { cli.fps } else { 60.0 };
    let delta = 1.0 / fps;
    let frames = (cli.duration.max(0.0) * fps).ceil() as u64;

    let mut fog = SceneFog::new(fog);
    let mut overlay = Overlay::default();
    let mut status = Throttled::new(STATUS_INTERVAL);

    story.start(&mut camera, &mut fog, &mut overlay);

    for frame in 1..=frames {
        let now = Duration::from_secs_f64(frame as f64 / f64::from(fps));
        story.frame(delta, now, &mut camera, &mut fog, &mut overlay);

        if cli.auto_finale && story.continue_available() {
            overlay.prompt = false;
            story.trigger_finale(now, &camera, &mut overlay)?;
        }

        if status.try_tick(delta) {
            log::info!(
                "t={:.1}s view {} \"{}\" {}",
                now.as_secs_f32(),
                story.sequencer().current_index(),
                story.sequencer().current_view().caption.title,
                story.motion().live_pose(&camera)
            );
        }
    }

    story.stop(&mut overlay);
    println!("Final camera: {}", story.motion().live_pose(&camera));
    println!("Final fog: {} near {:.3} far {:.3}", fog.color, fog.near, fog.far);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.story {
        Some(path) => StoryConfig::load(path)?,
        None => StoryConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.motion = profile.into();
    }

    let story = Story::new(&config)?;
    let camera = Camera::new(config.camera.start, config.camera.fov);

    if cli.headless {
        return run_headless(&cli, story, camera, config.fog);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(story, camera, config.fog);

    println!("Scroll Story - Enter/Space to continue when prompted, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
