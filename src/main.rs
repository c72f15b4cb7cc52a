//! Bouncing circle entry point
//!
//! Owns the window and the frame loop: poll pending key events, advance
//! the simulation once, draw the two passes, present at vsync. Any
//! one-shot setup failure is logged and terminates the process with a
//! non-zero exit code before the loop starts.

use std::process::ExitCode;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use bouncing_circle::consts::WINDOW_SIZE;
use bouncing_circle::renderer::RenderState;
use bouncing_circle::sim::{KeyAction, SimKey, SimState, advance, apply_key};

/// Map the keys the simulation cares about; everything else is dropped
fn translate_key(code: KeyCode) -> Option<SimKey> {
    match code {
        KeyCode::ArrowUp => Some(SimKey::Up),
        KeyCode::ArrowDown => Some(SimKey::Down),
        KeyCode::KeyS => Some(SimKey::Launch),
        _ => None,
    }
}

struct App {
    state: SimState,
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    setup_failed: bool,
}

impl App {
    fn new() -> Self {
        Self {
            state: SimState::new(),
            window: None,
            render: None,
            setup_failed: false,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render.is_some() {
            return; // Already initialized
        }

        let window_attrs = Window::default_attributes()
            .with_title("Bouncing Circle")
            .with_inner_size(LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                self.setup_failed = true;
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        match pollster::block_on(RenderState::new(window.clone(), size.width, size.height)) {
            Ok(render) => {
                self.render = Some(render);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("{err}");
                self.setup_failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let Some(key) = translate_key(code) else {
                    return;
                };
                let action = match (state, repeat) {
                    (ElementState::Pressed, false) => KeyAction::Press,
                    (ElementState::Pressed, true) => KeyAction::Repeat,
                    (ElementState::Released, _) => KeyAction::Release,
                };
                apply_key(&mut self.state, key, action);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(ref mut render) = self.render {
                    render.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                advance(&mut self.state);

                let (Some(render), Some(window)) = (self.render.as_mut(), self.window.as_ref())
                else {
                    return;
                };
                match render.render(&self.state) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = window.inner_size();
                        render.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory");
                        event_loop.exit();
                    }
                    Err(err) => {
                        log::warn!("surface error: {err}");
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Bouncing Circle starting...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("failed to create event loop: {err}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {err}");
        return ExitCode::FAILURE;
    }

    if app.setup_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
