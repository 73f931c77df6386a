//! SDL2 window, input mapping and frame pacing.
//!
//! SDL2 is used only to show the color buffer and read the keyboard. Every
//! key maps to an engine [`Command`]; the window holds no scene state.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::config::FRAME_TARGET_TIME;
use crate::engine::Command;
use crate::math::vec3::Vec3;

/// Rotation per frame while an arrow key is held, in radians.
pub const ROTATE_STEP: f64 = 0.05;
/// Translation per key press, in world units.
pub const TRANSLATE_STEP: f64 = 0.5;
pub const SCALE_UP: f64 = 1.1;
pub const SCALE_DOWN: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// One-shot command for a key press.
pub fn command_for_key(key: Keycode) -> Option<Command> {
    let command = match key {
        Keycode::T => Command::Translate(Vec3::new(TRANSLATE_STEP, 0.0, 0.0)),
        Keycode::G => Command::Translate(Vec3::new(-TRANSLATE_STEP, 0.0, 0.0)),
        Keycode::Y => Command::Translate(Vec3::new(0.0, TRANSLATE_STEP, 0.0)),
        Keycode::H => Command::Translate(Vec3::new(0.0, -TRANSLATE_STEP, 0.0)),
        Keycode::U => Command::Translate(Vec3::new(0.0, 0.0, TRANSLATE_STEP)),
        Keycode::J => Command::Translate(Vec3::new(0.0, 0.0, -TRANSLATE_STEP)),
        Keycode::Equals | Keycode::Plus | Keycode::KpPlus => Command::Scale(SCALE_UP),
        Keycode::Minus | Keycode::KpMinus => Command::Scale(SCALE_DOWN),
        Keycode::R => Command::Reset,
        Keycode::Space => Command::ToggleAutoRotate,
        Keycode::W => Command::ToggleRenderMode,
        Keycode::C => Command::ToggleClipDemo,
        Keycode::Tab => Command::NextObject,
        Keycode::Num1 => Command::Select(0),
        Keycode::Num2 => Command::Select(1),
        Keycode::Num3 => Command::Select(2),
        Keycode::Num4 => Command::Select(3),
        _ => return None,
    };
    Some(command)
}

/// Continuous command while a key is held.
pub fn command_for_held(scancode: Scancode) -> Option<Command> {
    match scancode {
        Scancode::Left => Some(Command::RotateY(-ROTATE_STEP)),
        Scancode::Right => Some(Command::RotateY(ROTATE_STEP)),
        Scancode::Up => Some(Command::RotateX(-ROTATE_STEP)),
        Scancode::Down => Some(Command::RotateX(ROTATE_STEP)),
        _ => None,
    }
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Frames are never skipped; a slow frame just delays the next one.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let target = FRAME_TARGET_TIME as u64;
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < target {
            std::thread::sleep(std::time::Duration::from_millis(target - delta_time));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("opened {width}x{height} window");

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drain pending events, appending key presses and held keys to `commands`.
    pub fn poll_events(&mut self, commands: &mut Vec<Command>) -> WindowEvent {
        let mut result = WindowEvent::None;

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => commands.extend(command_for_key(key)),
                _ => {}
            }
        }

        commands.extend(
            self.event_pump
                .keyboard_state()
                .pressed_scancodes()
                .filter_map(command_for_held),
        );

        result
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for_key(Keycode::R), Some(Command::Reset));
        assert_eq!(command_for_key(Keycode::W), Some(Command::ToggleRenderMode));
        assert_eq!(command_for_key(Keycode::Num3), Some(Command::Select(2)));
        assert_eq!(
            command_for_key(Keycode::T),
            Some(Command::Translate(Vec3::new(0.5, 0.0, 0.0)))
        );
        assert_eq!(command_for_key(Keycode::Q), None);
    }

    #[test]
    fn arrows_rotate_while_held() {
        assert_eq!(
            command_for_held(Scancode::Left),
            Some(Command::RotateY(-ROTATE_STEP))
        );
        assert_eq!(
            command_for_held(Scancode::Down),
            Some(Command::RotateX(ROTATE_STEP))
        );
        assert_eq!(command_for_held(Scancode::A), None);
    }
}
