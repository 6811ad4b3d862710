//! Translation of egui input into viewer input events

use arm_core::{InputEvent, Key, PointerButton};
use glam::Vec2;

/// Map an egui key to a viewer key
pub fn translate_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::C => Some(Key::C),
        egui::Key::B => Some(Key::B),
        egui::Key::T => Some(Key::T),
        egui::Key::Num1 => Some(Key::Num1),
        egui::Key::Num2 => Some(Key::Num2),
        egui::Key::P => Some(Key::P),
        egui::Key::ArrowLeft => Some(Key::ArrowLeft),
        egui::Key::ArrowRight => Some(Key::ArrowRight),
        egui::Key::ArrowUp => Some(Key::ArrowUp),
        egui::Key::ArrowDown => Some(Key::ArrowDown),
        _ => None,
    }
}

/// Collects events for the viewport each frame.
///
/// egui reports Shift only as a modifier, so presses and releases are
/// synthesized from its edges.
#[derive(Debug, Default)]
pub struct EguiInput {
    shift_down: bool,
}

impl EguiInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift press/release on a modifier edge
    pub fn shift_edge(&mut self, shift: bool) -> Option<InputEvent> {
        if shift == self.shift_down {
            return None;
        }
        self.shift_down = shift;
        Some(InputEvent::Key {
            key: Key::Shift,
            pressed: shift,
        })
    }

    /// Events of this frame. Pointer positions are physical pixels relative
    /// to the viewport's top-left corner.
    pub fn collect(&mut self, ctx: &egui::Context, response: &egui::Response) -> Vec<InputEvent> {
        let rect = response.rect;
        let mut events = Vec::new();

        ctx.input(|i| {
            let ppp = i.pixels_per_point;

            events.extend(self.shift_edge(i.modifiers.shift));

            for event in &i.events {
                if let egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    ..
                } = event
                    && let Some(key) = translate_key(*key)
                {
                    events.push(InputEvent::Key {
                        key,
                        pressed: *pressed,
                    });
                }
            }

            // Presses over the overlay window are not the viewport's
            if i.pointer.primary_pressed()
                && response.hovered()
                && let Some(pos) = i.pointer.interact_pos()
                && rect.contains(pos)
            {
                let local = (pos - rect.min) * ppp;
                events.push(InputEvent::PointerPressed {
                    button: PointerButton::Primary,
                    position: Vec2::new(local.x, local.y),
                });
            }

            if response.dragged() {
                let delta = response.drag_delta() * ppp;
                if delta != egui::Vec2::ZERO {
                    events.push(InputEvent::PointerDragged {
                        delta: Vec2::new(delta.x, delta.y),
                    });
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_keys_are_mapped() {
        assert_eq!(translate_key(egui::Key::Num1), Some(Key::Num1));
        assert_eq!(translate_key(egui::Key::P), Some(Key::P));
        assert_eq!(translate_key(egui::Key::Q), None);
        assert_eq!(translate_key(egui::Key::Escape), None);
    }

    #[test]
    fn test_shift_edges() {
        let mut input = EguiInput::new();
        assert_eq!(input.shift_edge(false), None);
        assert_eq!(
            input.shift_edge(true),
            Some(InputEvent::Key {
                key: Key::Shift,
                pressed: true
            })
        );
        assert_eq!(input.shift_edge(true), None);
        assert_eq!(
            input.shift_edge(false),
            Some(InputEvent::Key {
                key: Key::Shift,
                pressed: false
            })
        );
    }
}
