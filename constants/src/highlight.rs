use bevy::color::Color;

const fn hex(red: u8, green: u8, blue: u8) -> Color {
    Color::srgb(red as f32 / 255.0, green as f32 / 255.0, blue as f32 / 255.0)
}

pub const HOVER_COLOR: Color = hex(0xf9, 0x73, 0x16);
pub const HOVER_INTENSITY: f32 = 0.8;

pub const SELECTION_COLOR: Color = hex(0x38, 0xbd, 0xf8);
pub const SELECTION_INTENSITY: f32 = 1.0;

pub const FILTER_INTENSITY: f32 = 1.2;

pub const TONE_GREEN: Color = hex(0x22, 0xc5, 0x5e);
pub const TONE_YELLOW: Color = hex(0xfb, 0xbf, 0x24);
pub const TONE_RED: Color = hex(0xef, 0x44, 0x44);
