//! Catppuccin Mocha colors converted for a linear (sRGB surface) pipeline

use catppuccin::PALETTE;

/// sRGB channel (0-255) to linear intensity
pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_rgb(color: &catppuccin::Color) -> [f32; 3] {
    [
        srgb_to_linear(color.rgb.r),
        srgb_to_linear(color.rgb.g),
        srgb_to_linear(color.rgb.b),
    ]
}

/// Clear color: Mocha base (#1e1e2e)
pub fn background() -> wgpu::Color {
    let [r, g, b] = linear_rgb(&PALETTE.mocha.colors.base);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Point color: Mocha lavender
pub fn particle_color() -> [f32; 4] {
    let [r, g, b] = linear_rgb(&PALETTE.mocha.colors.lavender);
    [r, g, b, 1.0]
}
