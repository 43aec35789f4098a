//! Background rendering tests: shift-register pipeline output and the
//! rendering-enable gate.

use super::*;
use crate::ppu::palette::palette_to_rgb;

/// Fill the pipeline inputs for a uniform background: every nametable entry
/// points at tile 1, tile 1's low plane is solid ones (shade 1 everywhere),
/// attributes select palette 0, and the palette maps shade 1 to `color`.
fn uniform_background(ppu: &mut Ppu, color: u8) {
    // Tile 1: low plane $FF, high plane $00 -> shade 1 for all 64 pixels
    for row in 0..8 {
        ppu.write_vram(0x0010 + row, 0xFF);
        ppu.write_vram(0x0018 + row, 0x00);
    }

    // All nametable tiles = 1, all attributes = 0 (palette 0)
    for offset in 0..0x3C0 {
        ppu.write_vram(0x2000 + offset, 0x01);
    }
    for offset in 0x3C0..0x400 {
        ppu.write_vram(0x2000 + offset, 0x00);
    }

    // Palette: universal background black, palette 0 shade 1 = color
    ppu.write_vram(0x3F00, 0x0F);
    ppu.write_vram(0x3F01, color);
}

#[test]
fn test_uniform_background_renders_solid_color() {
    let mut ppu = ppu_with_mapper();
    uniform_background(&mut ppu, 0x21);
    ppu.register_write(PPUMASK, 0x08);

    // Render through the first couple of visible lines
    clock_to(&mut ppu, 2, 0);

    let expected = palette_to_rgb(0x21);
    let frame = ppu.frame();
    assert_eq!(frame[0], expected, "pixel (0, 0)");
    assert_eq!(frame[128], expected, "pixel (128, 0)");
    assert_eq!(frame[255], expected, "pixel (255, 0)");
    assert_eq!(frame[256 + 37], expected, "pixel (37, 1)");
}

#[test]
fn test_full_frame_renders_every_pixel() {
    let mut ppu = ppu_with_mapper();
    uniform_background(&mut ppu, 0x16);
    ppu.register_write(PPUMASK, 0x08);

    for _ in 0..(341 * 262) {
        ppu.clock();
    }

    let expected = palette_to_rgb(0x16);
    assert!(
        ppu.frame().iter().all(|&px| px == expected),
        "every pixel carries the background color"
    );
}

#[test]
fn test_shade_zero_uses_universal_background() {
    let mut ppu = ppu_with_mapper();

    // Empty pattern table: every pixel is shade 0
    for offset in 0..0x400 {
        ppu.write_vram(0x2000 + offset, 0x00);
    }
    ppu.write_vram(0x3F00, 0x2C);
    ppu.write_vram(0x3F01, 0x16); // must not be used
    ppu.register_write(PPUMASK, 0x08);

    clock_to(&mut ppu, 1, 0);

    assert_eq!(ppu.frame()[0], palette_to_rgb(0x2C));
    assert_eq!(ppu.frame()[100], palette_to_rgb(0x2C));
}

#[test]
fn test_rendering_disabled_leaves_framebuffer_untouched() {
    let mut ppu = ppu_with_mapper();
    uniform_background(&mut ppu, 0x21);
    // PPUMASK.b stays clear

    for _ in 0..(341 * 262) {
        ppu.clock();
    }

    assert!(
        ppu.frame().iter().all(|&px| px == 0),
        "framebuffer keeps its prior contents while blanked"
    );
}

#[test]
fn test_background_table_select() {
    let mut ppu = ppu_with_mapper();
    uniform_background(&mut ppu, 0x21);

    // Move tile 1's solid plane into the upper pattern table and point
    // PPUCTRL.B at it; the lower table stays empty
    for row in 0..8 {
        ppu.write_vram(0x0010 + row, 0x00);
        ppu.write_vram(0x1010 + row, 0xFF);
    }
    ppu.register_write(PPUCTRL, 0x10);
    ppu.register_write(PPUMASK, 0x08);

    clock_to(&mut ppu, 1, 0);

    assert_eq!(
        ppu.frame()[0],
        palette_to_rgb(0x21),
        "pattern data comes from the $1000 table"
    );
}

#[test]
fn test_attribute_selects_palette() {
    let mut ppu = ppu_with_mapper();
    uniform_background(&mut ppu, 0x21);

    // Attribute byte for the top-left 4x4 tile block: palette 2 in every
    // quadrant (binary 10 per 2-bit field)
    for offset in 0x3C0..0x400 {
        ppu.write_vram(0x2000 + offset, 0b1010_1010);
    }
    ppu.write_vram(0x3F09, 0x2A); // palette 2, shade 1
    ppu.register_write(PPUMASK, 0x08);

    clock_to(&mut ppu, 1, 0);

    assert_eq!(ppu.frame()[0], palette_to_rgb(0x2A));
}
