//! Scroll register protocol tests: the v/t/x/w machinery, the coarse-X and
//! fine-Y increment rules, and the horizontal/vertical copies during
//! rendering.

use super::*;
use crate::ppu::{coarse_x_increment, fine_y_increment};

// ========================================
// PPUSCROLL Writes
// ========================================

#[test]
fn test_scroll_first_write_sets_coarse_x_and_fine_x() {
    let mut ppu = Ppu::new();

    // X scroll = 0x7D: coarse X = 0x0F, fine X = 5
    ppu.register_write(PPUSCROLL, 0x7D);

    assert_eq!(ppu.temp_address() & 0x001F, 0x0F, "t[0:4] = data >> 3");
    assert_eq!(ppu.fine_x(), 0x05, "x = data & 7");
    assert!(ppu.write_latch);
}

#[test]
fn test_scroll_second_write_sets_coarse_y_and_fine_y() {
    let mut ppu = Ppu::new();

    ppu.register_write(PPUSCROLL, 0x00);
    // Y scroll = 0x5E: coarse Y = 0x0B, fine Y = 6
    ppu.register_write(PPUSCROLL, 0x5E);

    assert_eq!(ppu.temp_address() & 0x03E0, 0x0B << 5, "t[5:9] = data >> 3");
    assert_eq!(ppu.temp_address() & 0x7000, 6 << 12, "t[12:14] = data & 7");
    assert!(!ppu.write_latch);
}

#[test]
fn test_scroll_then_addr_share_the_toggle() {
    let mut ppu = Ppu::new();

    ppu.register_write(PPUSCROLL, 0x10); // w: 0 -> 1
    ppu.register_write(PPUADDR, 0x3F); // treated as the second PPUADDR write
    assert!(!ppu.write_latch, "PPUSCROLL and PPUADDR share w");
}

#[test]
fn test_status_read_resets_write_sequence() {
    let mut ppu = Ppu::new();

    ppu.register_write(PPUADDR, 0x21);
    let _ = ppu.register_read(PPUSTATUS);

    // This write is a first write again
    ppu.register_write(PPUADDR, 0x3F);
    ppu.register_write(PPUADDR, 0x00);
    assert_eq!(ppu.vram_address(), 0x3F00);
}

// ========================================
// $2006 Write Pair
// ========================================

#[test]
fn test_addr_write_property() {
    let mut ppu = Ppu::new();

    // After the first write of byte b with w == 0, t[8:13] == b & 0x3F and
    // t[14] == 0; the second write copies t into v.
    let b = 0xAB;
    ppu.register_write(PPUADDR, b);
    assert_eq!(
        (ppu.temp_address() >> 8) & 0x3F,
        (b as u16) & 0x3F,
        "t bits 8-13"
    );
    assert_eq!(ppu.temp_address() >> 14, 0, "t bit 14 cleared");

    ppu.register_write(PPUADDR, 0xCD);
    assert_eq!(ppu.vram_address(), ppu.temp_address());
}

// ========================================
// Coarse-X / Fine-Y Increment Rules
// ========================================

#[test]
fn test_coarse_x_increment_simple() {
    assert_eq!(coarse_x_increment(0x0000), 0x0001);
    assert_eq!(coarse_x_increment(0x001E), 0x001F);
}

#[test]
fn test_coarse_x_increment_wraps_and_toggles_nametable() {
    // Coarse X 31 wraps to 0 and flips bit 10
    assert_eq!(coarse_x_increment(0x001F), 0x0400);
    assert_eq!(coarse_x_increment(0x041F), 0x0000, "bit 10 toggles back");
}

#[test]
fn test_coarse_x_increment_preserves_other_bits() {
    // Fine Y and coarse Y ride along untouched; only coarse X clears and
    // bit 10 toggles
    assert_eq!(coarse_x_increment(0x7BFF), 0x7FE0);
}

#[test]
fn test_fine_y_increment_simple() {
    assert_eq!(fine_y_increment(0x0000), 0x1000);
    assert_eq!(fine_y_increment(0x5000), 0x6000);
}

#[test]
fn test_fine_y_increment_spills_into_coarse_y() {
    // Fine Y 7, coarse Y 0 -> fine Y 0, coarse Y 1
    assert_eq!(fine_y_increment(0x7000), 0x0020);
}

#[test]
fn test_fine_y_increment_row_29_toggles_vertical_nametable() {
    // v = 0x73A0: fine Y = 7, coarse Y = 29 -> both clear, bit 11 toggles
    assert_eq!(fine_y_increment(0x73A0), 0x0800);
}

#[test]
fn test_fine_y_increment_row_31_wraps_without_toggle() {
    // Coarse Y 31 (attribute-table rows) wraps to 0, bit 11 unchanged
    let v = 0x7000 | (31 << 5);
    assert_eq!(fine_y_increment(v), 0x0000);
}

// ========================================
// Scroll Copies During Rendering
// ========================================

#[test]
fn test_horizontal_copy_at_dot_257() {
    let mut ppu = ppu_with_mapper();
    ppu.register_write(PPUMASK, 0x08);

    // Coarse X = 5 and horizontal nametable via t
    ppu.register_write(PPUCTRL, 0x01);
    ppu.register_write(PPUSCROLL, 5 << 3);
    ppu.register_write(PPUSCROLL, 0x00);

    clock_to(&mut ppu, 0, 258);

    assert_eq!(ppu.vram_address() & 0x041F, 0x0405, "coarse X and bit 10 from t");
}

#[test]
fn test_vertical_copy_on_prerender_line() {
    let mut ppu = ppu_with_mapper();

    // Set up t with coarse Y = 3, fine Y = 2 before enabling rendering
    ppu.register_write(PPUSCROLL, 0x00);
    ppu.register_write(PPUSCROLL, (3 << 3) | 2);
    ppu.register_write(PPUMASK, 0x08);

    // Run from power-on through the pre-render copy window
    clock_to(&mut ppu, -1, 305);

    let v = ppu.vram_address();
    assert_eq!((v >> 12) & 0x07, 2, "fine Y copied from t");
    assert_eq!((v >> 5) & 0x1F, 3, "coarse Y copied from t");
}

#[test]
fn test_no_copies_with_rendering_disabled() {
    let mut ppu = ppu_with_mapper();

    ppu.register_write(PPUSCROLL, 0xFF);
    ppu.register_write(PPUSCROLL, 0xFF);

    let v_before = ppu.vram_address();
    for _ in 0..(341 * 3) {
        ppu.clock();
    }
    assert_eq!(ppu.vram_address(), v_before, "v is static while blanked");
}
