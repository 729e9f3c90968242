//! Pixel composition primitives: fills, circular blits, rings and plates.
//!
//! Shapes are rasterized by testing pixel centers, so the same inputs always
//! produce the same pixels.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;

use crate::layout::{PlateRect, Rect};

/// Fill `rect` with an opaque color, clipped to the surface.
pub fn fill_rect(base: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let r = imageproc::rect::Rect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height);
    draw_filled_rect_mut(base, r, color);
}

/// Alpha-composite `top` onto `base` at `(x, y)`, keeping only pixels whose
/// centers fall inside the circle inscribed in `top`.
pub fn blit_circle(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    let radius = top.width().min(top.height()) as f32 / 2.0;
    let (cx, cy) = (top.width() as f32 / 2.0, top.height() as f32 / 2.0);

    for (dx, dy, pixel) in top.enumerate_pixels() {
        let fx = dx as f32 + 0.5 - cx;
        let fy = dy as f32 + 0.5 - cy;
        if fx * fx + fy * fy > radius * radius {
            continue;
        }
        put_blended(base, x + dx, y + dy, pixel);
    }
}

/// Stroke a ring of `width` pixels centered on the edge of the circle
/// inscribed in `rect`.
pub fn stroke_ring(base: &mut RgbaImage, rect: Rect, width: u32, color: Rgba<u8>) {
    if width == 0 || rect.width == 0 {
        return;
    }
    let radius = rect.width.min(rect.height) as f32 / 2.0;
    let (cx, cy) = rect.center();
    let half = width as f32 / 2.0;
    let (inner, outer) = ((radius - half).max(0.0), radius + half);

    let x0 = (cx - outer).floor().max(0.0) as u32;
    let y0 = (cy - outer).floor().max(0.0) as u32;
    let x1 = ((cx + outer).ceil() as u32).min(base.width());
    let y1 = ((cy + outer).ceil() as u32).min(base.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let fx = px as f32 + 0.5 - cx;
            let fy = py as f32 + 0.5 - cy;
            let d = (fx * fx + fy * fy).sqrt();
            if d >= inner && d <= outer {
                put_blended(base, px, py, &color);
            }
        }
    }
}

/// Fill a rounded rectangle, alpha-blending `color` over existing pixels.
pub fn fill_rounded_rect(base: &mut RgbaImage, plate: PlateRect, color: Rgba<u8>) {
    let r = plate.radius.min(plate.width / 2.0).min(plate.height / 2.0).max(0.0);
    let (left, top) = (plate.x, plate.y);
    let (right, bottom) = (plate.x + plate.width, plate.y + plate.height);

    let x0 = left.floor().max(0.0) as u32;
    let y0 = top.floor().max(0.0) as u32;
    let x1 = (right.ceil().max(0.0) as u32).min(base.width());
    let y1 = (bottom.ceil().max(0.0) as u32).min(base.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let fx = px as f32 + 0.5;
            let fy = py as f32 + 0.5;
            if fx < left || fx > right || fy < top || fy > bottom {
                continue;
            }
            let nx = fx.clamp(left + r, right - r);
            let ny = fy.clamp(top + r, bottom - r);
            let (ex, ey) = (fx - nx, fy - ny);
            if ex * ex + ey * ey <= r * r {
                put_blended(base, px, py, &color);
            }
        }
    }
}

fn put_blended(base: &mut RgbaImage, x: u32, y: u32, pixel: &Rgba<u8>) {
    if x >= base.width() || y >= base.height() {
        return;
    }
    let alpha = pixel[3] as f32 / 255.0;
    if alpha > 0.99 {
        base.put_pixel(x, y, *pixel);
    } else if alpha > 0.01 {
        let bg = base.get_pixel(x, y);
        let blended = blend_pixel(bg, pixel, alpha);
        base.put_pixel(x, y, blended);
    }
}

/// Mix `fg` over `bg` at `alpha`, producing an opaque pixel.
pub fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv).round() as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv).round() as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv).round() as u8,
        255,
    ])
}
