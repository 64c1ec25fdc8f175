//! Content placement within regions and cells
//!
//! Content keeps its aspect ratio, is scaled to the largest size that fits
//! the target and is centred in it.

use super::{Placement, Rect};

/// Fit `src_width x src_height` inside `target`, centred.
///
/// `scale = min(W / w, H / h)`, so the scaled content never exceeds the
/// target and its offsets inside it are never negative. A zero-sized source
/// (or target) yields scale 0 and an empty rect at the target centre.
pub fn fit_rect(src_width: f32, src_height: f32, target: &Rect) -> Placement {
    if src_width <= 0.0 || src_height <= 0.0 || target.width <= 0.0 || target.height <= 0.0 {
        return Placement {
            scale: 0.0,
            rect: Rect::new(target.center_x(), target.center_y(), 0.0, 0.0),
        };
    }

    let scale = calculate_scale(src_width, src_height, target.width, target.height);

    // Clamp against float drift so the result always stays inside the target
    let width = (src_width * scale).min(target.width);
    let height = (src_height * scale).min(target.height);

    Placement {
        scale,
        rect: Rect::new(
            target.x + (target.width - width) / 2.0,
            target.y + (target.height - height) / 2.0,
            width,
            height,
        ),
    }
}

/// Fit a pixel size inside a pixel box.
///
/// Returns the scaled `(width, height)` and the integer `(x, y)` offset that
/// centres it, measured from the top-left of the box.
pub fn fit_pixels(src: (u32, u32), target: (u32, u32)) -> ((u32, u32), (u32, u32)) {
    let (sw, sh) = src;
    let (tw, th) = target;
    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return ((0, 0), (tw / 2, th / 2));
    }

    let scale = calculate_scale(sw as f32, sh as f32, tw as f32, th as f32);
    let w = ((sw as f32 * scale).round() as u32).clamp(1, tw);
    let h = ((sh as f32 * scale).round() as u32).clamp(1, th);
    ((w, h), ((tw - w) / 2, (th - h) / 2))
}

/// Scale factor that fits the source inside the target
fn calculate_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fit() {
        // Width-limited
        let scale = calculate_scale(800.0, 600.0, 400.0, 400.0);
        assert!((scale - 0.5).abs() < 0.001);

        // Height-limited
        let scale = calculate_scale(400.0, 800.0, 400.0, 400.0);
        assert!((scale - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_fit_rect_centres_horizontally() {
        let target = Rect::new(0.0, 0.0, 400.0, 300.0);
        let placement = fit_rect(100.0, 100.0, &target);
        assert!((placement.scale - 3.0).abs() < 0.001);
        assert!((placement.rect.x - 50.0).abs() < 0.001);
        assert!((placement.rect.y - 0.0).abs() < 0.001);
        assert!(target.contains(&placement.rect));
    }

    #[test]
    fn test_fit_rect_centres_vertically() {
        let target = Rect::new(10.0, 20.0, 200.0, 400.0);
        let placement = fit_rect(400.0, 200.0, &target);
        assert!((placement.scale - 0.5).abs() < 0.001);
        assert!((placement.rect.width - 200.0).abs() < 0.001);
        assert!((placement.rect.height - 100.0).abs() < 0.001);
        assert!((placement.rect.y - 170.0).abs() < 0.001);
    }

    #[test]
    fn test_fit_rect_degenerate_source() {
        let target = Rect::new(0.0, 0.0, 100.0, 50.0);
        let placement = fit_rect(0.0, 10.0, &target);
        assert_eq!(placement.scale, 0.0);
        assert_eq!(placement.rect, Rect::new(50.0, 25.0, 0.0, 0.0));
    }

    #[test]
    fn test_fit_pixels_integer_offsets() {
        let ((w, h), (x, y)) = fit_pixels((100, 50), (80, 80));
        assert_eq!((w, h), (80, 40));
        assert_eq!((x, y), (0, 20));
    }
}
