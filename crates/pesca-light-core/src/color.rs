use smart_leds::RGB8;

use crate::state::LightState;

/// Convert HSV to RGB
/// h: hue (0-360), wraps
/// s: saturation (0-100)
/// v: value/brightness (0-100)
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(h: f32, s: f32, v: u8) -> RGB8 {
    let h = h % 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = f32::from(v.min(100)) / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    RGB8::new(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

/// Color the strip should show for a given state. Off is black.
pub fn render(state: &LightState) -> RGB8 {
    if !state.power {
        return RGB8::new(0, 0, 0);
    }
    hsv_to_rgb(state.hue, state.saturation, state.brightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        crate::test::init();
        assert_eq!(hsv_to_rgb(0.0, 100.0, 100), RGB8::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 100.0, 100), RGB8::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 100.0, 100), RGB8::new(0, 0, 255));
    }

    #[test]
    fn zero_saturation_is_white() {
        crate::test::init();
        assert_eq!(hsv_to_rgb(57.0, 0.0, 100), RGB8::new(255, 255, 255));
    }

    #[test]
    fn brightness_scales_value() {
        crate::test::init();
        assert_eq!(hsv_to_rgb(0.0, 100.0, 50), RGB8::new(127, 0, 0));
        assert_eq!(hsv_to_rgb(0.0, 100.0, 0), RGB8::new(0, 0, 0));
    }

    #[test]
    fn hue_wraps_at_360() {
        crate::test::init();
        assert_eq!(hsv_to_rgb(360.0, 100.0, 100), hsv_to_rgb(0.0, 100.0, 100));
        assert_eq!(hsv_to_rgb(480.0, 100.0, 100), hsv_to_rgb(120.0, 100.0, 100));
    }

    #[test]
    fn render_off_is_black() {
        crate::test::init();
        let mut state = LightState {
            power: false,
            brightness: 100,
            hue: 0.0,
            saturation: 100.0,
        };
        assert_eq!(render(&state), RGB8::new(0, 0, 0));

        state.power = true;
        assert_eq!(render(&state), RGB8::new(255, 0, 0));
    }
}
