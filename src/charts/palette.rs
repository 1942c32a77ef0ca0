//! Shared colour tables for the interactive and static charts.
//!
//! Colours are plain RGB triples so both egui and plotters can use them.

pub type Rgb = (u8, u8, u8);

/// Qualitative palette used by the content-type pie.
pub const SET3: [Rgb; 12] = [
    (141, 211, 199),
    (255, 255, 179),
    (190, 186, 218),
    (251, 128, 114),
    (128, 177, 211),
    (253, 180, 98),
    (179, 222, 105),
    (252, 205, 229),
    (217, 217, 217),
    (188, 128, 189),
    (204, 235, 197),
    (255, 237, 111),
];

/// Soft palette for the word cloud on a black background.
pub const PASTEL1: [Rgb; 9] = [
    (251, 180, 174),
    (179, 205, 227),
    (204, 235, 197),
    (222, 203, 228),
    (254, 217, 166),
    (255, 255, 204),
    (229, 216, 189),
    (253, 218, 236),
    (242, 242, 242),
];

/// One colour per line series (content type).
pub const SERIES: [Rgb; 6] = [
    (99, 110, 250),
    (239, 85, 59),
    (0, 204, 150),
    (171, 99, 250),
    (255, 161, 90),
    (25, 211, 243),
];

/// Histogram fill.
pub const SKY_BLUE: Rgb = (135, 206, 235);

pub const VIRIDIS: [Rgb; 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

pub const PLASMA: [Rgb; 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

pub const YL_GN_BU: [Rgb; 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

/// Pick a categorical colour, cycling when the palette runs out.
pub fn categorical(palette: &[Rgb], index: usize) -> Rgb {
    palette[index % palette.len()]
}

/// Linear interpolation along a continuous colour scale, `t` in `[0, 1]`.
pub fn sample_scale(stops: &[Rgb], t: f64) -> Rgb {
    if stops.is_empty() {
        return (0, 0, 0);
    }
    if stops.len() == 1 || !t.is_finite() {
        return stops[0];
    }

    let t = t.clamp(0.0, 1.0);
    let pos = t * (stops.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(stops.len() - 1);
    let frac = pos - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (stops[lower], stops[upper]);
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Fraction of `value` within `[0, max]`, 0 when `max` is 0.
pub fn normalized(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        value / max
    }
}

/// Dark or light text, whichever reads better on `background`.
pub fn contrasting_text(background: Rgb) -> Rgb {
    let luma = 0.299 * background.0 as f64 + 0.587 * background.1 as f64
        + 0.114 * background.2 as f64;
    if luma > 140.0 {
        (0, 0, 0)
    } else {
        (255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints_and_midpoint() {
        assert_eq!(sample_scale(&VIRIDIS, 0.0), VIRIDIS[0]);
        assert_eq!(sample_scale(&VIRIDIS, 1.0), VIRIDIS[4]);
        assert_eq!(sample_scale(&VIRIDIS, 0.5), VIRIDIS[2]);
        assert_eq!(sample_scale(&[(0, 0, 0), (100, 200, 50)], 0.5), (50, 100, 25));
        assert_eq!(sample_scale(&VIRIDIS, 7.0), VIRIDIS[4]);
    }

    #[test]
    fn categorical_cycles() {
        assert_eq!(categorical(&SET3, 12), SET3[0]);
    }

    #[test]
    fn text_contrast() {
        assert_eq!(contrasting_text(YL_GN_BU[0]), (0, 0, 0));
        assert_eq!(contrasting_text(YL_GN_BU[8]), (255, 255, 255));
    }
}
