use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ScoreRange;

// Hue endpoints of the sentiment ramp (degrees): red for negative, green for positive.
const NEGATIVE_HUE: f32 = 0.0;
const POSITIVE_HUE: f32 = 120.0;

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: sentiment score → Color32
// ---------------------------------------------------------------------------

/// Number of colour steps on the ramp. Points are drawn one series per step.
pub const BUCKETS: usize = 16;

/// Maps sentiment scores onto a red → green hue ramp spanning the dataset's
/// observed bounds, quantised into [`BUCKETS`] steps.
#[derive(Debug, Clone)]
pub struct SentimentColors {
    bounds: ScoreRange,
    default_color: Color32,
}

impl SentimentColors {
    pub fn new(bounds: ScoreRange) -> Self {
        SentimentColors {
            bounds,
            default_color: Color32::GRAY,
        }
    }

    /// Position of `score` within the bounds, clamped to `0.0..=1.0`.
    fn normalize(&self, score: f64) -> Option<f32> {
        if score.is_nan() {
            return None;
        }
        let span = self.bounds.high - self.bounds.low;
        if span.abs() < f64::EPSILON {
            return Some(0.5);
        }
        Some(((score - self.bounds.low) / span).clamp(0.0, 1.0) as f32)
    }

    /// Ramp step for `score`; `None` for NaN.
    pub fn bucket_for(&self, score: f64) -> Option<usize> {
        self.normalize(score)
            .map(|t| (t * (BUCKETS - 1) as f32).round() as usize)
    }

    pub fn bucket_color(&self, bucket: Option<usize>) -> Color32 {
        match bucket {
            Some(b) => {
                let t = b.min(BUCKETS - 1) as f32 / (BUCKETS - 1) as f32;
                hsl_to_color32(NEGATIVE_HUE + t * (POSITIVE_HUE - NEGATIVE_HUE), 0.75, 0.5)
            }
            None => self.default_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_for(colors: &SentimentColors, score: f64) -> Color32 {
        colors.bucket_color(colors.bucket_for(score))
    }

    #[test]
    fn extremes_map_to_ramp_ends() {
        let colors = SentimentColors::new(ScoreRange::new(-1.0, 1.0));
        let neg = color_for(&colors, -1.0);
        let pos = color_for(&colors, 1.0);
        assert!(neg.r() > neg.g());
        assert!(pos.g() > pos.r());
    }

    #[test]
    fn out_of_bounds_is_clamped() {
        let colors = SentimentColors::new(ScoreRange::new(-1.0, 1.0));
        assert_eq!(color_for(&colors, 5.0), color_for(&colors, 1.0));
    }

    #[test]
    fn buckets_cover_the_whole_ramp() {
        let colors = SentimentColors::new(ScoreRange::new(0.0, 1.0));
        assert_eq!(colors.bucket_for(0.0), Some(0));
        assert_eq!(colors.bucket_for(1.0), Some(BUCKETS - 1));
        assert_eq!(colors.bucket_for(f64::NAN), None);
    }

    #[test]
    fn nan_and_flat_bounds() {
        let colors = SentimentColors::new(ScoreRange::new(0.3, 0.3));
        assert_eq!(color_for(&colors, f64::NAN), Color32::GRAY);
        assert_eq!(color_for(&colors, 0.3), color_for(&colors, -7.0));
    }
}
