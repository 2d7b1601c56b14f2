use crossterm::style::Color;

/// Green at zero, through yellow, to red at the top of the scale
const LATENCY_STOPS: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (0, 255, 0)),    // Bright green
    (0.25, (128, 255, 0)), // Yellow-green
    (0.5, (255, 255, 0)),  // Yellow
    (0.75, (255, 128, 0)), // Orange
    (1.0, (255, 0, 0)),    // Red
];

/// Linear interpolation between two values
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate between two RGB colors
fn lerp_rgb(c1: (u8, u8, u8), c2: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    (
        lerp(c1.0 as f64, c2.0 as f64, t) as u8,
        lerp(c1.1 as f64, c2.1 as f64, t) as u8,
        lerp(c1.2 as f64, c2.2 as f64, t) as u8,
    )
}

/// Interpolate through a list of color stops
fn gradient(stops: &[(f64, (u8, u8, u8))], t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);

    for pair in stops.windows(2) {
        let (t1, c1) = pair[0];
        let (t2, c2) = pair[1];

        if t >= t1 && t <= t2 {
            return lerp_rgb(c1, c2, (t - t1) / (t2 - t1));
        }
    }

    stops.last().map(|(_, c)| *c).unwrap_or((255, 255, 255))
}

/// Maps a latency onto the gradient. The scale tops out at the probe
/// timeout, the worst latency a successful probe can have.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    max_ms: f64,
}

impl ColorScale {
    pub fn new(max_ms: f64) -> Self {
        Self {
            max_ms: max_ms.max(1.0),
        }
    }

    /// Color for a latency cell; lost probes are red
    pub fn color_for_latency(&self, latency_ms: Option<f64>) -> Color {
        match latency_ms {
            None => Color::Red,
            Some(ms) => {
                let (r, g, b) = gradient(&LATENCY_STOPS, ms / self.max_ms);
                Color::Rgb { r, g, b }
            }
        }
    }
}
