//! CPU mirror of the vertex stage.
//!
//! The shader is generated from these constants, so the functions here compute
//! exactly what the GPU draws and are what the tests pin down.

use super::{ColorIndexing, PipelineConfig};

/// Vertices per draw. Never varies across variants.
pub const VERTEX_COUNT: u32 = 3;

/// Instances per draw. Never varies across variants.
pub const INSTANCE_COUNT: u32 = 1;

/// Phase offset per vertex index for the x coordinate.
pub const PHASE_X: f32 = 1.241;

/// Phase offset per vertex index for the y coordinate.
pub const PHASE_Y: f32 = 2.213;

/// Clip-space positions of the static triangle.
pub const STATIC_POSITIONS: [[f32; 2]; 3] = [[0.0, 1.0], [-1.0, -1.0], [1.0, -1.0]];

/// Red, green, blue.
pub const VERTEX_COLORS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// `(sin(t + PHASE_X·i), sin(t + PHASE_Y·i))`.
pub fn animated_position(t: f32, vertex_index: u32) -> [f32; 2] {
    let i = vertex_index as f32;
    [(t + PHASE_X * i).sin(), (t + PHASE_Y * i).sin()]
}

/// Clip-space xy of `vertex_index` at time `t` for `config`.
///
/// Returns `None` for indices outside the static triangle when there is no
/// time uniform.
pub fn vertex_position(config: &PipelineConfig, t: f32, vertex_index: u32) -> Option<[f32; 2]> {
    if config.time_uniform {
        Some(animated_position(t, vertex_index))
    } else {
        STATIC_POSITIONS.get(vertex_index as usize).copied()
    }
}

/// RGB of `vertex_index`. Independent of time.
pub fn vertex_color(indexing: ColorIndexing, vertex_index: u32) -> Option<[f32; 3]> {
    let slot = match indexing {
        ColorIndexing::Direct => vertex_index as usize,
        ColorIndexing::Modulo3 => (vertex_index % 3) as usize,
    };
    VERTEX_COLORS.get(slot).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f64 = 1e-6;

    fn reference(t: f32, i: u32) -> (f64, f64) {
        let (t, i) = (t as f64, i as f64);
        (
            (t + PHASE_X as f64 * i).sin(),
            (t + PHASE_Y as f64 * i).sin(),
        )
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn animated_position_matches_formula() {
        for &t in &[0.0f32, 0.25, 1.0, FRAC_PI_2, 2.5, 4.0] {
            for i in 0..VERTEX_COUNT {
                let [x, y] = animated_position(t, i);
                let (rx, ry) = reference(t, i);
                assert!((x as f64 - rx).abs() < EPS, "x mismatch at t={t} i={i}");
                assert!((y as f64 - ry).abs() < EPS, "y mismatch at t={t} i={i}");
            }
        }
    }

    #[test]
    fn vertex_zero_at_t_zero_is_origin() {
        assert_eq!(animated_position(0.0, 0), [0.0, 0.0]);
    }

    #[test]
    fn vertex_zero_at_half_pi_is_one_one() {
        let [x, y] = animated_position(FRAC_PI_2, 0);
        assert!((x - 1.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn static_positions_ignore_time() {
        let cfg = PipelineConfig::STATIC;
        for i in 0..VERTEX_COUNT {
            assert_eq!(vertex_position(&cfg, 0.0, i), vertex_position(&cfg, 123.0, i));
            assert_eq!(vertex_position(&cfg, 7.0, i), Some(STATIC_POSITIONS[i as usize]));
        }
        assert_eq!(vertex_position(&cfg, 0.0, 3), None);
    }

    #[test]
    fn animated_configs_use_formula() {
        for cfg in [PipelineConfig::ANIMATED, PipelineConfig::INDEXED] {
            assert_eq!(vertex_position(&cfg, 1.5, 2), Some(animated_position(1.5, 2)));
        }
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn direct_colors_are_red_green_blue() {
        assert_eq!(vertex_color(ColorIndexing::Direct, 0), Some([1.0, 0.0, 0.0]));
        assert_eq!(vertex_color(ColorIndexing::Direct, 1), Some([0.0, 1.0, 0.0]));
        assert_eq!(vertex_color(ColorIndexing::Direct, 2), Some([0.0, 0.0, 1.0]));
        assert_eq!(vertex_color(ColorIndexing::Direct, 3), None);
    }

    #[test]
    fn modulo_colors_wrap() {
        for i in 0..12 {
            assert_eq!(
                vertex_color(ColorIndexing::Modulo3, i),
                Some(VERTEX_COLORS[(i % 3) as usize])
            );
        }
    }

    #[test]
    fn colors_form_a_permutation_of_rgb() {
        let mut seen: Vec<[f32; 3]> = (0..VERTEX_COUNT)
            .filter_map(|i| vertex_color(ColorIndexing::Direct, i))
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut expected = VERTEX_COLORS.to_vec();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        assert_eq!(seen, expected);
    }
}
