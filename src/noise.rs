use crate::rng::hash3;

#[inline]
fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`. Not clamped.
#[inline]
pub fn linear_remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// 3D gradient noise (Perlin-style), roughly in [-1, 1] and zero on the
/// integer lattice.
#[inline]
pub fn gradient_noise3(x: f64, y: f64, z: f64) -> f64 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let iz = z.floor() as i32;
    let fx = x - ix as f64;
    let fy = y - iy as f64;
    let fz = z - iz as f64;
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);
    let sz = smootherstep(fz);

    #[inline]
    fn grad(hash: u32, dx: f64, dy: f64, dz: f64) -> f64 {
        // 12 cube-edge gradients; 12..15 repeat four of them.
        match hash & 15 {
            0 | 12 => dx + dy,
            1 | 13 => -dx + dy,
            2 => dx - dy,
            3 => -dx - dy,
            4 => dx + dz,
            5 => -dx + dz,
            6 => dx - dz,
            7 => -dx - dz,
            8 => dy + dz,
            9 | 14 => -dy + dz,
            10 => dy - dz,
            _ => -dy - dz,
        }
    }

    let corner = |ox: i32, oy: i32, oz: i32| {
        grad(
            hash3(ix + ox, iy + oy, iz + oz),
            fx - ox as f64,
            fy - oy as f64,
            fz - oz as f64,
        )
    };

    let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), sx);
    let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), sx);
    let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), sx);
    let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), sx);
    let y0 = lerp(x00, x10, sy);
    let y1 = lerp(x01, x11, sy);
    lerp(y0, y1, sz).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_endpoints() {
        assert_eq!(linear_remap(-1.0, -1.0, 1.0, 0.0, 1.0), 0.0);
        assert_eq!(linear_remap(1.0, -1.0, 1.0, 0.0, 1.0), 1.0);
        assert_eq!(linear_remap(0.0, -1.0, 1.0, 0.0, 1.0), 0.5);
        assert_eq!(linear_remap(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    }

    #[test]
    fn zero_on_lattice() {
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (3.0, -2.0, 7.0), (-5.0, 11.0, 1.0)] {
            assert_eq!(gradient_noise3(x, y, z), 0.0);
        }
    }

    #[test]
    fn bounded_and_deterministic() {
        let mut seen_nonzero = false;
        for i in 0..2000 {
            let x = i as f64 * 0.137 - 50.0;
            let y = i as f64 * 0.071 + 3.3;
            let z = (i % 17) as f64 * 0.5;
            let n = gradient_noise3(x, y, z);
            assert!((-1.0..=1.0).contains(&n));
            assert_eq!(n, gradient_noise3(x, y, z));
            seen_nonzero |= n.abs() > 1e-3;
        }
        assert!(seen_nonzero);
    }

    #[test]
    fn continuous() {
        let a = gradient_noise3(1.25, 2.5, 0.0);
        let b = gradient_noise3(1.25 + 1e-6, 2.5, 0.0);
        assert!((a - b).abs() < 1e-4);
    }
}
