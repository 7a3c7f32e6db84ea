use loam_geom::Vec3;
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

// Components bounded away from both overflow and underflow so squared
// terms stay representable.
fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| {
        v.is_finite() && {
            let a = v.abs();
            (1e-3..=1e3).contains(&a)
        }
    })
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_nonzero_f32(), bounded_nonzero_f32(), bounded_nonzero_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    // Subtraction undoes addition.
    #[test]
    fn vec3_sub_add_roundtrip(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox((a - b) + b, a, 1e-2));
    }

    // Cross product is orthogonal to both inputs.
    #[test]
    fn vec3_cross_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = (a.length() * c.length()).max(1.0);
        prop_assert!(a.dot(c).abs() <= 1e-3 * scale);
        let scale = (b.length() * c.length()).max(1.0);
        prop_assert!(b.dot(c).abs() <= 1e-3 * scale);
    }

    // Cross anti-commutativity: a x b + b x a is zero.
    #[test]
    fn vec3_cross_anticommutative(a in arb_vec3(), b in arb_vec3()) {
        let sum = a.cross(b) + b.cross(a);
        prop_assert!(vapprox(sum, Vec3::ZERO, 1e-3));
    }

    // Scaling scales length by |k|.
    #[test]
    fn vec3_scaling_scales_length(a in arb_vec3(), k in bounded_nonzero_f32()) {
        let scaled = (a * k).length();
        let expect = a.length() * k.abs();
        prop_assert!(approx(scaled, expect, 1e-3 * expect.max(1.0)));
    }

    // Triangle inequality.
    #[test]
    fn vec3_triangle_inequality(a in arb_vec3(), b in arb_vec3()) {
        let lhs = (a + b).length();
        let rhs = a.length() + b.length();
        prop_assert!(lhs <= rhs + 1e-6 + 1e-5 * rhs.max(1.0));
    }
}
