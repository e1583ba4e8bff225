use blockwork_geom::{Aabb, Vec3};
use proptest::prelude::*;

fn small_f32() -> impl Strategy<Value = f32> {
    -1_000.0f32..1_000.0
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (small_f32(), small_f32(), small_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_aabb() -> impl Strategy<Value = Aabb> {
    (arb_vec3(), arb_vec3()).prop_map(|(a, b)| Aabb::new(a.min(b), a.max(b)))
}

proptest! {
    // Union contains both inputs' corners and is commutative
    #[test]
    fn union_covers_both(a in arb_aabb(), b in arb_aabb()) {
        let u = a.union(&b);
        prop_assert_eq!(u, b.union(&a));
        for bx in [a, b] {
            prop_assert!(u.min.x <= bx.min.x && u.min.y <= bx.min.y && u.min.z <= bx.min.z);
            prop_assert!(u.max.x >= bx.max.x && u.max.y >= bx.max.y && u.max.z >= bx.max.z);
        }
    }

    // Center is always inside a well-formed, non-degenerate box
    #[test]
    fn center_is_contained(a in arb_aabb()) {
        let e = a.extent();
        prop_assume!(e.x > 1e-2 && e.y > 1e-2 && e.z > 1e-2);
        prop_assert!(a.contains(a.center()));
    }

    // Half extents times two reproduce the extent
    #[test]
    fn half_extents_double(a in arb_aabb()) {
        let h = a.half_extents() * 2.0;
        let e = a.extent();
        prop_assert!((h.x - e.x).abs() <= 1e-3 && (h.y - e.y).abs() <= 1e-3 && (h.z - e.z).abs() <= 1e-3);
    }
}
