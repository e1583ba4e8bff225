use blockwork_geom::{Aabb, Rgba, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert_eq!(Vec3::ZERO, Vec3::splat(0.0));
    assert_eq!(Vec3::ONE, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(Vec3::UP, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn vec3_arith_and_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let mut c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    c -= a;
    assert!(vec3_approx_eq(c, b, 1e-6));
    assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    assert!(vec3_approx_eq((a * 2.0) / 4.0, Vec3::new(0.5, 1.0, 1.5), 1e-6));
}

#[test]
fn vec3_componentwise_helpers() {
    let a = Vec3::new(1.0, -2.0, 3.0);
    let b = Vec3::new(0.5, 4.0, -1.0);
    assert_eq!(a.scale(b), Vec3::new(0.5, -8.0, -3.0));
    assert_eq!(a.min(b), Vec3::new(0.5, -2.0, -1.0));
    assert_eq!(a.max(b), Vec3::new(1.0, 4.0, 3.0));
    assert_eq!(a.to_array(), [1.0, -2.0, 3.0]);
}

#[test]
fn vec3_normalized_zero_is_noop() {
    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));
    assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
}

#[test]
fn aabb_center_extent_volume() {
    let b = Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 2.0, 3.0));
    assert_eq!(b.extent(), Vec3::new(4.0, 2.0, 1.0));
    assert_eq!(b.center(), Vec3::new(1.0, 1.0, 2.5));
    assert_eq!(b.half_extents(), Vec3::new(2.0, 1.0, 0.5));
    assert!(approx_eq(b.volume(), 8.0, 1e-6));
}

#[test]
fn aabb_contains_is_half_open() {
    let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
    assert!(b.contains(Vec3::ZERO));
    assert!(b.contains(Vec3::splat(0.999)));
    assert!(!b.contains(Vec3::ONE));
    assert!(!b.contains(Vec3::new(0.5, -0.01, 0.5)));
}

#[test]
fn rgba_constructors() {
    assert_eq!(Rgba::rgb(0.1, 0.2, 0.3).a, 1.0);
    assert_eq!(Rgba::NONE.to_array(), [0.0; 4]);
    assert!(Rgba::WHITE.is_opaque());
    assert!(!Rgba::new(0.0, 0.0, 0.0, -0.0).bits_eq(Rgba::NONE));
}
