use std::f64::consts::PI;

use kinema::prelude::*;
use proptest::prelude::*;

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance * (1.0 + expected.abs())
}

fn nonzero_acceleration() -> impl Strategy<Value = f64> {
    prop_oneof![-5.0f64..-0.1, 0.1f64..5.0]
}

proptest! {
    /// Uniform motion is an affine function of time, in the past as well.
    #[test]
    fn prop_uniform_position_is_linear(
        x0 in -1.0e3f64..1.0e3,
        v in -1.0e2f64..1.0e2,
        t in -1.0e2f64..1.0e2,
    ) {
        let motion = UniformRectilinear::new(x0, v).unwrap();
        let x = motion.position(t).unwrap().si_value();
        prop_assert!(close(x, x0 + v * t, 1.0e-12), "x = {x}");
        prop_assert_eq!(motion.velocity(t).unwrap().si_value(), v);
        prop_assert_eq!(motion.acceleration(t).unwrap().si_value(), 0.0);
    }

    /// Velocity changes by `a Δt` between any two non-negative times.
    #[test]
    fn prop_accelerated_velocity_difference(
        x0 in -1.0e3f64..1.0e3,
        v0 in -50.0f64..50.0,
        a in -10.0f64..10.0,
        t1 in 0.0f64..100.0,
        t2 in 0.0f64..100.0,
    ) {
        let motion = AcceleratedRectilinear::new(x0, v0, a).unwrap();
        let dv = motion.velocity(t2).unwrap().si_value() - motion.velocity(t1).unwrap().si_value();
        prop_assert!((dv - a * (t2 - t1)).abs() <= 1.0e-9 * (1.0 + v0.abs() + a.abs() * 100.0));
    }

    /// Circular positions stay on the circle.
    #[test]
    fn prop_circular_position_on_circle(
        radius in 0.01f64..100.0,
        theta0 in -PI..PI,
        omega in -10.0f64..10.0,
        alpha in -5.0f64..5.0,
        t in 0.0f64..10.0,
    ) {
        let uniform = UniformCircular::new(radius, theta0, omega).unwrap();
        let accelerated = AcceleratedCircular::new(radius, theta0, omega, alpha).unwrap();
        let r_uniform = uniform.position(t).unwrap().si_values().norm();
        let r_accelerated = accelerated.position(t).unwrap().si_values().norm();
        prop_assert!(close(r_uniform, radius, 1.0e-12));
        prop_assert!(close(r_accelerated, radius, 1.0e-12));
    }

    /// Uniform circular velocity is tangent to the circle.
    #[test]
    fn prop_uniform_circular_velocity_perpendicular(
        radius in 0.01f64..100.0,
        theta0 in -PI..PI,
        omega in -10.0f64..10.0,
        t in 0.0f64..10.0,
    ) {
        let motion = UniformCircular::new(radius, theta0, omega).unwrap();
        let r = motion.position(t).unwrap().si_values();
        let v = motion.velocity(t).unwrap().si_values();
        prop_assert!(r.dot(&v).abs() <= 1.0e-12 * (1.0 + r.norm() * v.norm()));
    }

    /// Every time returned by the solver reproduces the target position.
    #[test]
    fn prop_time_for_position_round_trip(
        x0 in -100.0f64..100.0,
        v0 in -20.0f64..20.0,
        a in nonzero_acceleration(),
        t_star in 0.0f64..20.0,
    ) {
        let motion = AcceleratedRectilinear::new(x0, v0, a).unwrap();
        let target = motion.position(t_star).unwrap().si_value();
        let solutions = motion.time_for_position_with_tolerance(target, 1.0e-9).unwrap();
        prop_assert!(!solutions.is_empty() && solutions.len() <= 2);
        let times = solutions.seconds();
        prop_assert!(times.windows(2).all(|w| w[0] < w[1]));
        for t in times {
            prop_assert!(t >= 0.0);
            let x = motion.position(t).unwrap().si_value();
            prop_assert!(close(x, target, 1.0e-6), "t = {t}, x = {x}, target = {target}");
        }
    }

    /// The turning point is found as a single root at any launch speed.
    #[test]
    fn prop_turning_point_is_a_single_root(
        v0 in 1.0f64..2.0e3,
        a in 0.1f64..50.0,
    ) {
        let motion = AcceleratedRectilinear::new(0.0, v0, -a).unwrap();
        let t_turn = v0 / a;
        let apex = motion.position(t_turn).unwrap();
        let solutions = motion.time_for_position(apex).unwrap();
        prop_assert_eq!(solutions.len(), 1);
        prop_assert!(close(solutions.first().si_value(), t_turn, 1.0e-6));
    }

    /// Times returned for a target velocity reproduce that velocity.
    #[test]
    fn prop_time_for_velocity_round_trip(
        v0 in -20.0f64..20.0,
        a in nonzero_acceleration(),
        t_star in 0.0f64..20.0,
    ) {
        let motion = AcceleratedRectilinear::new(0.0, v0, a).unwrap();
        let target = motion.velocity(t_star).unwrap().si_value();
        let t = motion.time_for_velocity(target).unwrap().si_value();
        prop_assert!(close(t, t_star, 1.0e-9));
        let dx = motion.displacement_without_time(target).unwrap().si_value();
        let x = motion.position(t_star).unwrap().si_value();
        prop_assert!(close(dx, x, 1.0e-9), "dx = {dx}, x = {x}");
    }

    /// Every time returned for a target angle reproduces that angle.
    #[test]
    fn prop_time_for_angular_position_round_trip(
        theta0 in -PI..PI,
        omega0 in -5.0f64..5.0,
        alpha in nonzero_acceleration(),
        t_star in 0.0f64..10.0,
    ) {
        let motion = AcceleratedCircular::new(1.0, theta0, omega0, alpha).unwrap();
        let target = motion.angular_position(t_star).unwrap().si_value();
        let solutions = InverseSolver::new(1.0e-9).time_for_angular_position(&motion, target).unwrap();
        for t in solutions.seconds() {
            prop_assert!(t >= 0.0);
            let theta = motion.angular_position(t).unwrap().si_value();
            prop_assert!(close(theta, target, 1.0e-6), "t = {t}, theta = {theta}");
        }
        let omega = motion.angular_velocity_without_time(target).unwrap().si_value().abs();
        let expected = motion.angular_velocity(t_star).unwrap().si_value().abs();
        prop_assert!((omega - expected).abs() <= 1.0e-4 * (1.0 + expected), "{omega} vs {expected}");
    }

    /// Each axis of a spatial motion evolves on its own.
    #[test]
    fn prop_spatial_axes_are_independent(
        r0 in prop::array::uniform3(-100.0f64..100.0),
        v0 in prop::array::uniform3(-20.0f64..20.0),
        a in prop::array::uniform3(-10.0f64..10.0),
        axis in 0usize..3,
        t in 0.0f64..10.0,
    ) {
        let full = SpatialMotion::new(r0, v0, a).unwrap();
        let isolate = |values: [f64; 3]| {
            let mut only = [0.0; 3];
            only[axis] = values[axis];
            only
        };
        let single = SpatialMotion::new(isolate(r0), isolate(v0), isolate(a)).unwrap();
        prop_assert_eq!(
            full.position(t).unwrap().si_values()[axis],
            single.position(t).unwrap().si_values()[axis]
        );
        prop_assert_eq!(
            full.velocity(t).unwrap().si_values()[axis],
            single.velocity(t).unwrap().si_values()[axis]
        );
    }

    /// Lengths and times never add.
    #[test]
    fn prop_mismatched_dimensions_never_add(l in -1.0e6f64..1.0e6, s in -1.0e6f64..1.0e6) {
        let err = Quantity::meters(l).try_add(&Quantity::seconds(s)).unwrap_err();
        let is_mismatch = matches!(err, UnitError::DimensionMismatch { .. });
        prop_assert!(is_mismatch);
    }

    /// Converting to another unit and back preserves the SI value.
    #[test]
    fn prop_unit_conversion_round_trip(meters in -1.0e6f64..1.0e6) {
        let km: Unit = "km".parse().unwrap();
        let q = Quantity::meters(meters);
        let back = q.to(&km).unwrap().to(&Unit::meter()).unwrap();
        prop_assert!(close(back.magnitude(), meters, 1.0e-12));
    }
}
