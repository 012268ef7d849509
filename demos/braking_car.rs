use kinema::prelude::*;

fn main() -> Result<()> {
    // KINEMA_TOLERANCE and friends tune the solver without recompiling.
    let settings = Settings::from_env()?;
    let _log = LogHandle::new(&settings)?;
    let solver = InverseSolver::from_settings(&settings.numerics);

    // A car at 108 km/h brakes at 6 m/s² from the origin.
    let car = AcceleratedRectilinear::new(
        0.0,
        Quantity::of(108.0, "km/h")?,
        Quantity::meters_per_second_squared(-6.0),
    )?;

    println!("target(m), time(s), velocity(m/s)");
    for target in [25.0, 50.0, 75.0, 100.0] {
        match solver.time_for_position(&car, target) {
            Ok(solutions) => {
                let t = solutions.first();
                let v = car.velocity(t)?;
                println!("{target:.1}, {:.3}, {:.3}", t.si_value(), v.si_value());
            }
            Err(KinematicsError::NoRealSolution { .. }) => {
                println!("{target:.1}, unreachable, -");
            }
            Err(err) => return Err(err),
        }
    }

    // The car stops where its velocity vanishes: v0² / 2|a| = 75 m.
    let stop = solver.time_for_velocity(&car, 0.0)?;
    let distance = solver.displacement_without_time(&car, 0.0)?;
    println!("stops after {:.3} s and {:.1} m", stop.si_value(), distance.si_value());
    Ok(())
}
