use std::fs::File;
use std::io::BufWriter;

use kinema::prelude::*;

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    let _log = LogHandle::new(&settings)?;

    let records: Vec<HarmonicRecord> = serde_yaml::from_str(
        "- { amplitude: 1.0, angular_frequency: 1.0, phase: 0.0 }\n\
         - { amplitude: 0.3, angular_frequency: 3.0, phase: 0.5 }\n\
         - { amplitude: 0.1, angular_frequency: 7.0, phase: 1.0 }\n",
    )
    .map_err(|err| KinematicsError::Config(err.into()))?;
    let wave = CompositeHarmonic::from_records(&records)?;
    tracing::info!(components = wave.components().len(), "built composite wave");

    let trajectory = sample(&wave, 4.0 * std::f64::consts::PI, 400)?;
    let path = std::env::temp_dir().join("composite_wave.csv");
    let file = File::create(&path).map_err(|err| KinematicsError::Config(err.into()))?;
    write_trajectory_csv(BufWriter::new(file), &trajectory)
        .map_err(|err| KinematicsError::Config(err.into()))?;
    tracing::info!(path = %path.display(), samples = trajectory.len(), "wrote trajectory");
    println!("{}", path.display());
    Ok(())
}
