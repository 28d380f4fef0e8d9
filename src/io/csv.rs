use std::io::{self, Write};

use crate::sim::vessel::SimSample;

/// Write a simulated landing trajectory as CSV.
///
/// Columns: time, altitude, vertical_speed, horizontal_speed, throttle,
///          pitch_deg, mass, gear, target_distance
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[SimSample]) -> io::Result<()> {
    writeln!(
        writer,
        "time,altitude,vertical_speed,horizontal_speed,throttle,pitch_deg,mass,gear,target_distance"
    )?;

    for s in trajectory {
        let distance = s.target_distance.map(|d| format!("{d:.2}")).unwrap_or_default();
        writeln!(
            writer,
            "{:.3},{:.3},{:.3},{:.3},{:.4},{:.2},{:.2},{},{}",
            s.time,
            s.altitude,
            s.vertical_speed,
            s.horizontal_speed,
            s.throttle,
            s.pitch,
            s.mass,
            u8::from(s.gear),
            distance,
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[SimSample]) -> io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
