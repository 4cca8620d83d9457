use csv::Writer;
use itertools::izip;
use nalgebra::DVector;
use std::fs::File;
use std::io::{self, Write};

/// saving generated point sequences for external plotting tools

pub fn save_points_to_file(
    x_values: &DVector<f64>,
    y_values: &DVector<f64>,
    filename: &str,
    arg: &str,
    value: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    // Write headers
    writeln!(file, "{}\t{}", arg, value)?;
    for (x, y) in izip!(x_values.iter(), y_values.iter()) {
        writeln!(file, "{}\t{}", x, y)?;
    }

    Ok(())
}

pub fn save_points_to_csv(
    x_values: &DVector<f64>,
    y_values: &DVector<f64>,
    filename: &str,
    arg: &str,
    value: &str,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    // Prepare and write headers
    writer.write_record([arg, value])?;

    // Write data rows
    for (x, y) in izip!(x_values.iter(), y_values.iter()) {
        writer.write_record([x.to_string(), y.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
