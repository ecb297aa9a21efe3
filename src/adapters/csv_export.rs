//! CSV export of chart series.

use std::io::Write;

use crate::domain::chart::Chart;
use crate::domain::error::AcademyError;

/// Writes `x,price` rows, x starting at 1. Reference levels and markers are
/// not part of the series.
pub fn write_chart_csv<W: Write>(chart: &Chart, out: W) -> Result<(), AcademyError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["x", "price"])?;
    for (x, value) in chart.points() {
        writer.write_record([x.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
