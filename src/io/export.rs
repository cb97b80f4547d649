//! CSV export of a prescription's appliance and production breakdowns.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::Prescription;
use crate::engine::demand::AppliedApplianceLine;
use crate::error::{Error, Result};

/// Column header for the appliance breakdown.
const APPLIANCE_HEADER: &str = "appliance,quantity,watts,hours_per_day,daily_wh";

/// Column header for the monthly production breakdown.
const MONTHLY_HEADER: &str = "month,production_wh,daily_wh";

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Writes one row per recognized appliance, in selection order, followed
/// by a `total` row.
///
/// # Errors
///
/// Returns [`Error::Csv`] if writing fails.
pub fn write_appliances_csv(lines: &[AppliedApplianceLine], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(APPLIANCE_HEADER.split(','))?;

    let mut total = 0.0;
    for line in lines {
        total += line.daily_wh;
        wtr.write_record(&[
            line.label.clone(),
            line.quantity.to_string(),
            format!("{:.1}", line.watts),
            format!("{:.1}", line.hours),
            format!("{:.1}", line.daily_wh),
        ])?;
    }
    let total = format!("{total:.1}");
    wtr.write_record(["total", "", "", "", total.as_str()])?;

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes one row per month with the month total and its 30-day daily figure.
///
/// # Errors
///
/// Returns [`Error::Csv`] if writing fails.
pub fn write_monthly_csv(prescription: &Prescription, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(MONTHLY_HEADER.split(','))?;

    for (i, month_wh) in prescription.production.monthly_wh.iter().enumerate() {
        let name = MONTH_NAMES.get(i).copied().unwrap_or("?");
        wtr.write_record(&[
            name.to_string(),
            format!("{month_wh:.1}"),
            format!("{:.1}", month_wh / crate::engine::production::DAYS_PER_MONTH),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn create(path: &Path) -> Result<io::BufWriter<File>> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    Ok(io::BufWriter::new(file))
}

/// Exports the appliance breakdown to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created, or [`Error::Csv`].
pub fn export_appliances_csv(prescription: &Prescription, path: &Path) -> Result<()> {
    write_appliances_csv(&prescription.energy_need.appliances, create(path)?)
}

/// Exports the monthly production breakdown to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created, or [`Error::Csv`].
pub fn export_monthly_csv(prescription: &Prescription, path: &Path) -> Result<()> {
    write_monthly_csv(prescription, create(path)?)
}
