//! Plain-text rendering of a prescription for terminal output.

use std::fmt;

use crate::engine::Prescription;

impl fmt::Display for Prescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = &self.location;
        writeln!(f, "--- Solar Prescription ---")?;
        writeln!(
            f,
            "Location:              {} ({:.4}, {:.4})",
            loc.name, loc.latitude, loc.longitude
        )?;
        writeln!(f, "Kit size:              {}W", self.kit_watts)?;
        if let Some(info) = &self.product_info {
            writeln!(
                f,
                "Product:               {} {} ({}), battery {}",
                info.brand, info.model, info.kind, info.battery
            )?;
        }
        writeln!(f, "Coverage target:       {}", self.coverage.title)?;

        writeln!(f, "\nDaily energy need:     {:.0} Wh", self.energy_need.daily_wh)?;
        for line in &self.energy_need.appliances {
            writeln!(
                f,
                "  - {} x{}: {:.0} Wh",
                line.label, line.quantity, line.daily_wh
            )?;
        }

        let p = &self.production;
        writeln!(f, "\nUsable production:     {:.0} Wh/day", p.daily_avg_wh)?;
        writeln!(f, "Theoretical average:   {:.0} Wh/day", p.theoretical_avg_wh)?;
        writeln!(f, "Best month:            {:.0} Wh/day", p.best_month_wh)?;
        writeln!(f, "Worst month:           {:.0} Wh/day", p.worst_month_wh)?;
        writeln!(f, "Annual:                {:.0} kWh", p.annual_kwh)?;
        if p.using_tested_value {
            writeln!(f, "                       (tested value applied)")?;
        }

        let v = &self.verdict;
        writeln!(f, "\nVerdict:               {}", v.verdict.as_str().to_uppercase())?;
        writeln!(f, "Average coverage:      {:.1}%", v.avg_coverage_pct)?;
        writeln!(f, "Worst month coverage:  {:.1}%", v.worst_coverage_pct)?;

        let r = &self.recommendation;
        writeln!(f, "\n{}", r.title)?;
        writeln!(f, "{}", r.message)?;
        for w in &r.warnings {
            writeln!(f, "  ! {w}")?;
        }
        if let Some(s) = &r.suggestion {
            writeln!(f, "Suggestion: {s}")?;
        }
        if self.outside_certified_range {
            writeln!(
                f,
                "Note: a {}W kit is outside the certified product range.",
                self.browse_kit_watts
            )?;
        }

        for w in &self.irradiance_warnings {
            writeln!(f, "[{:?}] {}", w.level, w.message)?;
        }
        write!(f, "Generated at {}", self.generated_at.to_rfc3339())
    }
}
