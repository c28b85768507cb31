use std::io::Write;
use std::path::Path;

use anyhow::Context;
use dronefleet_structs::{round2, FleetPlan, ModelParameters};

pub const HEADER: [&str; 3] = ["Hospital Name", "Drones_Assigned", "Deliveries/Hour"];

fn cycle_time_note(params: &ModelParameters) -> String {
    format!(
        "Drone cycle time = {} minutes per delivery",
        round2(params.cycle_time * 60.0)
    )
}

/// Writes one row per hospital, then the verdict message and a cycle time note,
/// each after an empty separator row.
pub fn write_report_to<W: Write>(
    writer: W,
    plan: &FleetPlan,
    params: &ModelParameters,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for r in plan.records.iter() {
        wtr.write_record([
            r.id.clone(),
            r.assigned_drones.to_string(),
            r.deliveries_per_hour.to_string(),
        ])?;
    }

    wtr.write_record(["", "", ""])?;
    wtr.write_record(["System Message:", plan.verdict.message.as_str(), ""])?;
    wtr.write_record(["", "", ""])?;
    wtr.write_record(["Note:", cycle_time_note(params).as_str(), ""])?;
    wtr.flush()?;
    Ok(())
}

pub fn write_report(path: &Path, plan: &FleetPlan, params: &ModelParameters) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating report {}", path.display()))?;
    write_report_to(file, plan, params).with_context(|| format!("writing report {}", path.display()))
}

/// Aligned console table of the assignment.
pub fn render_table(plan: &FleetPlan) -> anyhow::Result<String> {
    let mut tw = tabwriter::TabWriter::new(Vec::new()).padding(2);
    writeln!(&mut tw, "{}", HEADER.join("\t"))?;
    for r in plan.records.iter() {
        writeln!(
            &mut tw,
            "{}\t{}\t{:.2}",
            r.id, r.assigned_drones, r.deliveries_per_hour
        )?;
    }
    writeln!(&mut tw, "total\t{}\t", plan.verdict.total_assigned)?;
    tw.flush()?;
    let table = tw
        .into_inner()
        .map_err(|_| anyhow::anyhow!("could not finish console table"))?;
    Ok(String::from_utf8(table)?)
}
