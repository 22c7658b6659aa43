use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        blender::{MonthlyPercentages, SolarScales},
        calendar::{DayCounts, DayType, month_name},
    },
    pipeline::Report,
    prelude::*,
    quantity::{
        energy::{GigawattHours, MegawattHours},
        power::Megawatts,
        time::Hours,
    },
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Charge types as rows and months as columns.
pub fn build_percentages_table(percentages: &MonthlyPercentages) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Charge type")];
    header.extend(percentages.iter().map(|(month, _)| Cell::new(&month_name(month)[..3])));
    table.set_header(header);

    let Some((_, first)) = percentages.iter().next() else {
        return table;
    };
    for (charge_type, _) in first.iter() {
        let mut row = vec![Cell::new(charge_type)];
        row.extend(percentages.iter().map(|(_, month)| {
            Cell::new(format!("{:.2}%", month.get(charge_type).unwrap_or_default() * 100.0))
                .set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    let mut total = vec![Cell::new("Total").add_attribute(Attribute::Dim)];
    total.extend(percentages.iter().map(|(_, month)| {
        Cell::new(format!("{:.2}%", month.total() * 100.0))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim)
    }));
    table.add_row(total);
    table
}

pub fn build_day_counts_table(year: i32, day_counts: DayCounts) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Year", "Day type", "Days", "Ratio"]);
    for day_type in [DayType::Weekday, DayType::Weekend] {
        table.add_row(vec![
            Cell::new(year).add_attribute(Attribute::Dim),
            Cell::new(day_type),
            Cell::new(day_counts.count(day_type)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", day_counts.ratio(day_type)))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_solar_scales_table(solar_scales: &SolarScales) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Scale"]);
    for (month, scale) in (1..).zip(solar_scales.0) {
        table.add_row(vec![
            Cell::new(month_name(month)),
            Cell::new(format!("{scale:.4}"))
                .set_alignment(CellAlignment::Right)
                .fg(if scale >= 1.0 { Color::DarkYellow } else { Color::Blue }),
        ]);
    }
    table.add_row(vec![
        Cell::new("Sum").add_attribute(Attribute::Dim),
        Cell::new(format!("{:.4}", solar_scales.sum()))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim),
    ]);
    table
}

/// Monthly energy and peaks of the synthesized and the total load.
pub fn build_report_table(report: &Report) -> Result<Table> {
    let ev_peak = report.ev.peak().unwrap_or(Megawatts::ZERO);
    let mut table = new_table();
    table.set_header(vec!["Month", "EV energy", "EV peak", "Total energy", "Total peak"]);
    let months = report.ev.months(report.year)?.zip(report.total.months(report.year)?);
    for ((month, ev), (_, total)) in months {
        let ev_month_peak = ev.iter().copied().max().unwrap_or(Megawatts::ZERO);
        table.add_row(vec![
            Cell::new(month_name(month)),
            Cell::new(energy_of(&ev)).set_alignment(CellAlignment::Right),
            Cell::new(ev_month_peak)
                .set_alignment(CellAlignment::Right)
                .fg(if ev_month_peak >= ev_peak { Color::Red } else { Color::Reset }),
            Cell::new(energy_of(&total)).set_alignment(CellAlignment::Right),
            Cell::new(total.iter().copied().max().unwrap_or(Megawatts::ZERO))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new(GigawattHours::from(report.ev.total_energy()))
            .set_alignment(CellAlignment::Right),
        Cell::new(ev_peak).set_alignment(CellAlignment::Right),
        Cell::new(GigawattHours::from(report.total.total_energy()))
            .set_alignment(CellAlignment::Right),
        Cell::new(report.total.peak().unwrap_or(Megawatts::ZERO))
            .set_alignment(CellAlignment::Right),
    ]);
    Ok(table)
}

fn energy_of(hourly: &[Megawatts]) -> GigawattHours {
    hourly.iter().map(|power| *power * Hours::ONE).sum::<MegawattHours>().into()
}
