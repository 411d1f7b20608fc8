use crate::compare::{Comparison, StatRow};
use crate::error::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write a comparison to an Excel file with "Players" and "Stats" sheets
pub fn write_comparison_to_xlsx(comparison: &Comparison, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let players = workbook.add_worksheet();
    write_players_sheet(players, comparison)?;

    let stats = workbook.add_worksheet();
    write_stats_sheet(stats, &comparison.stats)?;

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// Wide table: one row per player, numeric cells written as numbers
fn write_players_sheet(sheet: &mut Worksheet, comparison: &Comparison) -> Result<()> {
    let header_format = header_format();
    let center_format = Format::new().set_align(FormatAlign::Center);

    sheet.set_column_width(0, 24)?; // Name
    for (col, header) in comparison.columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, row) in comparison.rows.iter().enumerate() {
        let xl_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell.parse::<f64>() {
                Ok(n) if col > 0 && n.is_finite() => {
                    sheet.write_number_with_format(xl_row, col as u16, n, &center_format)?;
                }
                _ => {
                    sheet.write_string(xl_row, col as u16, cell)?;
                }
            }
        }
    }

    sheet.set_freeze_panes(1, 1)?;
    sheet.set_name("Players")?;
    Ok(())
}

/// Long table: Name, Traits, Stats
fn write_stats_sheet(sheet: &mut Worksheet, stats: &[StatRow]) -> Result<()> {
    let header_format = header_format();
    let center_format = Format::new().set_align(FormatAlign::Center);

    sheet.set_column_width(0, 24)?; // Name
    sheet.set_column_width(1, 18)?; // Traits
    sheet.set_column_width(2, 8)?; // Stats

    for (col, header) in ["Name", "Traits", "Stats"].iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, stat) in stats.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &stat.name)?;
        sheet.write_string(row, 1, &stat.trait_name)?;
        if let Some(value) = stat.stat {
            sheet.write_number_with_format(row, 2, value, &center_format)?;
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.set_name("Stats")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::dataset::Dataset;
    use crate::model::{Player, TraitCategoryMap};

    #[test]
    fn test_write_comparison() {
        let ds = Dataset::from_players(vec![
            Player::new(1, "Messi")
                .with_overall(94)
                .with_attribute("Finishing", "95"),
            Player::new(2, "Ronaldo")
                .with_overall(94)
                .with_attribute("Finishing", ""),
        ]);
        let traits = TraitCategoryMap::new().with_category("Attacking", ["Finishing"]);
        let comparison = compare(&ds, &traits, &["Messi", "Ronaldo"], &["Attacking"]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.xlsx");
        write_comparison_to_xlsx(&comparison, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_empty_comparison() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_comparison_to_xlsx(&Comparison::default(), &path).unwrap();
        assert!(path.exists());
    }
}
