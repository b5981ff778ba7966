use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::cells::{cell_text, is_populated};
use crate::classify::ColumnRoles;
use crate::error::{FormatError, Result};

/// What the rewrite phase has to touch in one worksheet. Rows and columns are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetPlan {
    pub name: String,
    pub roles: ColumnRoles,
    pub used_rows: usize,
    /// Used rows after the first one, in order.
    pub data_rows: Vec<u32>,
}

impl SheetPlan {
    pub fn is_used(&self) -> bool {
        self.used_rows > 0
    }
}

/// Reads every worksheet's values and builds one plan per sheet, in workbook order.
pub fn scan_workbook(path: &Path) -> Result<Vec<SheetPlan>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| FormatError::unreadable(path, e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut plans = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| FormatError::unreadable(path, format!("worksheet {name}: {e}")))?;
        let plan = plan_sheet(&name, &range);
        debug!(
            sheet = %plan.name,
            used_rows = plan.used_rows,
            date_columns = ?plan.roles.date_columns,
            ssn_column = ?plan.roles.ssn_column,
            "scanned worksheet"
        );
        plans.push(plan);
    }
    Ok(plans)
}

pub fn plan_sheet(name: &str, range: &Range<Data>) -> SheetPlan {
    let mut plan = SheetPlan {
        name: name.to_string(),
        ..SheetPlan::default()
    };
    // calamine ranges start at the first used cell, not at A1
    let Some((first_row, first_col)) = range.start() else {
        return plan;
    };

    let mut headers: Vec<(u32, String)> = Vec::new();
    let mut used_rows: Vec<u32> = Vec::new();
    for (offset, cells) in range.rows().enumerate() {
        let row = first_row + offset as u32 + 1;
        let mut used = false;
        for (col_offset, cell) in cells.iter().enumerate() {
            if !is_populated(cell) {
                continue;
            }
            used = true;
            if row == 1 {
                headers.push((first_col + col_offset as u32 + 1, cell_text(cell).into_owned()));
            }
        }
        if used {
            used_rows.push(row);
        }
    }

    plan.roles = ColumnRoles::classify(headers.iter().map(|(col, text)| (*col, text.as_str())));
    plan.used_rows = used_rows.len();
    plan.data_rows = used_rows.into_iter().skip(1).collect();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn header_and_used_rows() {
        let mut range = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), text("Name"));
        range.set_value((0, 1), text("Hire Date"));
        range.set_value((0, 2), text("SSN"));
        range.set_value((1, 0), text("Jane"));
        // row 3 left blank
        range.set_value((3, 2), Data::Float(123456789.0));

        let plan = plan_sheet("People", &range);
        assert_eq!(
            plan,
            SheetPlan {
                name: "People".into(),
                roles: ColumnRoles {
                    date_columns: vec![2],
                    ssn_column: Some(3),
                },
                used_rows: 3,
                data_rows: vec![2, 4],
            }
        );
    }

    #[test]
    fn range_not_anchored_at_a1() {
        // values only from C2 onwards: no header row, first used row is skipped
        let mut range = Range::new((1, 2), (2, 2));
        range.set_value((1, 2), text("Date"));
        range.set_value((2, 2), text("x"));

        let plan = plan_sheet("Offset", &range);
        assert!(plan.roles.is_empty());
        assert_eq!(plan.used_rows, 2);
        assert_eq!(plan.data_rows, vec![3]);
    }

    #[test]
    fn empty_sheet() {
        let range: Range<Data> = Range::empty();
        let plan = plan_sheet("Blank", &range);
        assert!(!plan.is_used());
        assert!(plan.data_rows.is_empty());
    }
}
