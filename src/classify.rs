//! Header-row classification of worksheet columns.

/// Header texts that mark the SSN column, compared case-insensitively after trimming.
pub const SSN_HEADERS: [&str; 2] = ["SSN", "SOCIAL SECURITY NUMBER"];

/// Columns of one worksheet that get reformatted, as 1-based column numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub date_columns: Vec<u32>,
    pub ssn_column: Option<u32>,
}

impl ColumnRoles {
    /// Classifies `(column, header text)` pairs from row 1, in column order.
    pub fn classify<'a>(headers: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        let mut roles = Self::default();
        for (col, text) in headers {
            if is_date_header(text) {
                roles.date_columns.push(col);
            }
            if roles.ssn_column.is_none() && is_ssn_header(text) {
                roles.ssn_column = Some(col);
            }
        }
        roles
    }

    pub fn is_empty(&self) -> bool {
        self.date_columns.is_empty() && self.ssn_column.is_none()
    }
}

pub fn is_date_header(text: &str) -> bool {
    text.to_lowercase().contains("date")
}

pub fn is_ssn_header(text: &str) -> bool {
    let text = text.trim();
    SSN_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(text))
}
