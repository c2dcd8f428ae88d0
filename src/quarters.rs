use crate::error::DashboardError;

/// Chronological sort key for fiscal quarter labels like `"2023-Q4"`.
///
/// Parsing extracts the digit runs from the label and expects exactly two:
/// the year and the quarter number. Anything else is rejected rather than
/// silently misordered, since the label is the chronological axis of every
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuarterKey {
    pub year: u32,
    pub number: u32,
}

impl QuarterKey {
    pub fn parse(label: &str) -> Result<QuarterKey, DashboardError> {
        let mut runs: Vec<u32> = Vec::with_capacity(2);
        let mut current: Option<u32> = None;

        for ch in label.chars() {
            match ch.to_digit(10) {
                Some(d) => {
                    let value = current.unwrap_or(0);
                    current = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(d))
                        .or(Some(u32::MAX));
                }
                None => {
                    if let Some(value) = current.take() {
                        runs.push(value);
                    }
                }
            }
        }
        if let Some(value) = current {
            runs.push(value);
        }

        match runs.as_slice() {
            [year, number] => Ok(QuarterKey {
                year: *year,
                number: *number,
            }),
            _ => Err(DashboardError::MalformedQuarter(label.to_string())),
        }
    }
}
