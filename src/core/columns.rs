/// Header names every input CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["realName", "home-number", "mobile-number"];

/// Result of comparing a CSV header row against the required columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCheck {
    pub missing: Vec<String>,
}

impl ColumnCheck {
    pub fn success(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Set difference `required - headers`.
///
/// Never fails; treating a non-empty `missing` list as fatal is up to the
/// caller. Missing names are reported once each, in `required` order.
/// Header matching is exact and case-sensitive.
pub fn check_columns<'a, H>(headers: H, required: &[&str]) -> ColumnCheck
where
    H: IntoIterator<Item = &'a str>,
{
    let present: std::collections::HashSet<&str> = headers.into_iter().collect();

    let mut missing: Vec<String> = Vec::new();
    for name in required {
        if !present.contains(name) && !missing.iter().any(|m| m == name) {
            missing.push((*name).to_string());
        }
    }

    ColumnCheck { missing }
}
