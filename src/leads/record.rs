/// Placeholder for a missing phone number or address
pub const NOT_AVAILABLE: &str = "N/A";

/// A candidate business contact recovered from one listing fragment
///
/// A record only exists if its name passed validation: at least three
/// characters and not purely numeric. Phone and address fall back to
/// [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRecord {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub niche: String,
}

impl LeadRecord {
    /// Creates a record, or `None` if `name` is not a usable business name
    ///
    /// Internal whitespace in the name is collapsed before validation.
    pub fn new(
        name: &str,
        phone: Option<String>,
        address: Option<String>,
        niche: &str,
    ) -> Option<Self> {
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.chars().count() < 3 || is_numeric(&name) {
            return None;
        }

        Some(Self {
            name,
            phone: phone.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            address: address.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            category: niche.to_string(),
            niche: niche.to_string(),
        })
    }

    /// Field values in column order
    pub fn as_row(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
            self.category.as_str(),
            self.niche.as_str(),
        ]
    }

    pub fn has_phone(&self) -> bool {
        self.phone != NOT_AVAILABLE
    }

    pub fn has_address(&self) -> bool {
        self.address != NOT_AVAILABLE
    }
}

/// Returns true for a non-empty string made only of digits
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
