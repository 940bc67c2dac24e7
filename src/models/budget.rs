use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    /// Matched exactly (case-sensitive) against transaction categories.
    pub category: String,
    /// Format: "YYYY-MM"
    pub month: String,
    pub limit: Decimal,
    pub created_at: String,
}

impl Budget {
    pub fn new(category: String, month: String, limit: Decimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            month,
            limit,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
