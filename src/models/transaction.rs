use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub category: String,
    /// Non-negative; the kind carries the direction.
    pub amount: Decimal,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    pub description: String,
    pub created_at: String,
}

impl Transaction {
    pub fn new(kind: TransactionKind, category: String, amount: Decimal, date: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            category,
            amount,
            date,
            description: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The "YYYY-MM" prefix of the date, if the date is long enough to have one.
    pub fn month(&self) -> Option<&str> {
        self.date.get(..7)
    }
}
