//! Cosmetic indicators derived client-side from record data
//!
//! None of these reflect backend state. Apart from customer feedback they are
//! pure: the same input always yields the same category.

use rand::Rng;

/// 32-bit string hash over UTF-16 code units: `h = (h << 5) - h + c`
pub fn string_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |acc, unit| {
        (acc << 5).wrapping_sub(acc).wrapping_add(i32::from(unit))
    })
}

/// `|hash(input)| % modulus`, without overflow on `i32::MIN`
fn bucket(input: &str, modulus: u32) -> u32 {
    (i64::from(string_hash(input)).unsigned_abs() % u64::from(modulus)) as u32
}

/// Stock level category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    OutOfStock,
    Low,
    InStock,
}

impl StockLevel {
    pub fn from_stock(stock: u32) -> Self {
        if stock < 10 {
            Self::OutOfStock
        } else if stock < 50 {
            Self::Low
        } else {
            Self::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::Low => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

/// Delivery progress stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStage {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl DeliveryStage {
    const ALL: [DeliveryStage; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    pub fn for_id(id: &str) -> Self {
        Self::ALL[bucket(id, Self::ALL.len() as u32) as usize]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

/// Satisfaction score tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatisfactionTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Satisfaction score in percent (60..=99) derived from a record id
pub fn satisfaction_score(id: &str) -> u8 {
    (bucket(id, 40) + 60) as u8
}

impl SatisfactionTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Customer feedback mood, picked at random on every render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Satisfied,
    Neutral,
    Unsatisfied,
}

impl Feedback {
    pub fn random() -> Self {
        match rand::thread_rng().gen_range(0..3) {
            0 => Self::Satisfied,
            1 => Self::Neutral,
            _ => Self::Unsatisfied,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Satisfied => ":)",
            Self::Neutral => ":|",
            Self::Unsatisfied => ":(",
        }
    }
}
