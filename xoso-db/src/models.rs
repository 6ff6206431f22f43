use anyhow::{bail, Result};
use chrono::NaiveDate;

/// Prize tiers of a Vietnamese lottery draw, from the special prize down.
/// Northern draws publish ĐB through G7; southern and central draws publish
/// ĐB through G8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrizeTier {
    DacBiet,
    Nhat,
    Nhi,
    Ba,
    Tu,
    Nam,
    Sau,
    Bay,
    Tam,
}

impl PrizeTier {
    /// Short code used in storage and CSV files.
    pub fn code(&self) -> &'static str {
        match self {
            PrizeTier::DacBiet => "DB",
            PrizeTier::Nhat => "G1",
            PrizeTier::Nhi => "G2",
            PrizeTier::Ba => "G3",
            PrizeTier::Tu => "G4",
            PrizeTier::Nam => "G5",
            PrizeTier::Sau => "G6",
            PrizeTier::Bay => "G7",
            PrizeTier::Tam => "G8",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "DB" | "ĐB" => Ok(PrizeTier::DacBiet),
            "G1" => Ok(PrizeTier::Nhat),
            "G2" => Ok(PrizeTier::Nhi),
            "G3" => Ok(PrizeTier::Ba),
            "G4" => Ok(PrizeTier::Tu),
            "G5" => Ok(PrizeTier::Nam),
            "G6" => Ok(PrizeTier::Sau),
            "G7" => Ok(PrizeTier::Bay),
            "G8" => Ok(PrizeTier::Tam),
            other => bail!("Unknown prize tier code: '{}'", other),
        }
    }
}

impl std::fmt::Display for PrizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeTier::DacBiet => write!(f, "Đặc Biệt"),
            PrizeTier::Nhat => write!(f, "Giải Nhất"),
            PrizeTier::Nhi => write!(f, "Giải Nhì"),
            PrizeTier::Ba => write!(f, "Giải Ba"),
            PrizeTier::Tu => write!(f, "Giải Tư"),
            PrizeTier::Nam => write!(f, "Giải Năm"),
            PrizeTier::Sau => write!(f, "Giải Sáu"),
            PrizeTier::Bay => write!(f, "Giải Bảy"),
            PrizeTier::Tam => write!(f, "Giải Tám"),
        }
    }
}

/// One published prize value within a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeValue {
    pub tier: PrizeTier,
    pub value: String,
}

/// All prize values published by one province on one drawing date.
/// Read-only to the analytics engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub province_id: String,
    pub draw_date: NaiveDate,
    pub prizes: Vec<PrizeValue>,
}

/// A prize value is a string of 1 to 6 decimal digits. Single-digit values
/// occur in G7/G8 special shapes and are valid here; the extractor decides
/// whether they are wide enough for a given analysis.
pub fn validate_prize_value(value: &str) -> Result<()> {
    if value.is_empty() || value.len() > 6 {
        bail!("Prize value '{}' out of bounds (1-6 digits)", value);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Prize value '{}' contains non-digit characters", value);
    }
    Ok(())
}
