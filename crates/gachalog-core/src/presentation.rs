// Pure mappings from raw counts to display classifications.

/// Pulls at which the five-star pity is guaranteed.
pub const FIVE_STAR_PITY_CAP: u32 = 90;

/// Pulls at which the four-star pity is guaranteed.
pub const FOUR_STAR_PITY_CAP: u32 = 10;

/// Severity of a pity bar, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PityTier {
    Nominal,
    Elevated,
    Warning,
    Critical,
}

/// Tier for a five-star pity bar.
pub fn five_star_tier(pulls: u32) -> PityTier {
    if pulls >= 90 {
        PityTier::Critical
    } else if pulls >= 73 {
        PityTier::Warning
    } else if pulls >= 50 {
        PityTier::Elevated
    } else {
        PityTier::Nominal
    }
}

/// Tier for a four-star pity bar.
pub fn four_star_tier(pulls: u32) -> PityTier {
    if pulls >= 10 {
        PityTier::Critical
    } else if pulls >= 9 {
        PityTier::Warning
    } else {
        PityTier::Nominal
    }
}

/// Filled fraction of a pity bar, clamped to `[0, 1]`.
pub fn pity_ratio(pulls: u32, cap: u32) -> f64 {
    if cap == 0 {
        return 0.0;
    }
    (f64::from(pulls) / f64::from(cap)).clamp(0.0, 1.0)
}

/// Format a counter with thousands grouping, e.g. `1234567` -> `1,234,567`.
pub fn format_count(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
