//! Size constraints along one axis

/// How much room one slot along an axis asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Exactly this many cells
    Fixed(u16),
    /// Percentage of the whole axis (0-100)
    Percentage(u16),
    /// A share of whatever is left, proportional to the weight
    Fill(u16),
    /// A weighted share of what is left, kept within `min..=max`
    Range { weight: u16, min: u16, max: u16 },
}

impl Constraint {
    pub const fn fixed(n: u16) -> Self {
        Self::Fixed(n)
    }

    pub const fn fill(weight: u16) -> Self {
        Self::Fill(weight)
    }

    /// Stretch by `weight`, never below `min` nor above `max`
    pub const fn range(weight: u16, min: u16, max: u16) -> Self {
        let max = if max < min { min } else { max };
        Self::Range { weight, min, max }
    }

    /// Flexible constraints share the space left after fixed ones
    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Fill(_) | Self::Range { .. })
    }

    pub fn fill_weight(&self) -> u16 {
        match self {
            Self::Fill(w) | Self::Range { weight: w, .. } => *w,
            _ => 0,
        }
    }

    /// The least space this slot can live with
    pub fn minimum(&self) -> u16 {
        match self {
            Self::Fixed(n) => *n,
            Self::Percentage(_) | Self::Fill(_) => 0,
            Self::Range { min, .. } => *min,
        }
    }

    /// The most space this slot will take
    pub fn maximum(&self) -> u16 {
        match self {
            Self::Fixed(n) => *n,
            Self::Percentage(_) | Self::Fill(_) => u16::MAX,
            Self::Range { max, .. } => *max,
        }
    }

    /// Size of a non-flexible slot given the whole axis
    pub fn resolve_fixed(&self, total: u16) -> u16 {
        match self {
            Self::Fixed(n) => (*n).min(total),
            Self::Percentage(p) => (total as u32 * (*p).min(100) as u32 / 100) as u16,
            Self::Fill(_) | Self::Range { .. } => 0,
        }
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::Fill(1)
    }
}
