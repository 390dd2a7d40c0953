use std::fmt;

/// Lifecycle of a record instance between construction and drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Host `init` ran and the dynamic map is seeded.
    Initialized,
    /// Unknown row fields are being registered and assigned. A record left
    /// in this state had a hydration error.
    Hydrating,
    /// Hydration completed at least once.
    Live,
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::Hydrating => write!(f, "hydrating"),
            Self::Live => write!(f, "live"),
        }
    }
}
