/// How far into the future a signed timestamp may be, in seconds.
pub const TIMESTAMP_PLAUSIBILITY_WINDOW: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreshnessError {
    DoesNotAdvanceTimestamp { candidate: u32, stored: u32 },
    TimestampNotPlausible { candidate: u32, now: u64 },
}

impl std::fmt::Display for FreshnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshnessError::DoesNotAdvanceTimestamp { candidate, stored } => write!(
                f,
                "timestamp {} does not advance stored timestamp {}",
                candidate, stored
            ),
            FreshnessError::TimestampNotPlausible { candidate, now } => write!(
                f,
                "timestamp {} is more than {}s ahead of {}",
                candidate, TIMESTAMP_PLAUSIBILITY_WINDOW, now
            ),
        }
    }
}

/// Gate every signed write goes through. Checked in order:
/// zero timestamp, plausibility window, strict increase.
pub fn check_freshness(candidate: u32, stored: u32, now: u64) -> Result<(), FreshnessError> {
    if candidate == 0 {
        return Err(FreshnessError::DoesNotAdvanceTimestamp { candidate, stored });
    }
    if candidate as u64 > now.saturating_add(TIMESTAMP_PLAUSIBILITY_WINDOW) {
        return Err(FreshnessError::TimestampNotPlausible { candidate, now });
    }
    if candidate <= stored {
        return Err(FreshnessError::DoesNotAdvanceTimestamp { candidate, stored });
    }
    Ok(())
}
