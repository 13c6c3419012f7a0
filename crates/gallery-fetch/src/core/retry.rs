use std::time::Duration;

/// Calculate the delay after a failed attempt using linear backoff.
///
/// The delay formula is: `base * (attempt + 1)`
///
/// # Arguments
///
/// * `attempt` - The attempt that just failed (0-indexed: 0 = initial attempt)
/// * `base` - The base delay duration
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gallery_fetch::core::linear_backoff;
///
/// let base = Duration::from_millis(600);
/// assert_eq!(linear_backoff(0, base), Duration::from_millis(600));
/// assert_eq!(linear_backoff(1, base), Duration::from_millis(1200));
/// assert_eq!(linear_backoff(2, base), Duration::from_millis(1800));
/// ```
pub fn linear_backoff(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(attempt.saturating_add(1))
}
