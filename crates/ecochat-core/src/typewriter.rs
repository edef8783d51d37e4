//! Character-by-character reveal of bot replies.

use std::time::Duration;

use rand::Rng;

/// Extra pause after sentence-ending punctuation and commas
pub const PUNCTUATION_PAUSE: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterOptions {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(8),
            max_delay: Duration::from_millis(22),
        }
    }
}

impl TypewriterOptions {
    /// Build options from millisecond bounds, swapping them if reversed.
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        let (lo, hi) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min_delay: Duration::from_millis(lo),
            max_delay: Duration::from_millis(hi),
        }
    }
}

pub fn is_pause_char(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | ',')
}

/// Delay to wait after revealing `ch`.
pub fn char_delay<R: Rng>(ch: char, options: &TypewriterOptions, rng: &mut R) -> Duration {
    let min = options.min_delay.as_millis() as u64;
    let max = options.max_delay.as_millis() as u64;
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };

    let base = Duration::from_millis(rng.gen_range(lo..=hi));
    if is_pause_char(ch) {
        base + PUNCTUATION_PAUSE
    } else {
        base
    }
}

/// Reveal `text` one character at a time.
///
/// `reveal` is called with each character in order, then the task sleeps for
/// that character's delay. Returning `false` from `reveal` stops the
/// animation early; the function then returns `false`.
pub async fn animate<R, F>(text: &str, options: TypewriterOptions, rng: &mut R, mut reveal: F) -> bool
where
    R: Rng,
    F: FnMut(char) -> bool,
{
    for ch in text.chars() {
        if !reveal(ch) {
            return false;
        }
        let delay = char_delay(ch, &options, rng);
        tokio::time::sleep(delay).await;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::time::Instant;

    #[test]
    fn test_default_options() {
        let options = TypewriterOptions::default();
        assert_eq!(options.min_delay, Duration::from_millis(8));
        assert_eq!(options.max_delay, Duration::from_millis(22));
    }

    #[test]
    fn test_from_millis_swaps_reversed_bounds() {
        let options = TypewriterOptions::from_millis(30, 10);
        assert_eq!(options.min_delay, Duration::from_millis(10));
        assert_eq!(options.max_delay, Duration::from_millis(30));
    }

    #[test]
    fn test_char_delay_within_bounds() {
        let options = TypewriterOptions::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let delay = char_delay('a', &options, &mut rng);
            assert!(delay >= Duration::from_millis(8));
            assert!(delay <= Duration::from_millis(22));
        }
    }

    #[test]
    fn test_char_delay_punctuation_pause() {
        let options = TypewriterOptions::from_millis(5, 5);
        let mut rng = StdRng::seed_from_u64(1);
        for ch in ['.', '!', '?', ','] {
            assert_eq!(char_delay(ch, &options, &mut rng), Duration::from_millis(85));
        }
        assert_eq!(char_delay(';', &options, &mut rng), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_reveals_incrementally() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut revealed = String::new();
        let mut lengths = Vec::new();

        let finished = animate("Hi, there!", TypewriterOptions::default(), &mut rng, |ch| {
            revealed.push(ch);
            lengths.push(revealed.chars().count());
            true
        })
        .await;

        assert!(finished);
        assert_eq!(revealed, "Hi, there!");
        assert!(lengths.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*lengths.last().unwrap(), "Hi, there!".chars().count());
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_waits_for_delays() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = Instant::now();

        animate("a,b", TypewriterOptions::from_millis(10, 10), &mut rng, |_| true).await;

        // 10 + (10 + 80) + 10
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(110));
        assert!(elapsed < Duration::from_millis(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_stops_when_reveal_refuses() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut revealed = String::new();

        let finished = animate("abcdef", TypewriterOptions::default(), &mut rng, |ch| {
            if revealed.len() == 2 {
                return false;
            }
            revealed.push(ch);
            true
        })
        .await;

        assert!(!finished);
        assert_eq!(revealed, "ab");
    }

    #[tokio::test(start_paused = true)]
    async fn test_animate_multibyte_text() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut count = 0;
        animate("🌿é", TypewriterOptions::default(), &mut rng, |_| {
            count += 1;
            true
        })
        .await;
        assert_eq!(count, 2);
    }
}
