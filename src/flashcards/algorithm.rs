//! SM-2 Spaced Repetition Algorithm
//!
//! Adapted SuperMemo 2 scheduling for vocabulary cards. Intervals ramp
//! 1 day, 6 days, then grow by the card's ease factor on each
//! consecutive success. Any lapse sends the card back to a 1 day interval.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! Quality is not range checked. Everything at or above 3 counts as a
//! successful recall and everything below as a lapse.

use chrono::Utc;

use super::clock::MS_PER_DAY;
use super::models::{Flashcard, ReviewRating, ReviewStats};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Lowest quality that counts as a successful recall
pub const PASSING_QUALITY: i32 = 3;

/// Schedule the next review of `card` relative to the current time
pub fn schedule_next_review(card: &Flashcard, quality: i32) -> Flashcard {
    schedule_next_review_at(card, quality, Utc::now().timestamp_millis())
}

/// Calculate the card's next state using the SM-2 algorithm
///
/// # Arguments
/// * `card` - Card being reviewed
/// * `quality` - Quality rating (0-5 by convention)
/// * `now_millis` - Review time in milliseconds since the Unix epoch
///
/// # Returns
/// A copy of `card` with new interval, repetition, ease factor and due date
pub fn schedule_next_review_at(card: &Flashcard, quality: i32, now_millis: i64) -> Flashcard {
    let mut interval = card.interval;
    let mut repetition = card.repetition;
    let mut ease_factor = card.ease_factor;

    if quality >= PASSING_QUALITY {
        interval = match repetition {
            0 => 1,
            1 => 6,
            _ => grow_interval(card.interval, card.ease_factor),
        };
        repetition = repetition.saturating_add(1);

        // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
        let miss = 5.0 - f64::from(quality);
        ease_factor += 0.1 - miss * (0.08 + miss * 0.02);

        // Also replaces a NaN ease read from corrupted storage
        ease_factor = ease_factor.max(MIN_EASE_FACTOR);
    } else {
        repetition = 0;
        interval = 1;
    }

    let next_review_date =
        now_millis.saturating_add(i64::from(interval).saturating_mul(MS_PER_DAY));

    Flashcard {
        interval,
        repetition,
        ease_factor,
        next_review_date,
        ..card.clone()
    }
}

/// `round(interval * ease)`
///
/// The float-to-int cast saturates: `u32::MAX` above, zero for negative or
/// NaN products.
fn grow_interval(interval: u32, ease_factor: f64) -> u32 {
    (f64::from(interval) * ease_factor).round() as u32
}

/// Cards due at `now_millis`, in deck order
pub fn select_due_cards(deck: &[Flashcard], now_millis: i64) -> Vec<&Flashcard> {
    deck.iter().filter(|card| card.is_due_at(now_millis)).collect()
}

/// Cards due right now, in deck order
pub fn due_cards_now(deck: &[Flashcard]) -> Vec<&Flashcard> {
    select_due_cards(deck, Utc::now().timestamp_millis())
}

/// Calculate the interval each rating would give.
/// Used to show users what interval each button leads to.
pub fn preview_intervals(card: &Flashcard) -> [u32; 4] {
    // Order matches ReviewRating::ALL: Again, Hard, Good, Easy
    ReviewRating::ALL.map(|rating| schedule_next_review_at(card, rating.quality(), 0).interval)
}

/// Count cards per learning stage
pub fn review_stats(deck: &[Flashcard], now_millis: i64) -> ReviewStats {
    let mut stats = ReviewStats {
        total_cards: deck.len(),
        ..ReviewStats::default()
    };

    for card in deck {
        if card.is_new() {
            stats.new_cards += 1;
        } else if card.repetition < 2 {
            stats.learning_cards += 1;
        } else {
            stats.review_cards += 1;
        }

        if card.is_due_at(now_millis) {
            stats.due_cards += 1;
        }
    }

    if !deck.is_empty() {
        let total: f64 = deck.iter().map(|c| c.ease_factor).sum();
        stats.average_ease = Some(total / deck.len() as f64);
    }

    stats
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::{CardId, DEFAULT_EASE_FACTOR};
    use proptest::prelude::*;

    const T: i64 = 1_700_000_000_000;

    fn card(interval: u32, repetition: u32, ease_factor: f64) -> Flashcard {
        Flashcard {
            id: CardId::from("card"),
            front: "de vergadering".to_string(),
            back: "the meeting".to_string(),
            interval,
            repetition,
            ease_factor,
            next_review_date: 0,
            source: Some("Reading: Office Emails".to_string()),
        }
    }

    fn card_due_at(next_review_date: i64) -> Flashcard {
        Flashcard {
            next_review_date,
            ..card(0, 0, DEFAULT_EASE_FACTOR)
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_first_review_correct() {
        let result = schedule_next_review_at(&card(0, 0, 2.5), 4, T);

        assert_eq!(result.interval, 1);
        assert_eq!(result.repetition, 1);
        assert_eq!(result.next_review_date, T + MS_PER_DAY);
    }

    #[test]
    fn test_second_review_correct() {
        let result = schedule_next_review_at(&card(1, 1, 2.5), 3, T);

        assert_eq!(result.interval, 6);
        assert_eq!(result.repetition, 2);
    }

    #[test]
    fn test_subsequent_review_correct() {
        let result = schedule_next_review_at(&card(6, 2, 2.5), 4, T);

        // 2.5 + (0.1 - 1 * (0.08 + 1 * 0.02)) = 2.5
        assert_close(result.ease_factor, 2.5);
        // 6 * 2.5 = 15
        assert_eq!(result.interval, 15);
        assert_eq!(result.repetition, 3);
        assert_eq!(result.next_review_date, T + 15 * MS_PER_DAY);
    }

    #[test]
    fn test_review_incorrect_resets() {
        let result = schedule_next_review_at(&card(6, 2, 2.5), 0, T);

        assert_eq!(result.repetition, 0);
        assert_eq!(result.interval, 1);
        assert_eq!(result.ease_factor, 2.5);
        assert_eq!(result.next_review_date, T + MS_PER_DAY);
    }

    #[test]
    fn test_lapse_keeps_ease_factor() {
        let result = schedule_next_review_at(&card(40, 7, 1.9), 2, T);
        assert_eq!(result.ease_factor, 1.9);
    }

    #[test]
    fn test_ease_factor_changes_with_quality() {
        let base = card(10, 3, 2.5);
        assert_close(schedule_next_review_at(&base, 5, T).ease_factor, 2.6);
        assert_close(schedule_next_review_at(&base, 3, T).ease_factor, 2.36);
    }

    #[test]
    fn test_ease_factor_minimum() {
        let result = schedule_next_review_at(&card(10, 5, 1.35), 3, T);
        assert_eq!(result.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_ease_factor_has_no_ceiling() {
        let mut current = card(1, 2, 2.5);
        for _ in 0..10 {
            current = schedule_next_review_at(&current, 5, T);
        }
        assert_close(current.ease_factor, 3.5);
    }

    #[test]
    fn test_out_of_range_quality_is_accepted() {
        // 5 - 9 = -4: 0.1 - (-4) * (0.08 - 0.08) = 0.1
        let high = schedule_next_review_at(&card(6, 2, 2.5), 9, T);
        assert_eq!(high.repetition, 3);
        assert_close(high.ease_factor, 2.6);

        let low = schedule_next_review_at(&card(6, 2, 2.5), -7, T);
        assert_eq!(low.repetition, 0);
        assert_eq!(low.interval, 1);

        let extreme = schedule_next_review_at(&card(6, 2, 2.5), i32::MIN, T);
        assert_eq!(extreme.interval, 1);
        let extreme = schedule_next_review_at(&card(6, 2, 2.5), i32::MAX, T);
        assert_eq!(extreme.repetition, 3);
        assert!(extreme.ease_factor >= MIN_EASE_FACTOR);
    }

    #[test]
    fn test_corrupt_ease_self_corrects_on_success() {
        let result = schedule_next_review_at(&card(6, 1, f64::NAN), 4, T);
        assert_eq!(result.ease_factor, MIN_EASE_FACTOR);

        let result = schedule_next_review_at(&card(6, 1, 0.4), 5, T);
        assert_eq!(result.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_zero_interval_grows_to_zero() {
        let result = schedule_next_review_at(&card(0, 2, 2.5), 4, T);
        assert_eq!(result.interval, 0);
        assert_eq!(result.repetition, 3);
        assert_eq!(result.next_review_date, T);
        assert_eq!(select_due_cards(std::slice::from_ref(&result), T).len(), 1);
    }

    #[test]
    fn test_huge_interval_saturates() {
        let result = schedule_next_review_at(&card(u32::MAX, 9, 2.5), 5, T);
        assert_eq!(result.interval, u32::MAX);
        assert!(result.next_review_date > T);
    }

    #[test]
    fn test_input_card_untouched() {
        let before = card(6, 2, 2.5);
        let result = schedule_next_review_at(&before, 5, T);

        assert_eq!(before, card(6, 2, 2.5));
        assert_eq!(result.id, before.id);
        assert_eq!(result.front, before.front);
        assert_eq!(result.back, before.back);
        assert_eq!(result.source, before.source);
    }

    #[test]
    fn test_schedule_uses_current_time() {
        let before = Utc::now().timestamp_millis();
        let result = schedule_next_review(&card(0, 0, 2.5), 5);
        let after = Utc::now().timestamp_millis();

        assert!(result.next_review_date >= before + MS_PER_DAY);
        assert!(result.next_review_date <= after + MS_PER_DAY);
    }

    #[test]
    fn test_select_due_cards() {
        let now = T;
        let deck: Vec<Flashcard> = [now - 1, now, now + 1, now + 100, now - 1000]
            .into_iter()
            .map(card_due_at)
            .collect();

        let due = select_due_cards(&deck, now);
        let dates: Vec<i64> = due.iter().map(|c| c.next_review_date).collect();
        assert_eq!(dates, vec![now - 1, now, now - 1000]);
    }

    #[test]
    fn test_new_card_is_selected_immediately() {
        let new_card = Flashcard::new_at("hallo".to_string(), "hello".to_string(), None, T);
        assert_eq!(new_card.interval, 0);
        assert_eq!(new_card.repetition, 0);
        assert_eq!(new_card.ease_factor, 2.5);

        let deck = vec![new_card];
        assert_eq!(select_due_cards(&deck, T).len(), 1);

        let fresh = vec![Flashcard::new("hallo".to_string(), "hello".to_string(), None)];
        assert_eq!(due_cards_now(&fresh).len(), 1);
    }

    #[test]
    fn test_select_due_cards_empty_deck() {
        assert!(select_due_cards(&[], T).is_empty());
    }

    #[test]
    fn test_preview_intervals() {
        assert_eq!(preview_intervals(&card(0, 0, 2.5)), [1, 1, 1, 1]);
        assert_eq!(preview_intervals(&card(1, 1, 2.5)), [1, 1, 6, 6]);
        // 10 * 2.5 = 25 for every passing rating
        assert_eq!(preview_intervals(&card(10, 4, 2.5)), [1, 1, 25, 25]);
    }

    #[test]
    fn test_review_stats() {
        let deck = vec![
            card_due_at(T - 1),
            Flashcard {
                next_review_date: T + MS_PER_DAY,
                ..card(1, 1, 2.5)
            },
            Flashcard {
                next_review_date: T - 5,
                ..card(1, 0, 2.3)
            },
            Flashcard {
                next_review_date: T + 6 * MS_PER_DAY,
                ..card(6, 2, 2.6)
            },
        ];

        let stats = review_stats(&deck, T);
        assert_eq!(stats.total_cards, 4);
        assert_eq!(stats.new_cards, 1);
        assert_eq!(stats.learning_cards, 2);
        assert_eq!(stats.review_cards, 1);
        assert_eq!(stats.due_cards, 2);
        assert_close(stats.average_ease.unwrap(), 2.475);
    }

    #[test]
    fn test_review_stats_empty_deck() {
        let stats = review_stats(&[], T);
        assert_eq!(stats, ReviewStats::default());
        assert_eq!(stats.average_ease, None);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }

    fn arb_card() -> impl Strategy<Value = Flashcard> {
        (0u32..5_000, 0u32..40, 1.3f64..4.0, -1_000_000i64..1_000_000).prop_map(
            |(interval, repetition, ease_factor, next_review_date)| Flashcard {
                next_review_date,
                ..card(interval, repetition, ease_factor)
            },
        )
    }

    proptest! {
        #[test]
        fn first_success_is_one_day(ease in 1.3f64..4.0, quality in 3i32..=5) {
            let result = schedule_next_review_at(&card(0, 0, ease), quality, T);
            prop_assert_eq!(result.interval, 1);
            prop_assert_eq!(result.repetition, 1);
        }

        #[test]
        fn second_success_is_six_days(
            interval in 0u32..100,
            ease in 1.3f64..4.0,
            quality in 3i32..=5,
        ) {
            let result = schedule_next_review_at(&card(interval, 1, ease), quality, T);
            prop_assert_eq!(result.interval, 6);
            prop_assert_eq!(result.repetition, 2);
        }

        #[test]
        fn later_success_multiplies_by_old_ease(
            interval in 1u32..5_000,
            repetition in 2u32..40,
            ease in 1.3f64..4.0,
            quality in 3i32..=5,
        ) {
            let result = schedule_next_review_at(&card(interval, repetition, ease), quality, T);
            let expected = (f64::from(interval) * ease).round() as u32;
            prop_assert_eq!(result.interval, expected);
            prop_assert_eq!(result.repetition, repetition + 1);
        }

        #[test]
        fn lapse_resets_progress(card in arb_card(), quality in -20i32..3) {
            let result = schedule_next_review_at(&card, quality, T);
            prop_assert_eq!(result.repetition, 0);
            prop_assert_eq!(result.interval, 1);
            prop_assert_eq!(result.ease_factor, card.ease_factor);
        }

        #[test]
        fn ease_never_below_floor(card in arb_card(), quality in -20i32..20) {
            let result = schedule_next_review_at(&card, quality, T);
            prop_assert!(result.ease_factor >= MIN_EASE_FACTOR);
        }

        #[test]
        fn due_date_is_interval_days_after_now(
            card in arb_card(),
            quality in 0i32..=5,
            now in 0i64..4_000_000_000_000,
        ) {
            let result = schedule_next_review_at(&card, quality, now);
            prop_assert_eq!(
                result.next_review_date,
                now + i64::from(result.interval) * MS_PER_DAY
            );
            if card.interval >= 1 {
                prop_assert!(result.interval >= 1);
            }
        }

        #[test]
        fn due_selection_matches_filter(
            dates in prop::collection::vec(-1_000i64..1_000, 0..30),
            now in -1_000i64..1_000,
        ) {
            let deck: Vec<Flashcard> = dates.iter().copied().map(card_due_at).collect();
            let due = select_due_cards(&deck, now);
            let expected: Vec<i64> = dates.iter().copied().filter(|d| *d <= now).collect();
            let actual: Vec<i64> = due.iter().map(|c| c.next_review_date).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
