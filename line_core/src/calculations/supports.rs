//! # Support & Splice Estimation
//!
//! Counts of line hardware derived from total distance and the standardized
//! current rating:
//!
//! - SO-4 supports: one every 2 m up to 100 A, one every 1.33 m above 102 A
//! - EMP-4 splices: one per 4 m section joint, independent of rating
//! - AE-4 end-feed unit: reference code bucketed by rating
//! - SU-5001 sliding guides: always one more than the support count
//!
//! The (101, 102] rating band maps to zero supports. No ladder value falls
//! in it (100 and 140 are neighbours), so the band is unreachable from the
//! standard sizing path; it is kept because the estimator accepts any
//! numeric rating.

use crate::calculations::current::RatingSelection;

/// Advisory shown when the end-feed unit must be chosen by cable section
pub const END_FEED_BY_CABLE: &str = "Elegir según cable (desplegar abajo):";

/// Number of SO-4 supports for a line.
///
/// `None` when the distance is absent/non-positive or the rating has no
/// numeric value (undetermined or refer-to-technical).
pub fn support_count(distance_m: Option<f64>, rating: Option<RatingSelection>) -> Option<u64> {
    let distance = distance_m.filter(|d| d.is_finite() && *d > 0.0)?;
    let amps = f64::from(rating?.amps()?);

    let raw = if amps < 101.0 {
        distance / 2.0
    } else if amps > 102.0 {
        distance * 0.75
    } else {
        0.0
    };
    Some(raw.ceil() as u64)
}

/// Number of EMP-4 splices: one per 4 m joint, minus the feed end.
///
/// Independent of the current rating; `None` only when the distance is
/// absent or non-finite.
pub fn splice_count(distance_m: Option<f64>) -> Option<i64> {
    let distance = distance_m.filter(|d| d.is_finite())?;
    Some((distance / 4.0 - 1.0).ceil() as i64)
}

/// End-feed (alimentación extrema) catalog reference for a rating.
///
/// Above 150 A the unit depends on the cable section, so the result is the
/// choose-by-cable advisory rather than a code.
pub fn end_feed_ref(rating: Option<RatingSelection>) -> Option<&'static str> {
    let amps = f64::from(rating?.amps()?);
    if amps < 70.0 {
        Some("AE-4")
    } else if amps < 110.0 {
        Some("AE-4-100")
    } else if amps < 150.0 {
        Some("AE-4-140")
    } else {
        Some(END_FEED_BY_CABLE)
    }
}

/// Number of SU-5001 sliding guides: support count plus one
pub fn sliding_guide_count(supports: Option<u64>) -> Option<u64> {
    supports.map(|count| count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_below_101_amps() {
        // 100 m at 60 A: ceil(100 / 2) = 50
        let supports = support_count(Some(100.0), Some(RatingSelection::Rated(60)));
        assert_eq!(supports, Some(50));

        let supports = support_count(Some(99.0), Some(RatingSelection::Rated(100)));
        assert_eq!(supports, Some(50));
    }

    #[test]
    fn test_supports_above_102_amps() {
        // 100 m at 140 A: ceil(100 * 0.75) = 75
        let supports = support_count(Some(100.0), Some(RatingSelection::Rated(140)));
        assert_eq!(supports, Some(75));

        let supports = support_count(Some(101.0), Some(RatingSelection::Rated(200)));
        assert_eq!(supports, Some(76));
    }

    #[test]
    fn test_supports_in_unreachable_band() {
        // 101-102 A maps to zero supports. The standard ladder never
        // produces a value here; exercised directly to pin the behavior.
        let supports = support_count(Some(100.0), Some(RatingSelection::Rated(101)));
        assert_eq!(supports, Some(0));
        let supports = support_count(Some(100.0), Some(RatingSelection::Rated(102)));
        assert_eq!(supports, Some(0));
    }

    #[test]
    fn test_supports_with_zero_rating() {
        // A zero rating still counts as numeric and lands in the <101 bucket
        let supports = support_count(Some(10.0), Some(RatingSelection::NoneRequired));
        assert_eq!(supports, Some(5));
    }

    #[test]
    fn test_supports_undefined_cases() {
        assert_eq!(support_count(None, Some(RatingSelection::Rated(60))), None);
        assert_eq!(support_count(Some(0.0), Some(RatingSelection::Rated(60))), None);
        assert_eq!(support_count(Some(-5.0), Some(RatingSelection::Rated(60))), None);
        assert_eq!(support_count(Some(100.0), None), None);
        assert_eq!(support_count(Some(100.0), Some(RatingSelection::ReferTechnical)), None);
    }

    #[test]
    fn test_splice_count() {
        // ceil(100 / 4 - 1) = 24
        assert_eq!(splice_count(Some(100.0)), Some(24));
        assert_eq!(splice_count(Some(10.0)), Some(2));
        // Short lines round up to zero, never negative beyond the formula
        assert_eq!(splice_count(Some(2.0)), Some(0));
        assert_eq!(splice_count(None), None);
        assert_eq!(splice_count(Some(f64::NAN)), None);
    }

    #[test]
    fn test_end_feed_buckets() {
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(40))), Some("AE-4"));
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(60))), Some("AE-4"));
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(80))), Some("AE-4-100"));
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(100))), Some("AE-4-100"));
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(140))), Some("AE-4-140"));
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(160))), Some(END_FEED_BY_CABLE));
        assert_eq!(end_feed_ref(Some(RatingSelection::Rated(200))), Some(END_FEED_BY_CABLE));
    }

    #[test]
    fn test_end_feed_undefined_without_numeric_rating() {
        assert_eq!(end_feed_ref(None), None);
        assert_eq!(end_feed_ref(Some(RatingSelection::ReferTechnical)), None);
    }

    #[test]
    fn test_sliding_guides_follow_supports() {
        assert_eq!(sliding_guide_count(Some(50)), Some(51));
        assert_eq!(sliding_guide_count(None), None);
    }
}
