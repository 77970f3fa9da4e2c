use std::cmp::Ordering;

/// Compares two version strings segment by segment.
///
/// Each version is split on `.` and `-`. Segments made entirely of digits
/// compare numerically; everything else falls back to lexical comparison.
/// A missing segment counts as `0` against a numeric segment and as an
/// empty string against anything else.
///
/// This is deliberately not semver precedence: lockfiles contain version
/// strings a strict parser would reject ("1.0.0-rc.1+build", "2021.4",
/// "unknown"), and the comparator has to order all of them somehow.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = split_segments(a);
    let right: Vec<&str> = split_segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied();
        let r = right.get(i).copied();

        let ordering = match (l.map(parse_segment), r.map(parse_segment)) {
            (Some(Segment::Num(x)), Some(Segment::Num(y))) => x.cmp(&y),
            (Some(Segment::Num(x)), None) => x.cmp(&0),
            (None, Some(Segment::Num(y))) => 0.cmp(&y),
            // Any pairing involving a non-numeric segment is lexical.
            _ => l.unwrap_or("").cmp(r.unwrap_or("")),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

fn split_segments(version: &str) -> Vec<&str> {
    version.split(['.', '-']).collect()
}

enum Segment {
    Num(u64),
    Text,
}

fn parse_segment(s: &str) -> Segment {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        match s.parse::<u64>() {
            Ok(n) => Segment::Num(n),
            Err(_) => Segment::Text, // overflows u64, compare as text
        }
    } else {
        Segment::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_versions() {
        assert_eq!(compare("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare("0.0.0", "0.0.0"), Ordering::Equal);
        assert_eq!(compare("unknown", "unknown"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_ordering() {
        assert_eq!(compare("1.2.3", "1.2.4"), Ordering::Less);
        assert_eq!(compare("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare("2.0.0", "10.0.0"), Ordering::Less);
    }

    #[test]
    fn test_missing_segment_vs_numeric_is_zero() {
        assert_eq!(compare("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare("1.2", "1.2.1"), Ordering::Less);
        assert_eq!(compare("1.2.1", "1.2"), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_segments_compare_lexically() {
        // "beta" vs "alpha" is a string comparison, not semver precedence
        assert_eq!(compare("1.0.0-beta", "1.0.0-alpha"), Ordering::Greater);
        // missing vs string segment compares against the empty string
        assert_eq!(compare("1.0.0", "1.0.0-alpha"), Ordering::Less);
    }

    #[test]
    fn test_mixed_segment_falls_back_to_lexical() {
        // "3a" is not numeric, so "3a" vs "10" compares as strings
        assert_eq!(compare("1.3a", "1.10"), Ordering::Greater);
    }

    #[test]
    fn test_antisymmetry() {
        let pairs = [
            ("1.2.3", "1.2.4"),
            ("1.0.0-beta", "1.0.0"),
            ("2.0", "2.0.0"),
            ("abc", "abd"),
        ];
        for (a, b) in pairs {
            assert_eq!(compare(a, b), compare(b, a).reverse(), "{a} vs {b}");
        }
    }

    #[test]
    fn test_huge_numeric_segment() {
        // beyond u64 both sides degrade to lexical, no panic
        let big = "99999999999999999999999999.0";
        assert_eq!(compare(big, big), Ordering::Equal);
    }
}
