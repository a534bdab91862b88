use tilenav_core::Point;

/// Offsets of the 8 neighbours, rotating clockwise from straight down.
///
/// Even indices are orthogonal, odd indices diagonal, so the two tiles
/// flanking diagonal `d` are `d - 1` and `d + 1` (mod 8).
pub(crate) const DIR_OFFSETS: [Point; 8] = [
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
];

#[inline]
pub(crate) const fn is_diagonal(dir: usize) -> bool {
    dir % 2 == 1
}

/// The two orthogonal directions flanking `dir`.
#[inline]
pub(crate) const fn flanks(dir: usize) -> (usize, usize) {
    ((dir + 1) % 8, (dir + 7) % 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonals_are_flanked_by_their_components() {
        for dir in (0..8).filter(|&d| is_diagonal(d)) {
            let d = DIR_OFFSETS[dir];
            let (a, b) = flanks(dir);
            assert!(!is_diagonal(a) && !is_diagonal(b));
            assert_eq!(DIR_OFFSETS[a] + DIR_OFFSETS[b], d);
        }
    }

    #[test]
    fn offsets_are_distinct_unit_steps() {
        for (i, a) in DIR_OFFSETS.iter().enumerate() {
            assert!(a.x.abs() <= 1 && a.y.abs() <= 1 && *a != Point::ZERO);
            assert_eq!(is_diagonal(i), a.x != 0 && a.y != 0);
            assert!(DIR_OFFSETS[i + 1..].iter().all(|b| b != a));
        }
    }
}
