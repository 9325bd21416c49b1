//! 2-opt local search for closed tours.
//!
//! A 2-opt move removes two tour edges and reconnects the tour by reversing
//! the segment between them. [`two_opt`] applies first-improvement moves
//! until none shortens the tour.

/// Improvements smaller than this are treated as noise.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Length change from reversing `order[i..j]` in a closed tour.
///
/// Negative means the tour gets shorter. Requires `1 <= i < j <= order.len()`;
/// the successor of `order[j - 1]` wraps to `order[0]` when `j == order.len()`.
pub fn reverse_gain<F>(order: &[usize], i: usize, j: usize, dist: F) -> f64
where
    F: Fn(usize, usize) -> f64,
{
    let n = order.len();
    debug_assert!(1 <= i && i < j && j <= n, "segment {i}..{j} out of range for {n}");
    let before = order[i - 1];
    let first = order[i];
    let last = order[j - 1];
    let after = order[j % n];
    dist(before, last) + dist(first, after) - dist(before, first) - dist(last, after)
}

/// Repeatedly applies improving 2-opt moves and returns the refined tour.
///
/// Scans `i` from 1 and `j` from `i + 2` up to `n`, reversing `order[i..j]`
/// whenever that shortens the tour, and restarts the scan after every
/// accepted move. The result is never longer than the input, is a
/// permutation of it, and is a fixed point of another call. Tours with fewer
/// than four cities are returned unchanged.
pub fn two_opt<F>(order: &[usize], dist: F) -> Vec<usize>
where
    F: Fn(usize, usize) -> f64,
{
    let mut tour = order.to_vec();
    let n = tour.len();
    if n < 4 {
        return tour;
    }

    let mut moves = 0usize;
    'scan: loop {
        for i in 1..n - 1 {
            for j in (i + 2)..=n {
                if reverse_gain(&tour, i, j, &dist) < -IMPROVEMENT_EPS {
                    tour[i..j].reverse();
                    moves += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }

    if moves > 0 {
        log::debug!("2-opt: {moves} improving moves on {n} cities");
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_dist(a: usize, b: usize) -> f64 {
        const PTS: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];
        let (ax, ay) = PTS[a];
        let (bx, by) = PTS[b];
        (ax - bx).hypot(ay - by)
    }

    fn length(order: &[usize]) -> f64 {
        let n = order.len();
        (0..n).map(|k| square_dist(order[k], order[(k + 1) % n])).sum()
    }

    #[test]
    fn test_uncrosses_square() {
        let crossed = [0, 2, 1, 3];
        assert!(length(&crossed) > 40.0 + 1.0);
        let fixed = two_opt(&crossed, square_dist);
        assert!((length(&fixed) - 40.0).abs() < 1e-9);
        assert_eq!(fixed[0], 0, "position 0 is never moved");
    }

    #[test]
    fn test_reverse_gain_matches_length_change() {
        let order = [0, 2, 1, 3];
        for i in 1..3 {
            for j in (i + 2)..=4 {
                let mut reversed = order.to_vec();
                reversed[i..j].reverse();
                let expected = length(&reversed) - length(&order);
                assert!((reverse_gain(&order, i, j, square_dist) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_small_tours_unchanged() {
        assert_eq!(two_opt(&[], square_dist), Vec::<usize>::new());
        assert_eq!(two_opt(&[2], square_dist), vec![2]);
        assert_eq!(two_opt(&[2, 0, 1], square_dist), vec![2, 0, 1]);
    }

    #[test]
    fn test_optimal_tour_is_fixed_point() {
        let optimal = [0, 1, 2, 3];
        assert_eq!(two_opt(&optimal, square_dist), optimal.to_vec());
    }

    #[test]
    fn test_idempotent_on_line() {
        // cities on a line: the optimal closed tour goes out and back
        let xs: [f64; 6] = [0.0, 7.0, 2.0, 9.0, 4.0, 1.0];
        let dist = |a: usize, b: usize| (xs[a] - xs[b]).abs();
        let once = two_opt(&[0, 1, 2, 3, 4, 5], dist);
        let twice = two_opt(&once, dist);
        assert_eq!(once, twice);
    }
}
