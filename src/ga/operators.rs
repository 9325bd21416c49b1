//! Genetic operators for linear and permutation genomes.
//!
//! Linear genomes (colors, inclusion bits) use cut-point crossover and
//! per-position mutation. Tours use permutation-preserving crossovers so
//! every child is a valid permutation by construction; no repair step is
//! ever needed.
//!
//! # Crossover Operators
//!
//! - [`k_point_crossover`]: alternating segments between cut points
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//!
//! # Mutation Operators
//!
//! - [`reset_mutation`]: replace a position with a freshly drawn value
//! - [`flip_mutation`]: negate a boolean position
//! - [`swap_mutation`]: exchange a position with a random other position
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Cut-point crossover for linear genomes.
///
/// Draws `cuts` distinct cut positions in `1..n` and alternates the parent
/// source at every cut, starting with `parent1`. Genomes shorter than two
/// positions (or `cuts == 0`) yield a clone of `parent1`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn k_point_crossover<G: Clone, R: Rng>(
    parent1: &[G],
    parent2: &[G],
    cuts: usize,
    rng: &mut R,
) -> Vec<G> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 || cuts == 0 {
        return parent1.to_vec();
    }

    // n - 1 interior cut positions exist; never ask for more
    let cuts = cuts.min(n - 1);
    let mut points: Vec<usize> = rand::seq::index::sample(rng, n - 1, cuts)
        .into_iter()
        .map(|p| p + 1)
        .collect();
    points.sort_unstable();

    let mut child = Vec::with_capacity(n);
    let mut from_first = true;
    let mut start = 0;
    for end in points.into_iter().chain(std::iter::once(n)) {
        let source = if from_first { parent1 } else { parent2 };
        child.extend_from_slice(&source[start..end]);
        from_first = !from_first;
        start = end;
    }
    child
}

/// Order Crossover (OX) for permutations.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]` from `template`
/// 2. Copy segment to child at the same positions
/// 3. Fill remaining positions with elements from `donor`, in their order
///    starting after the segment, skipping elements already present
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(template: &[usize], donor: &[usize], rng: &mut R) -> Vec<usize> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return template.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    ox_child(template, donor, start, end)
}

fn ox_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut taken = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        taken[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let city = donor[(end + 1 + offset) % n];
        if !taken[city] {
            child[pos] = city;
            taken[city] = true;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Partially Mapped Crossover (PMX) for permutations.
///
/// # Algorithm (Goldberg & Lingle, 1985)
///
/// 1. Select a random segment `[start, end]` and copy it from `template`
/// 2. Each `donor` element of the segment that is not yet placed follows
///    the mapping chain out of the segment and lands at the first free slot
/// 3. Remaining positions are copied from `donor`
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn pmx_crossover<R: Rng>(template: &[usize], donor: &[usize], rng: &mut R) -> Vec<usize> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return template.to_vec();
    }

    let (start, end) = random_segment(n, rng);
    pmx_child(template, donor, start, end)
}

fn pmx_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut placed = vec![false; n];

    let mut donor_pos = vec![0usize; n];
    for (i, &city) in donor.iter().enumerate() {
        donor_pos[city] = i;
    }

    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    for i in start..=end {
        let city = donor[i];
        if placed[city] {
            continue;
        }
        let mut pos = i;
        loop {
            let target = donor_pos[template[pos]];
            if target < start || target > end {
                child[target] = city;
                placed[city] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == usize::MAX {
            child[i] = donor[i];
        }
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Replaces each position, with probability `rate`, by a value from `fresh`.
pub fn reset_mutation<G, R, F>(genes: &mut [G], rate: f64, rng: &mut R, mut fresh: F)
where
    R: Rng,
    F: FnMut(&mut R) -> G,
{
    if rate <= 0.0 {
        return;
    }
    for gene in genes.iter_mut() {
        if rng.random_bool(rate.min(1.0)) {
            *gene = fresh(rng);
        }
    }
}

/// Negates each position with probability `rate`.
pub fn flip_mutation<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) {
    if rate <= 0.0 {
        return;
    }
    for gene in genes.iter_mut() {
        if rng.random_bool(rate.min(1.0)) {
            *gene = !*gene;
        }
    }
}

/// Swaps each position, with probability `rate`, with a random position.
///
/// Keeps the permutation property.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) {
    let n = perm.len();
    if n < 2 || rate <= 0.0 {
        return;
    }
    for i in 0..n {
        if rng.random_bool(rate.min(1.0)) {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Returns `true` if `perm` contains every index of `0..n` exactly once.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    // ---- k-point crossover ----

    #[test]
    fn test_one_point_is_prefix_suffix() {
        let mut rng = create_rng(42);
        let p1 = vec![0u8; 10];
        let p2 = vec![1u8; 10];

        for _ in 0..100 {
            let child = k_point_crossover(&p1, &p2, 1, &mut rng);
            assert_eq!(child.len(), 10);
            let cut = child.iter().position(|&g| g == 1).expect("one cut inside 1..n");
            assert!(cut >= 1);
            assert!(child[..cut].iter().all(|&g| g == 0));
            assert!(child[cut..].iter().all(|&g| g == 1));
        }
    }

    #[test]
    fn test_two_point_alternates_segments() {
        let mut rng = create_rng(7);
        let p1 = vec![0u8; 12];
        let p2 = vec![1u8; 12];

        for _ in 0..100 {
            let child = k_point_crossover(&p1, &p2, 2, &mut rng);
            assert_eq!(child.len(), 12);
            assert_eq!(child[0], 0);
            assert_eq!(child[11], 0, "third segment comes from parent1: {child:?}");
            let switches = child.windows(2).filter(|w| w[0] != w[1]).count();
            assert_eq!(switches, 2, "two cuts give two switches: {child:?}");
        }
    }

    #[test]
    fn test_crossover_short_genomes() {
        let mut rng = create_rng(42);
        assert_eq!(k_point_crossover(&[3], &[4], 2, &mut rng), vec![3]);
        // only one interior cut exists for n = 2
        assert_eq!(k_point_crossover(&[3, 3], &[4, 4], 2, &mut rng), vec![3, 4]);
    }

    // ---- OX Crossover ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..100 {
            let child = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&child, 8), "OX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_ox_preserves_segment() {
        let child = ox_child(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], 1, 2);
        assert_eq!(&child[1..=2], &[1, 2]);
        assert!(is_permutation(&child, 5));
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        assert_eq!(order_crossover(&[0], &[0], &mut rng), vec![0]);
    }

    // ---- PMX Crossover ----

    #[test]
    fn test_pmx_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..100 {
            let child = pmx_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&child, 8), "PMX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_pmx_known_child() {
        // Goldberg & Lingle textbook example, segment 3..=5
        let p1 = [0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = [3, 7, 5, 1, 6, 0, 2, 4];
        let child = pmx_child(&p1, &p2, 3, 5);
        assert_eq!(&child[3..=5], &[3, 4, 5]);
        assert!(is_permutation(&child, 8));
        assert_eq!(child[1], 7);
        assert_eq!(child[6], 2);
    }

    #[test]
    fn test_pmx_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![0, 1, 2, 3, 4];
        assert_eq!(pmx_crossover(&p, &p, &mut rng), p);
    }

    // ---- Mutation ----

    #[test]
    fn test_reset_mutation_rates() {
        let mut rng = create_rng(42);
        let mut genes = vec![0usize; 50];
        reset_mutation(&mut genes, 0.0, &mut rng, |_| 9);
        assert!(genes.iter().all(|&g| g == 0));
        reset_mutation(&mut genes, 1.0, &mut rng, |_| 9);
        assert!(genes.iter().all(|&g| g == 9));
    }

    #[test]
    fn test_flip_mutation_full_rate() {
        let mut rng = create_rng(42);
        let mut genes = vec![true, false, true];
        flip_mutation(&mut genes, 1.0, &mut rng);
        assert_eq!(genes, vec![false, true, false]);
    }

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, 0.3, &mut rng);
            assert!(is_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, 1.0, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    #[test]
    fn test_crossover_mutation_pipeline_preserves_validity() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..20).collect();
        let mut p2: Vec<usize> = (0..20).collect();
        p2.reverse();

        for _ in 0..50 {
            let mut c1 = order_crossover(&p1, &p2, &mut rng);
            let mut c2 = pmx_crossover(&p2, &p1, &mut rng);
            swap_mutation(&mut c1, 0.2, &mut rng);
            swap_mutation(&mut c2, 0.2, &mut rng);
            assert!(is_permutation(&c1, 20), "pipeline c1 invalid: {c1:?}");
            assert!(is_permutation(&c2, 20), "pipeline c2 invalid: {c2:?}");
        }
    }

    // ---- Helpers ----

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }
}
