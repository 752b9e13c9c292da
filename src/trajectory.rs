//! Analysis of simulated trajectories.

/// Detect a cycle in the given sequence.
///
/// Searches for the smallest window size `m` (from `1` to `len / 2`) and, for that size,
/// the smallest index `i` such that `data[i..i + m] == data[i + m..i + 2 * m]`. Returns
/// `(i, m)`: `i` is the length of the transient part and `m` is the period of the
/// attractor (`1` for a steady state).
///
/// If no repetition is found within the available horizon, `(0, 0)` is returned.
///
/// The search uses exact equality and is quadratic in the length of `data`.
pub fn detect_cycles<T: PartialEq>(data: &[T]) -> (usize, usize) {
    let size = data.len();
    for window in 1..=(size / 2) {
        for index in 0..=(size - 2 * window) {
            let left = &data[index..index + window];
            let right = &data[index + window..index + 2 * window];
            if left == right {
                return (index, window);
            }
        }
    }
    (0, 0)
}

/// Greatest common divisor using Euclid's algorithm.
pub fn pair_gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Greatest common divisor of all the given periods.
///
/// Returns `0` for an empty slice (`0` is the neutral element of `gcd`).
pub fn list_gcd(data: &[u64]) -> u64 {
    data.iter().fold(0, |acc, it| pair_gcd(acc, *it))
}

#[cfg(test)]
mod tests {
    use super::{detect_cycles, list_gcd, pair_gcd};

    #[test]
    fn cycle_after_transient() {
        assert_eq!((1, 2), detect_cycles(&["s0", "s1", "s2", "s1", "s2"]));
        assert_eq!((0, 3), detect_cycles(&[1, 2, 3, 1, 2, 3, 1]));
    }

    #[test]
    fn steady_state() {
        assert_eq!((2, 1), detect_cycles(&[5, 4, 3, 3]));
        assert_eq!((0, 1), detect_cycles(&[true, true]));
    }

    #[test]
    fn no_cycle() {
        assert_eq!((0, 0), detect_cycles(&[1, 2, 3, 4, 5]));
        // The second occurrence of the window is not complete yet.
        assert_eq!((0, 0), detect_cycles(&[1, 2, 3, 1, 2]));
        assert_eq!((0, 0), detect_cycles::<u8>(&[]));
        assert_eq!((0, 0), detect_cycles(&[1]));
    }

    #[test]
    fn gcd() {
        assert_eq!(2, pair_gcd(4, 6));
        assert_eq!(1, pair_gcd(3, 5));
        assert_eq!(7, pair_gcd(0, 7));
        assert_eq!(2, list_gcd(&[4, 6]));
        assert_eq!(1, list_gcd(&[3, 5]));
        assert_eq!(3, list_gcd(&[12, 9, 6]));
        assert_eq!(5, list_gcd(&[5]));
        assert_eq!(0, list_gcd(&[]));
    }
}
