//! Bucket sizing policy.
//!
//! Bucket counts are always prime. The table below roughly doubles at each
//! step; requests beyond it fall back to a trial-division search. Both
//! functions are pure policy lookups with no process-wide state.

const PRIMES: &[usize] = &[
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293,
    353, 431, 521, 631, 761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371,
    4049, 4861, 5839, 7013, 8419, 10103, 12143, 14591, 17519, 21023, 25229,
    30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631, 130363, 156437,
    187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899,
    4166287, 4999559, 5999471, 7199369,
];

/// Smallest usable prime capacity that is at least `n`.
pub(crate) fn next_prime(n: usize) -> usize {
    for &prime in PRIMES {
        if prime >= n {
            return prime;
        }
    }

    // Past the table, probe odd candidates.
    let mut candidate = n | 1;
    loop {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 2;
    }
}

/// Capacity to grow to once an arena of `count` slots is full.
pub(crate) fn expand(count: usize) -> usize {
    next_prime(count.saturating_mul(2))
}

fn is_prime(candidate: usize) -> bool {
    if candidate < 2 {
        return false;
    }
    if candidate % 2 == 0 {
        return candidate == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= candidate {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
