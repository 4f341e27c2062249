//! k-element subsets of an ordered sequence.
//!
//! Subsets keep the relative order of the input and are produced in
//! lexicographic order of the chosen indices, right-most index varying
//! fastest. Best-hand search relies on this order being reproducible.

/// Upper bound on the up-front allocation; larger results grow as they go.
const PREALLOC_LIMIT: u64 = 1 << 16;

/// All `k`-element subsets of `items`. Empty when `k == 0` or `k > items.len()`.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(binomial(n, k).min(PREALLOC_LIMIT) as usize);
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| items[i].clone()).collect());

        // right-most index that can still move
        let mut i = k;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if idx[i] < n - k + i {
                break;
            }
        }
        idx[i] += 1;
        for j in (i + 1)..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// C(n, k). Saturates at `u64::MAX` instead of overflowing.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut acc: u64 = 1;
    for i in 0..k {
        // acc * (n - i) / (i + 1) stays exact at every step
        acc = match acc.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u64::MAX,
        };
    }
    acc
}
