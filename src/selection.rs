//! Worst-case linear-time order-statistic selection (median-of-medians).

const GROUP_SIZE: usize = 5;

/// Sorts a slice of at most [`GROUP_SIZE`] elements in place via insertion sort.
fn sort_small(buf: &mut [f64]) {
    for i in 1..buf.len() {
        let mut j = i;
        while j > 0 && buf[j - 1] > buf[j] {
            buf.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Three-way (Dutch national flag) partition of `buf` around `pivot`.
///
/// Returns `(lt, ge)`: `buf[..lt]` are strictly less than pivot, `buf[lt..ge]` equal the
/// pivot, `buf[ge..]` are strictly greater.
fn three_way_partition(buf: &mut [f64], pivot: f64) -> (usize, usize) {
    let mut lt = 0;
    let mut i = 0;
    let mut gt = buf.len();
    while i < gt {
        if buf[i] < pivot {
            buf.swap(lt, i);
            lt += 1;
            i += 1;
        } else if buf[i] > pivot {
            gt -= 1;
            buf.swap(i, gt);
        } else {
            i += 1;
        }
    }
    (lt, gt)
}

/// Computes the median-of-medians pivot for `buf`, rearranging `buf` in the process.
fn median_of_medians_pivot(buf: &mut [f64]) -> f64 {
    let n = buf.len();
    let n_groups = n / GROUP_SIZE;
    for g in 0..n_groups {
        let start = g * GROUP_SIZE;
        let group = &mut buf[start..start + GROUP_SIZE];
        sort_small(group);
        buf.swap(g, start + GROUP_SIZE / 2);
    }
    if n_groups == 0 {
        sort_small(buf);
        return buf[n / 2];
    }
    kth_smallest(&mut buf[..n_groups], n_groups / 2)
}

/// Returns the `k`-th smallest element (0-indexed) of `buf`, rearranging `buf` in place.
///
/// Runs in worst-case `O(buf.len())` via median-of-medians pivot selection.
pub fn kth_smallest(buf: &mut [f64], k: usize) -> f64 {
    debug_assert!(k < buf.len());
    if buf.len() <= GROUP_SIZE {
        sort_small(buf);
        return buf[k];
    }
    let pivot = median_of_medians_pivot(buf);
    let (lt, ge) = three_way_partition(buf, pivot);
    if k < lt {
        kth_smallest(&mut buf[..lt], k)
    } else if k < ge {
        pivot
    } else {
        kth_smallest(&mut buf[ge..], k - ge)
    }
}

/// Returns the median of `buf` (upper median for even lengths: `kth_smallest(buf, len/2)`),
/// rearranging `buf` in place.
pub fn median(buf: &mut [f64]) -> f64 {
    let k = buf.len() / 2;
    kth_smallest(buf, k)
}
