/*!
# Top-k Partition

In-place partial ordering of an index array by a companion score slice. A
dual-pointer quickselect moves the `k` indices with the smallest scores into
the front of the array without fully sorting it. Expected O(s), worst-case
O(s²), no auxiliary allocation.
*/

/// Partially reorders `idx` so that the `k` indices with the smallest
/// `scores[idx[i]]` values occupy `idx[..k]`. Order within each partition
/// is unspecified.
///
/// Callers that want the `k` largest scores pass negated scores. `scores`
/// must cover every value stored in `idx`; comparisons on NaN scores are
/// unspecified.
pub fn partition_smallest(idx: &mut [u32], scores: &[f32], k: usize) {
    if k == 0 || k >= idx.len() {
        return;
    }
    let target = k as isize;
    let mut left: isize = 0;
    let mut right: isize = idx.len() as isize - 1;
    while left < right {
        let pivot = scores[idx[((left + right) / 2) as usize] as usize];
        let mut i = left;
        let mut j = right;
        while i <= j {
            while scores[idx[i as usize] as usize] < pivot {
                i += 1;
            }
            while scores[idx[j as usize] as usize] > pivot {
                j -= 1;
            }
            if i <= j {
                idx.swap(i as usize, j as usize);
                i += 1;
                j -= 1;
            }
        }
        // Recurse only into the side that still contains the k boundary.
        if target <= j {
            right = j;
        } else if target >= i {
            left = i;
        } else {
            break;
        }
    }
}
