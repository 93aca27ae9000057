/// Picks at most about `target` strictly increasing sample indices out of `n`,
/// always keeping the first and the last one. `None` keeps everything.
pub fn decimate(n: usize, target: Option<usize>) -> Vec<usize> {
    let target = match target {
        Some(t) if t < n && n > 2 => t,
        _ => return (0..n).collect(),
    };
    if target < 2 {
        // Both ends must survive even when the budget cannot hold them.
        return vec![0, n - 1];
    }

    let last = n - 1;
    let step = last as f64 / (target - 1) as f64;
    let mut out: Vec<usize> = Vec::with_capacity(target);

    for k in 0..target {
        let idx = ((k as f64 * step).round() as usize).min(last);
        if out.last() != Some(&idx) {
            out.push(idx);
        }
    }
    if out.last() != Some(&last) {
        out.push(last);
    }

    out
}
