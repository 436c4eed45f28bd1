use nalgebra::SVector;

pub fn svector_to_array<const N: usize>(v: SVector<f64, N>) -> [f64; N] {
    v.into()
}

/// Formats @v as a flat row, e.g. `[1, 2.5]`.
pub fn vector_to_string<const N: usize>(v: &SVector<f64, N>) -> String {
    let coords: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    format!("[{}]", coords.join(", "))
}

/// Index of the smallest value yielded by @candidates, as (index, value) pairs.
/// Among equal values the lowest index wins, regardless of yield order.
/// NaN values are never selected.
pub fn argmin_by_index<I>(candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, d) in candidates {
        if d.is_nan() {
            continue;
        }
        best = match best {
            Some((bi, bd)) if bd < d || (bd == d && bi < i) => Some((bi, bd)),
            _ => Some((i, d)),
        };
    }
    best
}

#[cfg(test)]
mod argmin_tests {
    use super::*;

    #[test]
    fn picks_smallest() {
        let best = argmin_by_index(vec![(0, 3.0), (1, 1.0), (2, 2.0)]);

        assert_eq!(best, Some((1, 1.0)));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let best = argmin_by_index(vec![(4, 1.0), (2, 1.0), (7, 1.0)]);

        assert_eq!(best, Some((2, 1.0)));
    }

    #[test]
    fn skips_nan() {
        let best = argmin_by_index(vec![(0, f64::NAN), (1, 5.0)]);

        assert_eq!(best, Some((1, 5.0)));
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(argmin_by_index(Vec::new()), None);
    }
}
