use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// InputValueError is used if some race option or vehicle parameter does not fulfill the posed
/// requirements, e.g., a negative fuel capacity or an empty list of participants.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueError {
    msg: String,
}

impl InputValueError {
    pub fn new(msg: impl Into<String>) -> InputValueError {
        InputValueError { msg: msg.into() }
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value: {}", self.msg)
    }
}

impl Error for InputValueError {}

/// argmax returns the index of the maximum value in the array x. If the maximum occurs more than
/// once, the index of its first occurrence is returned. Returns None for an empty array.
pub fn argmax<T: PartialOrd + Copy>(x: &[T]) -> Option<usize> {
    let mut vals = x.iter().enumerate();
    let (mut idx_max, &first) = vals.next()?;
    let mut val_max = first;

    for (i, &val) in vals {
        if val > val_max {
            val_max = val;
            idx_max = i;
        }
    }

    Some(idx_max)
}

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that would sort an array. The sort is stable, i.e. equal values
/// keep their original relative order in both sort orders. Incomparable values (NaN) are treated
/// as equal.
pub fn argsort<T: PartialOrd>(x: &[T], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    let cmp = |a: &T, b: &T| a.partial_cmp(b).unwrap_or(Ordering::Equal);
    match order {
        SortOrder::Ascending => indices.sort_by(|&a, &b| cmp(&x[a], &x[b])),
        SortOrder::Descending => indices.sort_by(|&a, &b| cmp(&x[b], &x[a])),
    }
    indices
}
