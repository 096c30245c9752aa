use itertools::Itertools;

pub fn index_mask(needle: &str, haystack: &[String]) -> Vec<usize> {
    haystack
        .iter()
        .enumerate()
        .filter(|(_, target)| target.contains(needle))
        .map(|(i, _)| i)
        .collect()
}

pub fn select_indices<T: Clone>(indices: &[usize], data: &[T]) -> Vec<T> {
    indices.iter().map(|i| data[*i].clone()).collect()
}

/// Returns the first name that occurs more than once
pub fn first_duplicate(names: &[String]) -> Option<&String> {
    names.iter().duplicates().next()
}
