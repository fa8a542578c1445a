use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Checks whether both sets contain exactly the same elements.
///
/// # Arguments
///
/// * `a` - The first set
/// * `b` - The second set
///
/// # Returns
///
/// `true` when the sets are equal, regardless of insertion order
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use marginalia::utils::is_set_equal;
///
/// let a: HashSet<_> = [1, 2, 3].into_iter().collect();
/// let b: HashSet<_> = [3, 2, 1].into_iter().collect();
/// assert!(is_set_equal(&a, &b));
/// ```
pub fn is_set_equal<T, S1, S2>(a: &HashSet<T, S1>, b: &HashSet<T, S2>) -> bool
where
    T: Eq + Hash,
    S1: BuildHasher,
    S2: BuildHasher,
{
    a.len() == b.len() && a.iter().all(|item| b.contains(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[i32]) -> HashSet<i32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_is_set_equal() {
        assert!(is_set_equal(&set(&[1, 2, 3]), &set(&[3, 2, 1])));
        assert!(!is_set_equal(&set(&[1, 2]), &set(&[1, 2, 3])));
        assert!(!is_set_equal(&set(&[1, 2, 3]), &set(&[1, 2])));
        assert!(is_set_equal(&set(&[]), &set(&[])));
    }

    #[test]
    fn test_same_size_different_items() {
        assert!(!is_set_equal(&set(&[1, 2, 4]), &set(&[1, 2, 3])));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert!(is_set_equal(&set(&[1, 1, 2]), &set(&[2, 1])));
    }

    #[test]
    fn test_strings() {
        let a: HashSet<&str> = ["link", "bold"].into_iter().collect();
        let b: HashSet<&str> = ["bold", "link"].into_iter().collect();
        assert!(is_set_equal(&a, &b));
    }
}
