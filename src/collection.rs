//! Collection helpers
//!
//! Chunking of slices and structural equality for sequences and maps that may
//! be absent.
//!
//! # Examples
//!
//! ```
//! use rulebook::collection::{list_eq, split};
//!
//! let chunks = split(&[1, 2, 3, 4, 5], 2).unwrap();
//! assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
//!
//! assert!(list_eq::<i32>(None, None));
//! assert!(!list_eq(Some(&[1, 2][..]), None));
//! ```

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::error::{require, InvalidArgument};

/// Split `items` into consecutive chunks of `chunk_size` elements.
///
/// The last chunk holds the remainder and may be shorter. An empty slice
/// yields no chunk. A chunk size of zero fails with [`InvalidArgument`].
///
/// # Examples
///
/// ```
/// use rulebook::collection::split;
///
/// assert_eq!(split(&["a", "b"], 2).unwrap(), vec![vec!["a", "b"]]);
/// assert!(split::<u8>(&[], 42).unwrap().is_empty());
/// assert!(split(&[1], 0).is_err());
/// ```
pub fn split<T: Clone>(items: &[T], chunk_size: usize) -> Result<Vec<Vec<T>>, InvalidArgument> {
    if chunk_size == 0 {
        return Err(InvalidArgument::new(
            "chunk_size",
            "must be greater than zero",
        ));
    }
    Ok(items.chunks(chunk_size).map(<[T]>::to_vec).collect())
}

/// Like [`split`], for a slice that may be absent.
///
/// The slice is checked before the chunk size.
pub fn split_checked<T: Clone>(
    items: Option<&[T]>,
    chunk_size: usize,
) -> Result<Vec<Vec<T>>, InvalidArgument> {
    split(require(items, "collection")?, chunk_size)
}

/// Order-sensitive equality of two sequences that may be absent.
///
/// Two absent sequences are equal; an absent and a present one are not.
///
/// # Examples
///
/// ```
/// use rulebook::collection::list_eq;
///
/// let abc = ["a", "b", "c"];
/// assert!(list_eq(Some(&abc[..]), Some(&["a", "b", "c"][..])));
/// assert!(!list_eq(Some(&abc[..]), Some(&["b", "a", "c"][..])));
/// assert!(!list_eq(Some(&abc[..]), Some(&["a", "b"][..])));
/// ```
pub fn list_eq<T: PartialEq>(list: Option<&[T]>, other: Option<&[T]>) -> bool {
    match (list, other) {
        (None, None) => true,
        (Some(list), Some(other)) => list.len() == other.len() && list == other,
        _ => false,
    }
}

/// Equality of two maps that may be absent, by key/value membership.
///
/// Iteration order does not matter. Two absent maps are equal; an absent and a
/// present one are not.
///
/// # Examples
///
/// ```
/// use rulebook::collection::map_eq;
/// use std::collections::HashMap;
///
/// let a = HashMap::from([("linux", "good"), ("windows", "ugly")]);
/// let b = HashMap::from([("windows", "ugly"), ("linux", "good")]);
/// let c = HashMap::from([("linux", "good"), ("windows", "awful")]);
///
/// assert!(map_eq(Some(&a), Some(&b)));
/// assert!(!map_eq(Some(&a), Some(&c)));
/// assert!(!map_eq(Some(&a), None));
/// ```
pub fn map_eq<K, V, S>(
    map: Option<&HashMap<K, V, S>>,
    other: Option<&HashMap<K, V, S>>,
) -> bool
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    match (map, other) {
        (None, None) => true,
        (Some(map), Some(other)) => {
            map.len() == other.len()
                && map
                    .iter()
                    .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
        }
        _ => false,
    }
}
