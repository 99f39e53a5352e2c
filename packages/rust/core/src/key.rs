//! Key derivation.
//!
//! A [`KeyFn`] maps an item to its grouping key at a given level. Level 0
//! is the least specific grouping; each deeper level should be at least as
//! specific as the one before it, though this is not checked.

use std::convert::Infallible;
use std::fmt::{self, Display};
use std::marker::PhantomData;

/// Derives the grouping key for an item at a given level.
pub trait KeyFn<T: ?Sized> {
    /// Key type; buckets are ordered by it.
    type Key: Ord;
    /// Error raised by the derivation, handed back unchanged by `generate`.
    type Error;

    /// Key of `item` at `level`.
    fn key(&self, level: usize, item: &T) -> Result<Self::Key, Self::Error>;
}

impl<T: ?Sized, F: KeyFn<T> + ?Sized> KeyFn<T> for &F {
    type Key = F::Key;
    type Error = F::Error;

    fn key(&self, level: usize, item: &T) -> Result<Self::Key, Self::Error> {
        (**self).key(level, item)
    }
}

// ---------------------------------------------------------------------------
// PrefixKey
// ---------------------------------------------------------------------------

/// Default key: the item's string form truncated to `level` characters.
///
/// Truncation counts Unicode scalar values, so multi-byte characters are
/// never cut in half. Level 0 always yields the empty key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefixKey;

impl<T: Display + ?Sized> KeyFn<T> for PrefixKey {
    type Key = String;
    type Error = Infallible;

    fn key(&self, level: usize, item: &T) -> Result<String, Infallible> {
        Ok(truncate_chars(&item.to_string(), level))
    }
}

/// First `n` characters of `s`, or all of it if shorter.
pub fn truncate_chars(s: &str, n: usize) -> String {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

// ---------------------------------------------------------------------------
// FromFn
// ---------------------------------------------------------------------------

/// Key function backed by a closure. Built with [`from_fn`].
pub struct FromFn<F, K, E> {
    f: F,
    _marker: PhantomData<fn() -> (K, E)>,
}

/// Use a closure `Fn(level, &item) -> Result<key, error>` as a key function.
///
/// ```
/// use drilldown_core::key::{KeyFn, from_fn};
///
/// let by_len = from_fn(|level: usize, word: &&str| {
///     Ok::<_, std::convert::Infallible>(word.len().min(level))
/// });
/// assert_eq!(by_len.key(2, &"hello").ok(), Some(2));
/// ```
pub fn from_fn<F, K, E>(f: F) -> FromFn<F, K, E> {
    FromFn {
        f,
        _marker: PhantomData,
    }
}

impl<T: ?Sized, F, K, E> KeyFn<T> for FromFn<F, K, E>
where
    F: Fn(usize, &T) -> Result<K, E>,
    K: Ord,
{
    type Key = K;
    type Error = E;

    fn key(&self, level: usize, item: &T) -> Result<K, E> {
        (self.f)(level, item)
    }
}

impl<F: Clone, K, E> Clone for FromFn<F, K, E> {
    fn clone(&self) -> Self {
        from_fn(self.f.clone())
    }
}

impl<F, K, E> fmt::Debug for FromFn<F, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}
