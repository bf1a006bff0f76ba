//! Emptiness and length of field values.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Whether a value counts as "not provided".
///
/// Empty strings and collections, zero numbers, `false` and `None` are blank.
/// `Some(v)` and `Box<v>` are blank when `v` is.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

impl Blank for char {
    fn is_blank(&self) -> bool {
        *self == '\0'
    }
}

macro_rules! impl_blank_for_numbers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Blank for $ty {
                fn is_blank(&self) -> bool {
                    *self == (0 as $ty)
                }
            }
        )*
    };
}

impl_blank_for_numbers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Blank for [T; N] {
    fn is_blank(&self) -> bool {
        N == 0
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Blank for HashMap<K, V, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Blank for HashSet<T, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for BTreeSet<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

impl<T: Blank + ?Sized> Blank for Box<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

/// Length of a value, as checked by [`length`](crate::length) and
/// [`rune_length`](crate::rune_length).
///
/// `None` means there is no value at all (an empty `Option`).
pub trait HasLength {
    /// Length in bytes for strings, in elements for collections.
    fn length(&self) -> Option<usize>;

    /// Length in characters for strings; the same as [`HasLength::length`]
    /// for collections.
    fn rune_length(&self) -> Option<usize> {
        self.length()
    }
}

impl HasLength for str {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }

    fn rune_length(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl HasLength for String {
    fn length(&self) -> Option<usize> {
        self.as_str().length()
    }

    fn rune_length(&self) -> Option<usize> {
        self.as_str().rune_length()
    }
}

impl<T> HasLength for [T] {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> HasLength for Vec<T> {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<K, V, S> HasLength for HashMap<K, V, S> {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<K, V> HasLength for BTreeMap<K, V> {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: HasLength> HasLength for Option<T> {
    fn length(&self) -> Option<usize> {
        self.as_ref().and_then(HasLength::length)
    }

    fn rune_length(&self) -> Option<usize> {
        self.as_ref().and_then(HasLength::rune_length)
    }
}

impl<T: HasLength + ?Sized> HasLength for Box<T> {
    fn length(&self) -> Option<usize> {
        (**self).length()
    }

    fn rune_length(&self) -> Option<usize> {
        (**self).rune_length()
    }
}
