//! String helpers
//!
//! Case-insensitive parsing of fieldless enums and whitespace detection.
//!
//! # Examples
//!
//! ```
//! use rulebook::named_variants;
//! use rulebook::string::StrExt;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Os {
//!     Linux,
//!     FreeBsd,
//! }
//!
//! named_variants!(Os { Linux, FreeBsd });
//!
//! assert_eq!("LINUX".parse_enum_ignore_case::<Os>(), Ok(Os::Linux));
//! assert_eq!("freebsd".parse_enum_ignore_case::<Os>(), Ok(Os::FreeBsd));
//! assert!("windows".parse_enum_ignore_case::<Os>().is_err());
//!
//! assert!("two words".contains_whitespace());
//! assert!(!"oneword".contains_whitespace());
//! ```

use crate::error::{require, InvalidArgument};

/// An enum whose variants can be looked up by name.
///
/// Usually implemented with [`named_variants!`](crate::named_variants).
pub trait NamedVariants: Sized + Copy + 'static {
    /// Every variant with its name, in declaration order.
    const VARIANTS: &'static [(&'static str, Self)];
}

/// Implement [`NamedVariants`] for a fieldless enum.
///
/// The variant names are used as written in the enum declaration.
///
/// # Example
///
/// ```rust
/// use rulebook::named_variants;
/// use rulebook::string::NamedVariants;
///
/// #[derive(Clone, Copy)]
/// enum Level {
///     Low,
///     High,
/// }
///
/// named_variants!(Level { Low, High });
///
/// assert_eq!(Level::VARIANTS.len(), 2);
/// assert_eq!(Level::VARIANTS[1].0, "High");
/// ```
#[macro_export]
macro_rules! named_variants {
    ($enum:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::string::NamedVariants for $enum {
            const VARIANTS: &'static [(&'static str, Self)] =
                &[$((stringify!($variant), $enum::$variant)),+];
        }
    };
}

/// Parse `value` into a variant of `T`, ignoring ASCII case.
///
/// Fails with [`InvalidArgument`] when no variant matches.
pub fn parse_enum_ignore_case<T: NamedVariants>(value: &str) -> Result<T, InvalidArgument> {
    T::VARIANTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, variant)| *variant)
        .ok_or_else(|| {
            InvalidArgument::new(
                "value",
                format!("{:?} does not match any variant", value),
            )
        })
}

/// Like [`parse_enum_ignore_case`], for text that may be absent.
pub fn parse_enum_checked<T: NamedVariants>(value: Option<&str>) -> Result<T, InvalidArgument> {
    parse_enum_ignore_case(require(value, "value")?)
}

/// Whether `value` contains any whitespace character (space, tab, newline,
/// or any other Unicode whitespace).
pub fn contains_whitespace(value: &str) -> bool {
    value.chars().any(char::is_whitespace)
}

/// Like [`contains_whitespace`], for text that may be absent.
pub fn contains_whitespace_checked(value: Option<&str>) -> Result<bool, InvalidArgument> {
    Ok(contains_whitespace(require(value, "value")?))
}

/// Extension methods on `str`.
pub trait StrExt {
    /// See [`parse_enum_ignore_case`].
    fn parse_enum_ignore_case<T: NamedVariants>(&self) -> Result<T, InvalidArgument>;

    /// See [`contains_whitespace`].
    fn contains_whitespace(&self) -> bool;
}

impl StrExt for str {
    #[inline]
    fn parse_enum_ignore_case<T: NamedVariants>(&self) -> Result<T, InvalidArgument> {
        parse_enum_ignore_case(self)
    }

    #[inline]
    fn contains_whitespace(&self) -> bool {
        contains_whitespace(self)
    }
}
