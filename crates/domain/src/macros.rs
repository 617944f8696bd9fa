//! Macro for string-tagged enums
//!
//! Closed vocabularies (symptoms, roles) are stored as plain string tags in
//! the document store. This macro gives such an enum a single mapping between
//! variants and tags, and derives `as_str`, `ALL`, `Display` and `FromStr`
//! from it.
//!
//! # Example
//!
//! ```rust
//! use doctorfinder_domain::impl_domain_tag_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Weekday {
//!     Monday,
//!     Tuesday,
//! }
//!
//! impl_domain_tag_conversions!(Weekday {
//!     Monday => "monday",
//!     Tuesday => "tuesday",
//! });
//!
//! assert_eq!(Weekday::ALL.len(), 2);
//! assert_eq!("TUESDAY".parse::<Weekday>().unwrap(), Weekday::Tuesday);
//! ```

/// Implements tag conversions for a fieldless enum.
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $tag` - Mapping of enum variants to their lowercase tags, in
///   the order they should appear in `ALL`
///
/// Parsing is case-insensitive; output is always the canonical tag.
#[macro_export]
macro_rules! impl_domain_tag_conversions {
    ($enum_name:ident { $($variant:ident => $tag:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in vocabulary order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical string tag.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shift {
        Morning,
        LateNight,
    }

    impl_domain_tag_conversions!(Shift {
        Morning => "morning",
        LateNight => "late-night",
    });

    #[test]
    fn all_preserves_declaration_order() {
        assert_eq!(Shift::ALL, &[Shift::Morning, Shift::LateNight]);
    }

    #[test]
    fn display_uses_tag() {
        assert_eq!(Shift::LateNight.to_string(), "late-night");
        assert_eq!(Shift::Morning.as_str(), "morning");
    }

    #[test]
    fn parse_ignores_case_and_padding() {
        assert_eq!(Shift::from_str(" Late-Night ").unwrap(), Shift::LateNight);
        assert_eq!(Shift::from_str("MORNING").unwrap(), Shift::Morning);
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        let err = Shift::from_str("evening").unwrap_err();
        assert!(err.contains("Invalid Shift: evening"));
        assert!(Shift::from_str("").is_err());
    }
}
