/// Implements [`std::fmt::Display`], `From<String>`, `From<Self> for String` and `as_str`
/// for a transparent string newtype.
macro_rules! impl_string_newtype {
    ($newtype: ty) => {
        impl std::fmt::Display for $newtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::convert::From<String> for $newtype {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::convert::From<&str> for $newtype {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl std::convert::From<$newtype> for String {
            fn from(value: $newtype) -> Self {
                value.0
            }
        }

        impl $newtype {
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}
pub(crate) use impl_string_newtype;
