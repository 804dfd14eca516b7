//! Helper macro generating the typed error enums of the driven ports.
//!
//! Each variant carries named fields and a display template. The macro emits
//! a `thiserror` enum, one snake_case constructor per variant accepting
//! `impl Into<T>` for every field, and a `kind()` accessor naming the variant
//! for structured logs.

macro_rules! define_port_error {
    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
            )*

            /// Snake-case name of the failure variant, for log fields.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant { .. } => ::paste::paste! { stringify!([<$variant:snake>]) },
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors.
    define_port_error! {
        pub enum ExamplePortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Rejected { count: u32 } => "rejected {count} writes",
            CommandFailed { message: String, count: u32 } => "command failed: {message} ({count})",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::unreachable("timeout");
        assert_eq!(err.to_string(), "store unreachable: timeout");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExamplePortError::rejected(3_u32);
        assert_eq!(err.to_string(), "rejected 3 writes");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::command_failed("SET", 2_u32);
        assert_eq!(err.to_string(), "command failed: SET (2)");
    }

    #[test]
    fn kind_names_the_variant_in_snake_case() {
        assert_eq!(ExamplePortError::unreachable("x").kind(), "unreachable");
        assert_eq!(ExamplePortError::command_failed("x", 1_u32).kind(), "command_failed");
    }
}
