//! `dynamic_record!` declares a host record type.
//!
//! Fields become native members. Discovery follows the form used:
//! `struct Name { .. }` reflects the fields as declared attributes, while
//! `struct Name annotations { .. }` reads `@property` tags from the doc
//! comment and keeps the fields as undeclared native members.

#[macro_export]
macro_rules! dynamic_record {
    ($(#[doc = $doc:literal])* $vis:vis struct $name:ident annotations { $($field:ident : $field_ty:ty),* $(,)? }) => {
        $crate::dynamic_record!(
            @impl
            [$(#[doc = $doc])*]
            $vis
            $name;
            $crate::schema::Discovery::Annotations(concat!($($doc, "\n"),*));
            $($field : $field_ty),*
        );
    };
    ($(#[doc = $doc:literal])* $vis:vis struct $name:ident { $($field:ident : $field_ty:ty),* $(,)? }) => {
        $crate::dynamic_record!(
            @impl
            [$(#[doc = $doc])*]
            $vis
            $name;
            $crate::schema::Discovery::Members(Self::NATIVE_MEMBERS);
            $($field : $field_ty),*
        );
    };
    (@impl [$($meta:tt)*] $vis:vis $name:ident; $discovery:expr; $($field:ident : $field_ty:ty),*) => {
        $($meta)*
        #[derive(Debug, Clone, Default)]
        $vis struct $name {
            $( pub $field: $field_ty, )*
        }

        impl $name {
            /// Native member names, in declaration order.
            pub const NATIVE_MEMBERS: &'static [&'static str] = &[$(stringify!($field)),*];
        }

        impl $crate::host::HostRecord for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn discovery() -> $crate::schema::Discovery {
                $discovery
            }

            fn has_native(&self, name: &str) -> bool {
                Self::NATIVE_MEMBERS.contains(&name)
            }

            fn get_native(&self, name: &str) -> $crate::core::Result<$crate::core::Value> {
                match name {
                    $(
                        stringify!($field) => Ok($crate::core::AttributeValue::into_value(
                            ::std::clone::Clone::clone(&self.$field),
                        )),
                    )*
                    _ => Err($crate::core::RecordError::undefined(Self::TYPE_NAME, name)),
                }
            }

            #[allow(unused_variables)]
            fn set_native(&mut self, name: &str, value: $crate::core::Value) -> $crate::core::Result<()> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = $crate::core::AttributeValue::from_value(value)?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::core::RecordError::undefined(Self::TYPE_NAME, name)),
                }
            }

            fn unset_native(&mut self, name: &str) -> $crate::core::Result<()> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = ::std::default::Default::default();
                            Ok(())
                        }
                    )*
                    _ => Err($crate::core::RecordError::undefined(Self::TYPE_NAME, name)),
                }
            }
        }
    };
}
