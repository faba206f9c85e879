//! Declarative macros generating the introspection impls for user types.

/// Implements [`Typed`], [`Mapped`] and [`Register`] for a mutable,
/// default-constructible type, populated field by field.
///
/// Each listed field may carry an `as "name"` clause to rename it on the
/// wire, in both directions.
///
/// [`Typed`]: crate::info::Typed
/// [`Register`]: crate::info::Register
/// [`Mapped`]: crate::Mapped
///
/// # Examples
///
/// ```
/// use objmap_reflect::reflect_bean;
///
/// #[derive(Default)]
/// struct Account {
///     owner: String,
///     id: i64,
/// }
///
/// reflect_bean!(Account {
///     owner: String,
///     id as "account-id": i64,
/// });
/// ```
#[macro_export]
macro_rules! reflect_bean {
    ($ty:path { $($field:ident $(as $wire:literal)? : $fty:ty),* $(,)? }) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::cell::NonGenericInfoCell =
                    $crate::cell::NonGenericInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Bean($crate::info::BeanInfo::new::<$ty>(
                        || ::std::boxed::Box::new(<$ty as ::core::default::Default>::default()),
                        &[$(
                            $crate::info::BeanField::new::<$fty>(
                                ::core::stringify!($field),
                                $crate::__wire_name!($($wire)?),
                                <$fty as $crate::info::Typed>::type_info,
                                |any, value| {
                                    // The builder constructed this instance;
                                    // the downcast cannot fail.
                                    let bean = any.downcast_mut::<$ty>().unwrap();
                                    bean.$field = <$fty as $crate::Mapped>::from_value(value)?;
                                    ::core::result::Result::Ok(())
                                },
                                |any| {
                                    let bean = any.downcast_ref::<$ty>().unwrap();
                                    $crate::Mapped::value_ref(&bean.$field)
                                },
                            ),
                        )*],
                    ))
                })
            }
        }

        $crate::__impl_composite_mapped!($ty);

        impl $crate::info::Register for $ty {
            fn register_dependencies(registry: &mut $crate::registry::TypeRegistry) {
                $(registry.register::<$fty>();)*
            }
        }
    };
}

/// Implements [`Typed`], [`Mapped`] and [`Register`] for an immutable type
/// built in one shot from all of its components.
///
/// Component values may arrive in any wire order; construction happens when
/// the enclosing value ends. A missing non-optional component fails with
/// [`ValueError::MissingComponent`](crate::ValueError::MissingComponent).
///
/// [`Typed`]: crate::info::Typed
/// [`Register`]: crate::info::Register
/// [`Mapped`]: crate::Mapped
///
/// # Examples
///
/// ```
/// use objmap_reflect::reflect_record;
///
/// struct Span {
///     start: u32,
///     end: u32,
///     label: Option<String>,
/// }
///
/// reflect_record!(Span {
///     start: u32,
///     end: u32,
///     label: Option<String>,
/// });
/// ```
#[macro_export]
macro_rules! reflect_record {
    // `ident`, not `path`: the constructor expands to a struct literal, and
    // a `path` fragment cannot head one.
    ($ty:ident { $($field:ident $(as $wire:literal)? : $fty:ty),* $(,)? }) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::cell::NonGenericInfoCell =
                    $crate::cell::NonGenericInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Record($crate::info::RecordInfo::new::<$ty>(
                        |slots| {
                            let mut __index = 0_usize;
                            let record = $ty {$(
                                $field: {
                                    let slot = slots[__index].take();
                                    __index += 1;
                                    match slot {
                                        ::core::option::Option::Some(value) => {
                                            <$fty as $crate::Mapped>::from_value(value)?
                                        }
                                        // An absent component is accepted only
                                        // if the type tolerates null.
                                        ::core::option::Option::None => {
                                            match <$fty as $crate::Mapped>::from_value(
                                                $crate::Value::Null,
                                            ) {
                                                ::core::result::Result::Ok(value) => value,
                                                ::core::result::Result::Err(_) => {
                                                    return ::core::result::Result::Err(
                                                        $crate::ValueError::MissingComponent {
                                                            component: ::core::stringify!($field),
                                                            type_path:
                                                                ::core::any::type_name::<$ty>(),
                                                        },
                                                    );
                                                }
                                            }
                                        }
                                    }
                                },
                            )*};
                            let _ = __index;
                            ::core::result::Result::Ok(::std::boxed::Box::new(record))
                        },
                        &[$(
                            $crate::info::RecordComponent::new::<$fty>(
                                ::core::stringify!($field),
                                $crate::__wire_name!($($wire)?),
                                <$fty as $crate::info::Typed>::type_info,
                                |any| {
                                    // Writers only pass instances of `$ty`;
                                    // the downcast cannot fail.
                                    let record = any.downcast_ref::<$ty>().unwrap();
                                    $crate::Mapped::value_ref(&record.$field)
                                },
                            ),
                        )*],
                    ))
                })
            }
        }

        $crate::__impl_composite_mapped!($ty);

        impl $crate::info::Register for $ty {
            fn register_dependencies(registry: &mut $crate::registry::TypeRegistry) {
                $(registry.register::<$fty>();)*
            }
        }
    };
}

/// `Mapped` for a composite: travels boxed on the read path, borrows as
/// [`ValueRef::Composite`](crate::ValueRef::Composite) on the write path.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_composite_mapped {
    ($ty:path) => {
        impl $crate::Mapped for $ty {
            fn from_value(
                value: $crate::Value,
            ) -> ::core::result::Result<Self, $crate::ValueError> {
                match value {
                    $crate::Value::Boxed(boxed) => match boxed.downcast::<Self>() {
                        ::core::result::Result::Ok(composite) => {
                            ::core::result::Result::Ok(*composite)
                        }
                        ::core::result::Result::Err(_) => {
                            ::core::result::Result::Err($crate::ValueError::Mismatched {
                                expected: ::core::any::type_name::<Self>(),
                                found: "composite",
                            })
                        }
                    },
                    other => ::core::result::Result::Err($crate::ValueError::Mismatched {
                        expected: ::core::any::type_name::<Self>(),
                        found: other.kind_name(),
                    }),
                }
            }

            fn value_ref(&self) -> $crate::ValueRef<'_> {
                $crate::ValueRef::Composite {
                    value: self,
                    info: <Self as $crate::info::Typed>::type_info(),
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_name {
    () => {
        ::core::option::Option::None
    };
    ($wire:literal) => {
        ::core::option::Option::Some($wire)
    };
}
