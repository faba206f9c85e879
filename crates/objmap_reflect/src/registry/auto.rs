// -----------------------------------------------------------------------------
// AutoRegistration

/// A registration submitted at link time through
/// [`auto_register!`](crate::auto_register).
///
/// Collected with `inventory`; [`TypeRegistry::auto_register`] drains the
/// collection into a registry.
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
#[cfg(feature = "auto_register")]
pub struct AutoRegistration {
    pub(crate) register: fn(&mut crate::registry::TypeRegistry),
}

#[cfg(feature = "auto_register")]
impl AutoRegistration {
    /// Create a new registration entry.
    pub const fn new(register: fn(&mut crate::registry::TypeRegistry)) -> Self {
        Self { register }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

/// Submits a type for link-time registration.
///
/// Every submitted type is added when [`TypeRegistry::auto_register`] runs,
/// regardless of which module or crate submitted it. With the
/// `auto_register` feature disabled this expands to nothing.
///
/// ```
/// use objmap_reflect::{auto_register, reflect_bean};
/// use objmap_reflect::registry::TypeRegistry;
///
/// #[derive(Default)]
/// struct Settings {
///     verbose: bool,
/// }
///
/// reflect_bean!(Settings { verbose: bool });
/// auto_register!(Settings);
///
/// let mut registry = TypeRegistry::new();
/// registry.auto_register();
/// assert!(registry.get_with_path(core::any::type_name::<Settings>()).is_some());
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {
        $crate::__private::inventory::submit! {
            $crate::registry::AutoRegistration::new(|registry| {
                registry.register::<$ty>();
            })
        }
    };
}

/// Submits a type for link-time registration.
///
/// The `auto_register` feature is disabled, so this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {};
}
