//! [`Typed`], [`Mapped`] and [`Register`] implementations for scalars and
//! standard containers.
//!
//! [`Typed`]: crate::info::Typed
//! [`Register`]: crate::info::Register
//! [`Mapped`]: crate::Mapped

mod option;
mod scalars;
mod sequence;
