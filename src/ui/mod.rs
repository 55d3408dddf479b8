//! Embed, button, and select-menu construction for the roster card and the
//! selection flow steps.

pub mod buttons;
pub mod card;
pub mod style;
