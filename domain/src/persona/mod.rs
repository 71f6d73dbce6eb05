//! Director personas drafted from a free-text character prompt.

pub mod profile;

pub use profile::{PersonaParse, PersonaProfile, parse_persona};
