//! Static seed data bundled with the engine.

pub mod presets;
