//! Built-in card sets.

mod standard;

pub use standard::{
    standard_catalog, standard_rules, BOMBER, GUNNER, HEALER, KNIGHT, SOLDIER, SPOTTER,
};
