pub mod grid_composer;
pub mod sprite_sheet;

pub use grid_composer::{
    compose, list_sources, save_png, ComposedSheet, GridComposer, GridLayout, SourceImage,
};
pub use sprite_sheet::SpriteSheet;
