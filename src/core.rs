pub mod assembler;
pub mod blender;
pub mod calendar;
pub mod normalizer;
pub mod profile;
pub mod series;
pub mod size_class;
pub mod synthesizer;
