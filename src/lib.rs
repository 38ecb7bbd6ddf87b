#[allow(non_snake_case)]
pub mod Dataset;
#[allow(non_snake_case)]
pub mod ML;
#[allow(non_snake_case)]
pub mod Reactions;
#[allow(non_snake_case)]
pub mod Thermodynamics;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
