/// inference with models trained elsewhere
pub mod predictor;
/// JSON description of a trained model
pub mod model_card;
