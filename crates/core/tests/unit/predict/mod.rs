
/// Most-frequent-successor predictor.
pub mod markov;
