pub mod override_evaluator;
pub mod override_models;
