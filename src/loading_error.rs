use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadingError {
    #[error("{0} is not a valid weight.")]
    InvalidWeight(f64),
    #[error("Plates must weigh more than nothing.")]
    ZeroPlateWeight,
    #[error("Cannot read weight from \"{0}\".")]
    InvalidWeightText(String),
    #[error("Cannot read plate from \"{0}\", expected <weight>x<pairs>[:<tag>].")]
    InvalidPlate(String),
}
