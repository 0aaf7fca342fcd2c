use crate::bar::Bar;
use crate::inventory::Inventory;
use crate::loading::compute_loading as compute;
use crate::loading_error::LoadingError;
use crate::loading_result::{LoadedPlate, LoadingResult};
use crate::plate::PlateType;
use crate::weight::Weight;

#[swift_bridge::bridge]
mod ffi {
    extern "Rust" {
        type PlateType;
        type Inventory;
        type LoadingResult;
        type LoadedPlate;
        type LoadingError;

        fn plate_type(weight: f64, pairs: u32, tag: String) -> Result<PlateType, LoadingError>;
        fn inventory(plates: Vec<PlateType>) -> Inventory;
        fn compute_loading(
            total: f64,
            bar: f64,
            inventory: &Inventory,
        ) -> Result<LoadingResult, LoadingError>;

        fn target_value(self: &LoadingResult) -> f64;
        fn bar_value(self: &LoadingResult) -> f64;
        fn achieved_value(self: &LoadingResult) -> f64;
        fn deficit_value(self: &LoadingResult) -> f64;
        fn is_exhaustive(self: &LoadingResult) -> bool;
        fn plates_owned(self: LoadingResult) -> Vec<LoadedPlate>;

        fn weight_value(self: &LoadedPlate) -> f64;
        fn tag_value(self: &LoadedPlate) -> String;

        fn message(self: &LoadingError) -> String;
    }
}

fn plate_type(weight: f64, pairs: u32, tag: String) -> Result<PlateType, LoadingError> {
    let tag = (!tag.is_empty()).then_some(tag);
    PlateType::new(Weight::try_from_f64(weight)?, pairs, tag)
}

fn inventory(plates: Vec<PlateType>) -> Inventory {
    Inventory::new(plates)
}

fn compute_loading(
    total: f64,
    bar: f64,
    inventory: &Inventory,
) -> Result<LoadingResult, LoadingError> {
    let total = Weight::try_from_f64(total)?;
    let bar = Bar::new(Weight::try_from_f64(bar)?);
    Ok(compute(total, &bar, inventory))
}

impl LoadingResult {
    fn target_value(&self) -> f64 {
        self.target().as_f64()
    }

    fn bar_value(&self) -> f64 {
        self.bar().as_f64()
    }

    fn achieved_value(&self) -> f64 {
        self.achieved().as_f64()
    }

    fn deficit_value(&self) -> f64 {
        self.deficit().as_f64()
    }

    fn plates_owned(self) -> Vec<LoadedPlate> {
        self.into_plates()
    }
}

impl LoadedPlate {
    fn weight_value(&self) -> f64 {
        self.weight().as_f64()
    }

    fn tag_value(&self) -> String {
        self.tag().unwrap_or_default().to_string()
    }
}

impl LoadingError {
    fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_through_the_bridge() {
        let plates = vec![
            plate_type(20.0, 10, "#0000ff".to_string()).unwrap(),
            plate_type(1.25, 10, String::new()).unwrap(),
        ];
        let result = compute_loading(62.5, 20.0, &inventory(plates)).unwrap();

        assert!((result.achieved_value() - 21.25).abs() < f64::EPSILON);
        assert!(result.deficit_value().abs() < f64::EPSILON);
        assert!((result.bar_value() - 20.0).abs() < f64::EPSILON);
        assert!(result.is_exhaustive());

        let plates = result.plates_owned();
        assert_eq!(plates.len(), 2);
        assert_eq!(plates[0].tag_value(), "#0000ff");
        assert_eq!(plates[1].tag_value(), "");
    }

    #[test]
    fn rejects_invalid_numbers() {
        let error = compute_loading(f64::NAN, 20.0, &inventory(vec![])).unwrap_err();
        assert!(matches!(error, LoadingError::InvalidWeight(value) if value.is_nan()));
        assert!(plate_type(0.0, 1, String::new()).is_err());
    }
}
