use log::debug;

use crate::{
    config::{MeasurementBias, REFERENCE_LIFESPAN_DAYS},
    uncertain::Uncertain,
};

/// Rescales a chronological age onto the reference lifespan
pub fn biological_age(chronological_age: Uncertain, lifespan: Uncertain) -> Uncertain {
    chronological_age * REFERENCE_LIFESPAN_DAYS / lifespan
}

/// Fold change between the biological ages of control and test samples of
/// the same chronological age
///
/// Lifespans carry a deviation relative to their value and each of the two
/// chronological ages an absolute deviation. All four measurements are
/// treated as independent.
pub fn lifespan_fold_change(
    ctrl_lifespan: f64,
    test_lifespan: f64,
    chronological_age: f64,
    bias: &MeasurementBias,
) -> Uncertain {
    let ctrl_lifespan = Uncertain::new(ctrl_lifespan, ctrl_lifespan * bias.lifespan);
    let test_lifespan = Uncertain::new(test_lifespan, test_lifespan * bias.lifespan);
    let ctrl_age = Uncertain::new(chronological_age, bias.age);
    let test_age = Uncertain::new(chronological_age, bias.age);

    let ctrl_bio = biological_age(ctrl_age, ctrl_lifespan);
    let test_bio = biological_age(test_age, test_lifespan);
    let fold_change = ctrl_bio / test_bio;
    debug!(
        "Biological age fold change {} (control {}, test {})",
        fold_change, ctrl_bio, test_bio
    );
    fold_change
}
