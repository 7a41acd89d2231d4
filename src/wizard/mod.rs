pub mod details;
pub mod navigation;
pub mod state;

pub use details::{DetailsField, DetailsForm, ALL_DETAILS_FIELDS};
pub use navigation::{
    clamp_selection, hint_text, parse_scripted_keys, wizard_action_from_key, SCRIPT_KEYS_ENV,
};
pub use state::{
    Wizard, WizardAction, WizardEffect, WizardError, WizardStep, WizardTransition,
    RESULTS_PAGE_LINES, SEQUENCING_FAILED_MESSAGE, STEP_LABELS,
};
