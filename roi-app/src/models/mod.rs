mod roi_form;

pub use roi_form::{FieldError, FormField, RoiForm};
