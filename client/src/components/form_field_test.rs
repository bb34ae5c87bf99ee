use super::*;

#[test]
fn input_class_marks_invalid_fields() {
    assert_eq!(input_class(false), "auth-input");
    assert_eq!(input_class(true), "auth-input auth-input--invalid");
}
