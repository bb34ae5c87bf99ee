use super::*;

#[test]
fn confirm_field_shown_only_for_signup() {
    for mode in [AuthMode::Login, AuthMode::Signup] {
        let config = config_for(mode);
        assert_eq!(config.show_confirm_field, mode == AuthMode::Signup);
        assert_eq!(config.has_field(FieldName::ConfirmPassword), config.show_confirm_field);
    }
}

#[test]
fn config_for_is_value_stable() {
    assert_eq!(config_for(AuthMode::Login), config_for(AuthMode::Login));
    assert_eq!(config_for(AuthMode::Signup), config_for(AuthMode::Signup));
    assert_ne!(config_for(AuthMode::Login), config_for(AuthMode::Signup));
}

#[test]
fn rulesets_follow_mode() {
    assert_eq!(config_for(AuthMode::Login).validation_ruleset, Ruleset::Login);
    assert_eq!(config_for(AuthMode::Signup).validation_ruleset, Ruleset::Signup);
}

#[test]
fn login_fields_are_email_then_password_with_forgot_link() {
    let config = config_for(AuthMode::Login);
    let names: Vec<_> = config.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec![FieldName::Email, FieldName::Password]);
    assert!(config.fields[1].show_forgot_password_link);
    assert_eq!(config.fields[0].placeholder, Some("m@example.com"));
}

#[test]
fn signup_has_no_forgot_link() {
    let config = config_for(AuthMode::Signup);
    assert!(config.fields.iter().all(|f| !f.show_forgot_password_link));
    assert_eq!(config.submit_label, "Sign up");
    assert_eq!(config.toggle_action_text, "Login");
}

#[test]
fn toggled_flips_between_modes() {
    assert_eq!(AuthMode::Login.toggled(), AuthMode::Signup);
    assert_eq!(AuthMode::Signup.toggled(), AuthMode::Login);
    assert_eq!(AuthMode::default(), AuthMode::Login);
}

#[test]
fn third_party_label_capitalizes_provider() {
    assert_eq!(config_for(AuthMode::Login).third_party_label("google"), "Login with Google");
    assert_eq!(config_for(AuthMode::Signup).third_party_label("github"), "Signup with Github");
}

#[test]
fn field_names_match_dom_ids() {
    assert_eq!(FieldName::Email.as_str(), "email");
    assert_eq!(FieldName::ConfirmPassword.as_str(), "confirmPassword");
    assert_eq!(InputKind::Password.as_str(), "password");
}
