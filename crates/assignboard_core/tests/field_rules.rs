use assignboard_core::{CountryCatalog, FieldValidator, FormField, FormRecord};
use std::sync::Arc;

fn validator() -> FieldValidator {
    FieldValidator::new(Arc::new(CountryCatalog::builtin()))
}

fn check(field: FormField, value: &str) -> String {
    validator().validate(field, value, &FormRecord::default())
}

#[test]
fn password_with_any_whitespace_is_rejected() {
    for value in [
        "Abcdefghij1! ",
        " Abcdefghij1!",
        "Abcde fghij1!",
        "Abcde\tfghij1!",
        "Abcde\nfghij1!",
        "Abc\u{00a0}defghij1!",
        " ",
    ] {
        assert_eq!(
            check(FormField::Password, value),
            "Password cannot contain spaces.",
            "value {value:?}"
        );
    }
}

#[test]
fn pan_is_uppercased_before_matching() {
    assert_eq!(check(FormField::PanNo, "abcde1234f"), "");
    assert_eq!(check(FormField::PanNo, "ABCDE1234F"), "");
    assert_eq!(
        check(FormField::PanNo, "ABCDE12345"),
        "Invalid PAN format (e.g., ABCDE1234F)."
    );
    assert_eq!(check(FormField::PanNo, ""), "PAN Number is required.");
}

#[test]
fn aadhar_must_not_start_with_zero_or_one() {
    assert_eq!(
        check(FormField::AadharNo, "123456789012"),
        "Aadhar must be 12 digits and not start with 0 or 1."
    );
    assert_eq!(check(FormField::AadharNo, "234567890123"), "");
    assert_eq!(
        check(FormField::AadharNo, "23456789012"),
        "Aadhar must be 12 digits and not start with 0 or 1."
    );
}

#[test]
fn phone_number_needs_ten_digits_starting_six_to_nine() {
    assert_eq!(check(FormField::PhoneNumber, "9876543210"), "");
    assert_eq!(check(FormField::PhoneNumber, " 9876543210 "), "");
    assert_eq!(
        check(FormField::PhoneNumber, "5876543210"),
        "Phone Number must be 10 digits and start with 6, 7, 8, or 9."
    );
    assert_eq!(check(FormField::PhoneNumber, ""), "Phone Number is required.");
}

#[test]
fn names_compare_raw_value_to_trimmed() {
    assert_eq!(check(FormField::FirstName, "Sarah"), "");
    assert_eq!(
        check(FormField::LastName, "Connor "),
        "No leading/trailing spaces allowed."
    );
    assert_eq!(
        check(FormField::FirstName, "Sar4h"),
        "First Name must contain only alphabetic letters."
    );
}

#[test]
fn city_depends_on_country() {
    let validator = validator();
    let mut form = FormRecord::default();

    assert_eq!(
        validator.validate(FormField::City, "Mumbai", &form),
        "Select a country first."
    );

    form.country = "IN".to_string();
    assert_eq!(validator.validate(FormField::City, "", &form), "City is required.");
    assert_eq!(validator.validate(FormField::City, "Mumbai", &form), "");
    assert_eq!(
        validator.validate(FormField::City, "London", &form),
        "Select a valid city for the chosen country."
    );
}

#[test]
fn country_and_dial_code_rules() {
    assert_eq!(check(FormField::Country, ""), "Country is required.");
    assert_eq!(check(FormField::Country, "IN"), "");
    assert_eq!(check(FormField::PhoneCountryCode, ""), "");
}

#[test]
fn email_accepts_plain_addresses() {
    assert_eq!(check(FormField::Email, "sarah.connor@mail.example.co"), "");
    assert_eq!(check(FormField::Email, ""), "Email is required.");
    assert_eq!(check(FormField::Email, "sarah@"), "Invalid email format.");
    assert_eq!(
        check(FormField::Email, "sarah.@example.com"),
        "Invalid local part of email (dots)."
    );
    assert_eq!(
        check(FormField::Email, "sarah@example-.com"),
        "Invalid domain part of email."
    );
}
