use super::*;

const EMAIL: FieldSpec = FieldSpec::required("email", "Email Address", FieldKind::Email);
const PASSWORD: FieldSpec = FieldSpec::required("password", "Password", FieldKind::Password);
const DOCTOR: FieldSpec = FieldSpec::required("doctorId", "Doctor", FieldKind::Select);

fn doctor_options() -> Vec<SelectOption> {
    vec![
        SelectOption { value: "11".into(), label: "Dr. Grey - Surgery".into() },
        SelectOption { value: "12".into(), label: "Dr. Shepherd - Neurology".into() },
    ]
}

#[test]
fn client_only_keeps_everything_but_submission() {
    let confirm = FieldSpec::required("confirmPassword", "Confirm Password", FieldKind::Password).client_only();
    assert!(confirm.required);
    assert!(!confirm.submitted);
}

#[test]
fn field_value_blankness() {
    assert!(FieldValue::from("   ").is_blank());
    assert!(!FieldValue::from("a").is_blank());
    let file = FileAttachment { file_name: "scan.pdf".into(), mime: "application/pdf".into(), bytes: vec![1] };
    assert!(!FieldValue::from(file).is_blank());
}

#[test]
fn render_masks_passwords() {
    let input = FieldInput::new(&PASSWORD);
    assert_eq!(input.render(Some(&FieldValue::from("hunter2"))), "Password*: *******");
}

#[test]
fn render_shows_select_label_and_empty_values() {
    let options = doctor_options();
    let input = FieldInput::new(&DOCTOR).with_options(&options);
    assert_eq!(input.render(Some(&FieldValue::from("12"))), "Doctor*: Dr. Shepherd - Neurology");
    assert_eq!(input.render(None), "Doctor*: ");
}

#[test]
fn prompt_reports_raw_line_without_newline() {
    let input = FieldInput::new(&EMAIL);
    let mut reader = "a@b.com\r\n".as_bytes();
    let mut out = Vec::new();
    let mut seen = None;

    let more = input.prompt(&mut reader, &mut out, |raw| seen = Some(raw.to_owned())).unwrap();

    assert!(more);
    assert_eq!(seen.as_deref(), Some("a@b.com"));
    assert_eq!(String::from_utf8(out).unwrap(), "Email Address*: ");
}

#[test]
fn prompt_maps_option_number_to_value() {
    let options = doctor_options();
    let input = FieldInput::new(&DOCTOR).with_options(&options);
    let mut reader = "2\n".as_bytes();
    let mut out = Vec::new();
    let mut seen = None;

    input.prompt(&mut reader, &mut out, |raw| seen = Some(raw.to_owned())).unwrap();

    assert_eq!(seen.as_deref(), Some("12"));
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("[1] Dr. Grey - Surgery"));
}

#[test]
fn prompt_keeps_out_of_range_choice_raw() {
    let options = doctor_options();
    let input = FieldInput::new(&DOCTOR).with_options(&options);
    let mut reader = "9\n".as_bytes();
    let mut seen = None;

    input.prompt(&mut reader, &mut Vec::<u8>::new(), |raw| seen = Some(raw.to_owned())).unwrap();

    assert_eq!(seen.as_deref(), Some("9"));
}

#[test]
fn prompt_returns_false_at_eof_without_callback() {
    let input = FieldInput::new(&EMAIL);
    let mut reader = "".as_bytes();
    let mut called = false;

    let more = input.prompt(&mut reader, &mut Vec::<u8>::new(), |_| called = true).unwrap();

    assert!(!more);
    assert!(!called);
}
