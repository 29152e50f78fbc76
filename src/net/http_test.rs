use super::*;
use crate::net::api::FileAttachment;

fn scan(mime: &str) -> Part {
    Part::File {
        name: "file".into(),
        file: FileAttachment { file_name: "scan.png".into(), mime: mime.into(), bytes: vec![1, 2] },
    }
}

#[test]
fn bad_file_type_is_rejected_before_sending() {
    let err = multipart_form(vec![scan("not a mime")]).unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(ref message) if message.contains("not a mime")));
}

#[test]
fn valid_parts_build_a_form() {
    let parts = vec![Part::Text { name: "title".into(), value: "X-ray".into() }, scan("image/png")];
    assert!(multipart_form(parts).is_ok());
}

#[test]
fn url_joins_base_and_endpoint_path() {
    let transport = HttpTransport::new("http://localhost:5078/").unwrap();
    assert_eq!(transport.url(Endpoint::Doctors), "http://localhost:5078/api/doctors");
}
