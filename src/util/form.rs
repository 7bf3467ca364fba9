//! Form-field extraction from `multipart/form-data` bodies.

use crate::base::HttpError;
use crate::body::{Body, ContentPart};
use crate::message::Entity;
use std::collections::HashMap;

/// Indexes the immediate child parts of a `multipart/form-data` body by
/// their form-field name.
///
/// Applies only when the content type is exactly `multipart/form-data` and
/// the body actually parsed as a multipart; anything else yields an empty
/// map without error. Parts whose `Content-Disposition` is not `form-data`
/// or that lack a `name` parameter are skipped. A name may repeat (multi-file
/// inputs), so every name maps to a list.
///
/// Nested multiparts are not supported and fail the whole extraction.
pub fn multipart_form_data<'a>(
    entity: Entity<'a>,
) -> Result<HashMap<String, Vec<&'a ContentPart>>, HttpError> {
    let mut fields: HashMap<String, Vec<&'a ContentPart>> = HashMap::new();

    let Some(body) = entity.body() else {
        return Ok(fields);
    };
    if body
        .headers()
        .content_type()
        .map(|t| !t.eq_ignore_ascii_case("multipart/form-data"))
        .unwrap_or(true)
    {
        return Ok(fields);
    }
    let Body::Multipart(multipart) = body else {
        return Ok(fields);
    };

    for child in multipart.parts() {
        let part = match child {
            Body::Content(part) => part,
            Body::Multipart(_) => {
                return Err(HttpError::UnsupportedStructure(
                    "nested multipart in form-data".to_string(),
                ))
            }
        };
        let Some(disposition) = part.headers().get("Content-Disposition") else {
            continue;
        };
        if !disposition.value().eq_ignore_ascii_case("form-data") {
            continue;
        }
        if let Some(name) = disposition.parameter("name") {
            fields.entry(name.to_string()).or_default().push(part);
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodySource, MultipartBody};
    use crate::header::{Header, HeaderMap};
    use crate::message::Request;

    fn form_part(disposition: &str, content: &'static str) -> Body {
        let mut headers = HeaderMap::new();
        headers.set(Header::parse("Content-Disposition", disposition));
        Body::Content(ContentPart::new(
            headers,
            BodySource::Buffer(bytes::Bytes::from_static(content.as_bytes())),
        ))
    }

    fn form_request(parts: Vec<Body>) -> Request {
        let mut multipart = MultipartBody::default();
        multipart
            .headers_mut()
            .set(Header::parse("Content-Type", "multipart/form-data; boundary=xyz"));
        for part in parts {
            multipart.push(part);
        }
        Request::new("POST", "/form", Body::Multipart(multipart))
    }

    #[test]
    fn test_fields_indexed_by_name() {
        let request = form_request(vec![
            form_part("form-data; name=\"user\"", "alice"),
            form_part("form-data; name=\"avatar\"; filename=\"a.png\"", "png.."),
        ]);
        let fields = multipart_form_data(Entity::from(&request)).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["user"].len(), 1);
        assert_eq!(fields["avatar"].len(), 1);
    }

    #[test]
    fn test_repeated_names_accumulate() {
        let request = form_request(vec![
            form_part("form-data; name=\"file\"; filename=\"a\"", "a"),
            form_part("form-data; name=\"file\"; filename=\"b\"", "b"),
        ]);
        let fields = multipart_form_data(Entity::from(&request)).unwrap();
        assert_eq!(fields["file"].len(), 2);
    }

    #[test]
    fn test_other_dispositions_skipped() {
        let request = form_request(vec![
            form_part("attachment; name=\"x\"", "x"),
            form_part("form-data", "anonymous"),
        ]);
        let fields = multipart_form_data(Entity::from(&request)).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_non_form_content_type_is_empty_map() {
        let mut body = Body::empty();
        body.headers_mut()
            .set(Header::new("Content-Type", "application/json"));
        let request = Request::new("POST", "/api", body);
        assert!(multipart_form_data(Entity::from(&request)).unwrap().is_empty());

        let bodiless = Request::bodiless("GET", "/");
        assert!(multipart_form_data(Entity::from(&bodiless)).unwrap().is_empty());
    }

    #[test]
    fn test_nested_multipart_fails() {
        let mut nested = MultipartBody::default();
        nested
            .headers_mut()
            .set(Header::parse("Content-Disposition", "form-data; name=\"inner\""));
        let request = form_request(vec![Body::Multipart(nested)]);
        let err = multipart_form_data(Entity::from(&request)).unwrap_err();
        assert!(matches!(err, HttpError::UnsupportedStructure(_)));
    }
}
