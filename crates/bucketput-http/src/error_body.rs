//! S3 XML error body parsing.
//!
//! Non-200 responses usually carry a document of the form
//!
//! ```xml
//! <Error>
//!   <Code>NoSuchBucket</Code>
//!   <Message>The specified bucket does not exist</Message>
//!   <RequestId>4442587FB7D0A2F9</RequestId>
//! </Error>
//! ```
//!
//! Only the fields above are extracted. Anything that is not such a document
//! yields `None`.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;

/// Fields of an S3 error document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
    /// Request ID assigned by the service.
    pub request_id: Option<String>,
}

impl ErrorBody {
    /// Parse an error document.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketput_http::ErrorBody;
    ///
    /// let xml = b"<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";
    /// let body = ErrorBody::parse(xml).unwrap();
    /// assert_eq!(body.code.as_deref(), Some("AccessDenied"));
    /// assert_eq!(body.message.as_deref(), Some("Access Denied"));
    /// assert!(ErrorBody::parse(b"not xml at all").is_none());
    /// ```
    #[must_use]
    pub fn parse(xml: &[u8]) -> Option<Self> {
        // Text is not trimmed: entity references arrive as separate events
        // and the spaces around them belong to the value.
        let mut reader = Reader::from_reader(xml);

        let mut body = Self::default();
        let mut in_error = false;
        loop {
            match reader.read_event().ok()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"Error" => in_error = true,
                    b"Code" if in_error => body.code = Some(read_text_content(&mut reader)?),
                    b"Message" if in_error => {
                        body.message = Some(read_text_content(&mut reader)?);
                    }
                    b"RequestId" if in_error => {
                        body.request_id = Some(read_text_content(&mut reader)?);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        in_error.then_some(body)
    }
}

/// Read the text content of the current element and consume its end tag.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Option<String> {
    let mut text = String::new();
    loop {
        match reader.read_event().ok()? {
            Event::Text(e) => {
                text.push_str(&e.decode().ok()?);
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref().ok()? {
                    text.push(ch);
                } else {
                    let name = e.decode().ok()?;
                    match resolve_predefined_entity(&name) {
                        Some(resolved) => text.push_str(resolved),
                        None => {
                            text.push('&');
                            text.push_str(&name);
                            text.push(';');
                        }
                    }
                }
            }
            Event::End(_) => return Some(text),
            Event::Eof => return None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_full_error_document() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>NoSuchBucket</Code>
  <Message>The specified bucket does not exist</Message>
  <BucketName>ghost</BucketName>
  <RequestId>4442587FB7D0A2F9</RequestId>
</Error>"#;
        let body = ErrorBody::parse(xml).expect("parse");
        assert_eq!(
            body,
            ErrorBody {
                code: Some("NoSuchBucket".to_owned()),
                message: Some("The specified bucket does not exist".to_owned()),
                request_id: Some("4442587FB7D0A2F9".to_owned()),
            }
        );
    }

    #[test]
    fn test_should_resolve_entities_in_text() {
        let body = ErrorBody::parse(
            b"<Error><Code>X</Code><Message>Tom &amp; Jerry &lt;3 &quot;hi&quot; &#65;&#x42;</Message></Error>",
        )
        .expect("parse");
        assert_eq!(body.code.as_deref(), Some("X"));
        assert_eq!(body.message.as_deref(), Some("Tom & Jerry <3 \"hi\" AB"));
    }

    #[test]
    fn test_should_keep_unknown_entities_verbatim() {
        let body = ErrorBody::parse(b"<Error><Message>a &custom; b</Message></Error>").expect("parse");
        assert_eq!(body.message.as_deref(), Some("a &custom; b"));
    }

    #[test]
    fn test_should_tolerate_missing_fields() {
        let body = ErrorBody::parse(b"<Error><Code>SlowDown</Code></Error>").expect("parse");
        assert_eq!(body.code.as_deref(), Some("SlowDown"));
        assert!(body.message.is_none());
        assert!(body.request_id.is_none());
    }

    #[test]
    fn test_should_ignore_non_error_documents() {
        assert!(ErrorBody::parse(b"").is_none());
        assert!(ErrorBody::parse(b"<html><body>Bad Gateway</body></html>").is_none());
        assert!(ErrorBody::parse(b"<Code>Orphan</Code>").is_none());
    }
}
