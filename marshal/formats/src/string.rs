use core::any::Any;
use std::borrow::Cow;

use marshal_core::{DynValue, Error, Marshaller, Result};
use tracing::trace;

/// A simple marshaller for string values.
///
/// Accepts `String`, `&'static str`, `Box<str>`, `Cow<'static, str>` and
/// `&'static String` values; anything else is rejected with
/// [`Error::UnsupportedType`]. Unmarshalling never fails: bytes that are not
/// valid UTF-8 are converted lossily.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringMarshaller;

impl StringMarshaller {
    pub fn new() -> Self {
        Self
    }
}

fn as_str(any: &dyn Any) -> Option<&str> {
    if let Some(s) = any.downcast_ref::<String>() {
        Some(s.as_str())
    } else if let Some(s) = any.downcast_ref::<&'static str>() {
        Some(*s)
    } else if let Some(s) = any.downcast_ref::<Box<str>>() {
        Some(&**s)
    } else if let Some(s) = any.downcast_ref::<Cow<'static, str>>() {
        Some(s.as_ref())
    } else {
        any.downcast_ref::<&'static String>().map(|s| s.as_str())
    }
}

impl Marshaller for StringMarshaller {
    type Input = dyn DynValue;
    type Output = String;

    fn marshal(&self, value: Option<&Self::Input>) -> Result<Option<Vec<u8>>> {
        let value = match value {
            Some(value) => value,
            None => {
                trace!("marshalling absent string");
                return Ok(None);
            }
        };
        trace!("marshalling value of type {}", value.type_name());

        match as_str(value.as_any()) {
            Some(s) => Ok(Some(s.as_bytes().to_vec())),
            None => {
                trace!("rejecting value of type {}", value.type_name());
                Err(Error::UnsupportedType {
                    type_name: value.type_name(),
                })
            }
        }
    }

    fn unmarshal(&self, bytes: Option<&[u8]>) -> Result<Option<Self::Output>> {
        trace!("unmarshalling string from {:?} bytes", bytes.map(<[u8]>::len));
        Ok(bytes.map(|bytes| String::from_utf8_lossy(bytes).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn marshal() {
        let m = StringMarshaller::new();

        let value: &dyn DynValue = &"test";
        assert_eq!(m.marshal(Some(value)).unwrap(), Some(b"test".to_vec()));

        let value: &dyn DynValue = &"test".to_owned();
        assert_eq!(m.marshal(Some(value)).unwrap(), Some(b"test".to_vec()));

        assert_eq!(m.marshal(None).unwrap(), None);
    }

    #[test]
    fn marshal_other_string_types() {
        let m = StringMarshaller::new();

        let boxed: Box<str> = "boxed".into();
        let value: &dyn DynValue = &boxed;
        assert_eq!(m.marshal(Some(value)).unwrap(), Some(b"boxed".to_vec()));

        let borrowed: Cow<'static, str> = Cow::Borrowed("borrowed");
        let value: &dyn DynValue = &borrowed;
        assert_eq!(m.marshal(Some(value)).unwrap(), Some(b"borrowed".to_vec()));

        let owned: Cow<'static, str> = Cow::Owned("owned".to_owned());
        let value: &dyn DynValue = &owned;
        assert_eq!(m.marshal(Some(value)).unwrap(), Some(b"owned".to_vec()));

        let leaked: &'static String = Box::leak(Box::new("leaked".to_owned()));
        let value: &dyn DynValue = &leaked;
        assert_eq!(m.marshal(Some(value)).unwrap(), Some(b"leaked".to_vec()));
    }

    #[test]
    fn marshal_empty_string() {
        let m = StringMarshaller::new();
        let value: &dyn DynValue = &"";

        assert_eq!(m.marshal(Some(value)).unwrap(), Some(vec![]));
    }

    #[test]
    fn marshal_unsupported_type() {
        let m = StringMarshaller::new();
        let value: &dyn DynValue = &123;

        match m.marshal(Some(value)) {
            Err(Error::UnsupportedType { type_name }) => assert_eq!(type_name, "i32"),
            other => panic!("expected unsupported type, got {:?}", other),
        }

        let value: &dyn DynValue = &b"bytes".to_vec();
        assert!(matches!(
            m.marshal(Some(value)),
            Err(Error::UnsupportedType { .. })
        ));
    }

    #[test]
    fn unmarshal() {
        let m = StringMarshaller::new();

        assert_eq!(m.unmarshal(Some(b"test")).unwrap(), Some("test".to_owned()));
        assert_eq!(m.unmarshal(Some(&b""[..])).unwrap(), Some(String::new()));
        assert_eq!(m.unmarshal(None).unwrap(), None);
    }

    #[test]
    fn unmarshal_invalid_utf8() {
        let m = StringMarshaller::new();
        let value = m.unmarshal(Some(b"ok\xff")).unwrap();

        assert_eq!(value, Some("ok\u{fffd}".to_owned()));
    }

    #[test]
    fn round_trip() {
        let m = StringMarshaller::new();
        let value: &dyn DynValue = &"héllo wörld";

        let bytes = m.marshal(Some(value)).unwrap();
        assert_eq!(
            m.unmarshal(bytes.as_deref()).unwrap(),
            Some("héllo wörld".to_owned())
        );
    }

    #[test]
    fn every_call_is_traced() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let m = StringMarshaller::new();
            let value: &dyn DynValue = &"traced";

            let bytes = m.marshal(Some(value)).unwrap();
            m.marshal(None).unwrap();
            m.unmarshal(bytes.as_deref()).unwrap();
            m.unmarshal(None).unwrap();
        });

        let logs = captured.contents();
        assert_eq!(logs.matches("marshalling value of type").count(), 1);
        assert_eq!(logs.matches("marshalling absent string").count(), 1);
        assert_eq!(logs.matches("unmarshalling string from").count(), 2);
    }
}
