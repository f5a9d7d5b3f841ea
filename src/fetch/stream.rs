use std::io::BufRead;

use log::warn;
use serde_json::Value;

use super::FetchResult;

/// Lazy sequence of server-sent events, each decoded as raw JSON.
///
/// Reading happens only when the next event is pulled. The sequence ends when the
/// server closes the connection; dropping it closes the connection from our side.
pub struct EventStream {
    reader: Box<dyn BufRead + Send>,
    finished: bool,
}

impl EventStream {
    pub fn new<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
            finished: false,
        }
    }

    /// Read lines until a blank line dispatches a non-empty `data` buffer.
    fn next_payload(&mut self) -> FetchResult<Option<String>> {
        let mut data = String::new();
        let mut has_data = false;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = self.reader.read_until(b'\n', &mut buf)?;
            if read == 0 {
                // A trailing event without its blank line is still delivered.
                return Ok(has_data.then_some(data));
            }

            // Invalid UTF-8 becomes U+FFFD, so the event fails JSON decoding and is skipped.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(&['\r', '\n'][..]);
            if line.is_empty() {
                if has_data {
                    return Ok(Some(data));
                }
                continue;
            }

            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };

            if field == "data" {
                if has_data {
                    data.push('\n');
                }
                data.push_str(value);
                has_data = true;
            }
        }
    }
}

impl Iterator for EventStream {
    type Item = FetchResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.next_payload() {
                Ok(Some(payload)) => {
                    if payload.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str(&payload) {
                        Ok(value) => return Some(Ok(value)),
                        Err(err) => {
                            warn!("skipping undecodable stream event: {err}");
                            continue;
                        }
                    }
                }
                Ok(None) => self.finished = true,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn stream_of(text: &str) -> EventStream {
        EventStream::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn yields_events_in_delivery_order() {
        let mut stream = stream_of(
            "data: [{\"symbol\":\"AAPL\",\"latestPrice\":190.1}]\n\n\
             data: [{\"symbol\":\"AAPL\",\"latestPrice\":190.2}]\n\n",
        );

        let first = stream.next().expect("first event").expect("decodes");
        assert_eq!(first[0]["latestPrice"], json!(190.1));
        let second = stream.next().expect("second event").expect("decodes");
        assert_eq!(second[0]["latestPrice"], json!(190.2));
        assert!(stream.next().is_none());
    }

    #[test]
    fn joins_multiline_data_and_ignores_other_fields() {
        let mut stream = stream_of(
            ": keep-alive\r\n\
             event: message\r\n\
             id: 7\r\n\
             data: {\"headline\":\r\n\
             data: \"Earnings beat\"}\r\n\
             \r\n",
        );

        let event = stream.next().expect("event").expect("decodes");
        assert_eq!(event, json!({"headline": "Earnings beat"}));
        assert!(stream.next().is_none());
    }

    #[test]
    fn skips_undecodable_events() {
        let mut stream = stream_of("data: not json\n\ndata: {\"ok\":true}\n\n");
        let event = stream.next().expect("event").expect("decodes");
        assert_eq!(event, json!({"ok": true}));
    }

    #[test]
    fn skips_events_with_invalid_utf8() {
        let bytes = b"data: \xff\xfe{}\n\ndata: {\"ok\":true}\n\n".to_vec();
        let mut stream = EventStream::new(Cursor::new(bytes));

        let event = stream.next().expect("event").expect("decodes");
        assert_eq!(event, json!({"ok": true}));
        assert!(stream.next().is_none());
    }

    #[test]
    fn delivers_trailing_event_without_blank_line() {
        let mut stream = stream_of("data: [1,2]");
        assert_eq!(stream.next().expect("event").expect("decodes"), json!([1, 2]));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }
}
