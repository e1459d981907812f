#![forbid(unsafe_code)]

use crate::{JsonRpcRequest, json_rpc_error};
use serde_json::Value;
use std::io::{BufRead, Write};

const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransportMode {
    NewlineJson,
    ContentLength,
}

/// Blank or unrecognizable lines leave the mode undecided.
pub(crate) fn detect_mode_from_first_line(line: &str) -> Option<TransportMode> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(TransportMode::NewlineJson);
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
        return Some(TransportMode::ContentLength);
    }
    None
}

fn parse_content_length_header(line: &str) -> Option<usize> {
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

fn invalid_data(message: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, message.to_string())
}

/// Reads headers up to the blank separator, then the body. `Ok(None)` means EOF.
/// Header lines are decoded lossily; a garbled header simply carries no length.
pub(crate) fn read_content_length_frame<R: BufRead>(
    reader: &mut R,
    first_header: &str,
) -> std::io::Result<Option<Vec<u8>>> {
    let mut content_length = parse_content_length_header(first_header);
    let mut header = first_header.to_string();
    let mut raw = Vec::new();

    while !header.trim_end().is_empty() {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        header = String::from_utf8_lossy(&raw).into_owned();
        if content_length.is_none() {
            content_length = parse_content_length_header(&header);
        }
    }

    let Some(len) = content_length else {
        return Err(invalid_data("Missing Content-Length header"));
    };
    if len > MAX_CONTENT_LENGTH_BYTES {
        return Err(invalid_data("Content-Length exceeds max allowed size"));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

pub(crate) fn write_frame<W: Write>(
    writer: &mut W,
    mode: TransportMode,
    resp: &Value,
) -> std::io::Result<()> {
    let body = serde_json::to_vec(resp).map_err(std::io::Error::other)?;
    match mode {
        TransportMode::NewlineJson => {
            writer.write_all(&body)?;
            writer.write_all(b"\n")?;
        }
        TransportMode::ContentLength => {
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
    }
    writer.flush()
}

/// Notifications (no `id`, or `id: null`) never get a reply, not even an error.
/// Unparseable bodies do, since their id cannot be known.
pub(crate) fn request_expects_response(body: &[u8]) -> bool {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return true;
    };
    match value.as_object() {
        Some(obj) => !matches!(obj.get("id"), None | Some(Value::Null)),
        None => true,
    }
}

/// Protocol-level failures come back as ready-to-send JSON-RPC errors.
pub(crate) fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, Value> {
    let data: Value = serde_json::from_slice(body)
        .map_err(|e| json_rpc_error(None, -32700, &format!("Parse error: {e}")))?;

    let (id, has_method) = match data.as_object() {
        Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
        None => return Err(json_rpc_error(None, -32600, "Invalid Request")),
    };
    if !has_method {
        return Err(json_rpc_error(id, -32600, "Invalid Request"));
    }

    serde_json::from_value::<JsonRpcRequest>(data)
        .map_err(|e| json_rpc_error(id, -32600, &format!("Invalid Request: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn first_line_selects_the_transport() {
        assert_eq!(
            detect_mode_from_first_line("  {\"jsonrpc\":\"2.0\"}"),
            Some(TransportMode::NewlineJson)
        );
        assert_eq!(
            detect_mode_from_first_line("Content-Length: 12\r\n"),
            Some(TransportMode::ContentLength)
        );
        assert_eq!(detect_mode_from_first_line("\r\n"), None);
        assert_eq!(detect_mode_from_first_line("hello"), None);
    }

    #[test]
    fn content_length_frames_are_read_exactly() {
        let mut reader = Cursor::new(b"Content-Type: application/json\r\n\r\n{\"a\":1}rest".to_vec());
        let body = read_content_length_frame(&mut reader, "Content-Length: 7\r\n")
            .expect("read")
            .expect("frame");
        assert_eq!(body, b"{\"a\":1}");
    }

    #[test]
    fn oversized_or_headerless_frames_are_rejected() {
        let mut reader = Cursor::new(b"\r\n".to_vec());
        let err = read_content_length_frame(&mut reader, "Content-Type: x\r\n")
            .expect_err("missing length");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

        let mut reader = Cursor::new(b"\r\n".to_vec());
        let huge = format!("Content-Length: {}\r\n", MAX_CONTENT_LENGTH_BYTES + 1);
        assert!(read_content_length_frame(&mut reader, &huge).is_err());
    }

    #[test]
    fn malformed_requests_map_to_json_rpc_errors() {
        let err = parse_request(b"{oops").expect_err("parse");
        assert_eq!(err["error"]["code"], -32700);
        let err = parse_request(b"[1,2]").expect_err("not an object");
        assert_eq!(err["error"]["code"], -32600);
        let err = parse_request(br#"{"jsonrpc":"2.0","id":4}"#).expect_err("no method");
        assert_eq!(err["id"], 4);
        let req = parse_request(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).expect("ok");
        assert_eq!(req.method, "ping");
    }

    #[test]
    fn only_requests_with_an_id_expect_a_response() {
        assert!(request_expects_response(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#));
        assert!(request_expects_response(br#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#));
        assert!(!request_expects_response(
            br#"{"jsonrpc":"2.0","method":"notifications/cancelled"}"#
        ));
        assert!(!request_expects_response(br#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#));
        assert!(request_expects_response(b"{oops"));
        assert!(request_expects_response(b"[1]"));
    }

    #[test]
    fn garbled_header_lines_do_not_abort_the_frame() {
        let mut reader = Cursor::new(b"X-Junk: \xff\xfe\r\n\r\n{}".to_vec());
        let body = read_content_length_frame(&mut reader, "Content-Length: 2\r\n")
            .expect("read")
            .expect("frame");
        assert_eq!(body, b"{}");
    }

    #[test]
    fn frames_are_written_in_the_selected_mode() {
        let resp = serde_json::json!({ "ok": true });
        let mut out = Vec::new();
        write_frame(&mut out, TransportMode::NewlineJson, &resp).expect("write");
        assert_eq!(out, b"{\"ok\":true}\n");

        let mut out = Vec::new();
        write_frame(&mut out, TransportMode::ContentLength, &resp).expect("write");
        assert_eq!(out, b"Content-Length: 11\r\n\r\n{\"ok\":true}");
    }
}
