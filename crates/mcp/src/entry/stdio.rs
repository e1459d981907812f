#![forbid(unsafe_code)]

use super::framing::{
    TransportMode, detect_mode_from_first_line, parse_request, read_content_length_frame,
    request_expects_response, write_frame,
};
use crate::server::McpServer;
use std::io::{BufRead, Write};

fn handle_body<W: Write>(
    server: &mut McpServer,
    writer: &mut W,
    mode: TransportMode,
    body: &[u8],
) -> std::io::Result<()> {
    let resp = match parse_request(body) {
        Ok(request) => server.handle(request),
        Err(error) => Some(error),
    };
    match resp {
        Some(resp) if request_expects_response(body) => write_frame(writer, mode, &resp),
        _ => Ok(()),
    }
}

/// Serves JSON-RPC until EOF. Framing is detected once from the first non-blank line and then
/// used for every response.
pub(crate) fn run_stdio<R: BufRead, W: Write>(
    server: &mut McpServer,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()> {
    let mut mode: Option<TransportMode> = None;

    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        if text.trim().is_empty() {
            continue;
        }

        let current = match mode {
            Some(current) => current,
            None => {
                let Some(detected) = detect_mode_from_first_line(&text) else {
                    tracing::debug!("stdio: ignoring unframed line before mode detection");
                    continue;
                };
                tracing::debug!(mode = ?detected, "stdio: transport detected");
                mode = Some(detected);
                detected
            }
        };

        match current {
            TransportMode::NewlineJson => {
                handle_body(server, &mut writer, current, line.trim_ascii())?;
            }
            TransportMode::ContentLength => {
                let Some(body) = read_content_length_frame(&mut reader, &text)? else {
                    break;
                };
                handle_body(server, &mut writer, current, &body)?;
            }
        }
    }

    Ok(())
}
