use gateway_core::{LineProtocol, Mode, ProtocolEvent};
use pretty_assertions::assert_eq;

fn reply(text: &str) -> ProtocolEvent {
    ProtocolEvent::Reply(text.to_string())
}

fn echo(text: &str) -> ProtocolEvent {
    ProtocolEvent::Echo(text.to_string())
}

fn dialed() -> LineProtocol {
    let mut protocol = LineProtocol::new();
    protocol.feed(b"ATDT5551234\r");
    assert_eq!(protocol.mode(), Mode::Interactive);
    protocol
}

#[test]
fn command_mode_acknowledges_without_echo() {
    let mut protocol = LineProtocol::new();

    assert_eq!(protocol.feed(b"AT"), Vec::new());
    assert_eq!(protocol.feed(b"Z\r"), vec![reply("OK")]);
    assert_eq!(protocol.feed(b"AT&F1\r\r"), vec![reply("OK"), reply("OK")]);
    assert_eq!(protocol.mode(), Mode::Command);
}

#[test]
fn dial_connects_and_switches_mode_mid_chunk() {
    let mut protocol = LineProtocol::new();
    let events = protocol.feed(b"atz\ratdt555\r1\r");

    assert_eq!(
        events,
        vec![
            reply("OK"),
            reply("CONNECT 9600"),
            ProtocolEvent::Connected,
            echo("1"),
            echo("\r\n"),
            ProtocolEvent::Line("1".to_string()),
        ]
    );
    assert_eq!(protocol.mode(), Mode::Interactive);
}

#[test]
fn command_mode_drops_non_ascii_bytes() {
    let mut protocol = LineProtocol::new();
    let events = protocol.feed(b"AT\xffZ\r");
    assert_eq!(events, vec![ProtocolEvent::Dropped(0xff), reply("OK")]);
}

#[test]
fn interactive_mode_echoes_and_delivers_lines() {
    let mut protocol = dialed();
    let events = protocol.feed(b"ab\tc\r");

    assert_eq!(
        events,
        vec![
            echo("a"),
            echo("b"),
            echo("\t"),
            echo("c"),
            echo("\r\n"),
            ProtocolEvent::Line("ab\tc".to_string()),
        ]
    );
    assert_eq!(protocol.pending_line(), "");
}

#[test]
fn backspace_and_delete_erase_one_character() {
    let mut protocol = dialed();
    protocol.feed(b"abc");

    assert_eq!(protocol.feed(b"\x08"), vec![echo("\x08 \x08")]);
    assert_eq!(protocol.feed(b"\x7f"), vec![echo("\x08 \x08")]);
    assert_eq!(protocol.pending_line(), "a");
}

#[test]
fn backspace_on_empty_line_is_silent() {
    let mut protocol = dialed();

    assert_eq!(protocol.feed(b"\x08\x7f"), Vec::new());
    assert_eq!(protocol.pending_line(), "");
}

#[test]
fn control_and_high_bytes_are_dropped_in_session() {
    let mut protocol = dialed();
    let events = protocol.feed(b"\n\x1b\xc3x");

    assert_eq!(
        events,
        vec![
            ProtocolEvent::Dropped(b'\n'),
            ProtocolEvent::Dropped(0x1b),
            ProtocolEvent::Dropped(0xc3),
            echo("x"),
        ]
    );
    assert_eq!(protocol.pending_line(), "x");
}

#[test]
fn empty_line_is_still_delivered() {
    let mut protocol = dialed();
    assert_eq!(
        protocol.feed(b"\r"),
        vec![echo("\r\n"), ProtocolEvent::Line(String::new())]
    );
}

#[test]
fn redial_while_connected_reconnects() {
    let mut protocol = dialed();
    let events = protocol.feed(b"ATDT5551234\r");

    assert_eq!(events.last(), Some(&ProtocolEvent::Connected));
    assert!(events.contains(&reply("CONNECT 9600")));
    assert!(!events
        .iter()
        .any(|event| matches!(event, ProtocolEvent::Line(_))));
    assert_eq!(protocol.mode(), Mode::Interactive);
}

#[test]
fn reset_while_connected_returns_to_command_mode() {
    let mut protocol = dialed();
    let events = protocol.feed(b"atz\r");

    assert_eq!(events.last(), Some(&ProtocolEvent::Disconnected));
    assert!(events.contains(&reply("OK")));
    assert_eq!(protocol.mode(), Mode::Command);

    // Back in command mode: no echo.
    assert_eq!(protocol.feed(b"ATZ\r"), vec![reply("OK")]);
}
