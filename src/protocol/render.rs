use core::fmt::Write;

use crate::sensing::HostEvent;

pub const EVENT_LINE_MAX: usize = 64;

/// One CRLF terminated line per event.
pub fn render_host_event(event: &HostEvent) -> heapless::String<EVENT_LINE_MAX> {
    let mut line = heapless::String::<EVENT_LINE_MAX>::new();
    let _ = match event {
        HostEvent::Started => write!(&mut line, "STARTED\r\n"),
        HostEvent::Gesture(gesture) => write!(&mut line, "MOVEMENT {}\r\n", gesture.label()),
        HostEvent::Calibration(report) => write!(
            &mut line,
            "CALIBRATION left={} right={}\r\n",
            report.left, report.right
        ),
    };
    line
}
