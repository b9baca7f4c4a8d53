use std::path::Path;

use embassy_time::Instant;
use sonarswipe::{
    protocol::{parse_host_command, render_host_event},
    sensing::{
        Channel, EdgeEvent, HostEvent, ReadingRejected, SensingController, SensingInput,
        SensorFault, DEFAULT_SENSOR_CONFIG,
    },
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceRecord {
    pub line_no: usize,
    pub input: SensingInput,
}

/// Parses `<t_us>,<left|right>,<rise|fall|fault>` and `<t_us>,cmd,<line>`
/// records. Blank lines and `#` comments are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>, String> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.splitn(3, ',');
        let t_us = fields
            .next()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .ok_or_else(|| format!("line {line_no}: invalid timestamp"))?;
        let source = fields
            .next()
            .map(str::trim)
            .ok_or_else(|| format!("line {line_no}: missing source"))?;
        let event = fields
            .next()
            .map(str::trim)
            .ok_or_else(|| format!("line {line_no}: missing event"))?;

        let input = match source {
            "cmd" => {
                let command = parse_host_command(event.as_bytes(), &DEFAULT_SENSOR_CONFIG)
                    .map_err(|err| format!("line {line_no}: bad command {event:?}: {err:?}"))?;
                SensingInput::Command(command)
            }
            "left" | "right" => {
                let channel = if source == "left" {
                    Channel::Left
                } else {
                    Channel::Right
                };
                let at = Instant::from_micros(t_us);
                let edge = match event {
                    "rise" => Ok(EdgeEvent::rising(channel, at)),
                    "fall" => Ok(EdgeEvent::falling(channel, at)),
                    "fault" => Err(SensorFault { channel }),
                    other => return Err(format!("line {line_no}: unknown edge {other:?}")),
                };
                SensingInput::Edge(edge)
            }
            other => return Err(format!("line {line_no}: unknown source {other:?}")),
        };
        records.push(TraceRecord { line_no, input });
    }
    Ok(records)
}

pub fn load_trace(path: &Path) -> Result<Vec<TraceRecord>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    parse_trace(&text)
}

/// Feeds every record through a fresh controller and collects the host
/// event lines without their terminators. Dropped readings are interleaved
/// as `#` comment lines.
pub fn replay(records: &[TraceRecord]) -> Vec<String> {
    let mut controller = SensingController::new();
    let mut lines = Vec::new();
    for record in records {
        let output = controller.handle(record.input);
        if let Some(rejected) = output.rejected {
            lines.push(dropped_line(record.line_no, &rejected));
        }
        for event in output.events.into_iter().flatten() {
            lines.push(event_line(&event));
        }
    }
    lines
}

/// Host event lines only, as compared by `--expect`.
pub fn event_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.starts_with('#'))
        .cloned()
        .collect()
}

fn event_line(event: &HostEvent) -> String {
    render_host_event(event).trim_end().to_string()
}

fn dropped_line(line_no: usize, rejected: &ReadingRejected) -> String {
    format!(
        "# dropped line={} channel={} reason={}",
        line_no,
        rejected.channel().label(),
        rejected.reason()
    )
}

/// Returns the first mismatch as `(index, expected, actual)`.
pub fn first_mismatch(
    expected: &[String],
    actual: &[String],
) -> Option<(usize, Option<String>, Option<String>)> {
    let len = expected.len().max(actual.len());
    (0..len).find_map(|idx| {
        let e = expected.get(idx);
        let a = actual.get(idx);
        (e != a).then(|| (idx, e.cloned(), a.cloned()))
    })
}

pub fn parse_expected(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
