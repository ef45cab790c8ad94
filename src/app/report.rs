//! Rendering of a `ScanView` for stdout.

use super::notice::Notice;
use super::service::{ScanView, ViewRow};
use chrono::{DateTime, Utc};
use serde::Serialize;

const HEADERS: [&str; 7] = ["#", "SSID", "BSSID", "RSSI", "Channel", "Encryption", "Status"];
const REASON_HEADER: &str = "Reason";

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub command: &'a str,
    pub status_message: &'a str,
    pub networks: &'a [ViewRow],
    pub notices: &'a [Notice],
}

impl<'a> Report<'a> {
    pub fn new(command: &'a str, view: &'a ScanView, notices: &'a [Notice]) -> Self {
        Self {
            generated_at: Utc::now(),
            command,
            status_message: &view.status_message,
            networks: &view.rows,
            notices,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fixed-width table, one line per network, then the status message.
    /// A reason column is added when the rows came out of the classifier.
    pub fn to_table(&self) -> String {
        let with_reason = self.networks.iter().any(|row| row.reason.is_some());

        let mut header: Vec<String> = HEADERS.iter().map(|h| (*h).to_string()).collect();
        if with_reason {
            header.push(REASON_HEADER.to_string());
        }

        let lines: Vec<Vec<String>> = self
            .networks
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let record = &row.record;
                let mut cells = vec![
                    (index + 1).to_string(),
                    record.ssid.clone(),
                    record.bssid.clone(),
                    record.rssi.to_string(),
                    record.channel.to_string(),
                    record.encryption.clone(),
                    record.effective_status().to_string(),
                ];
                if with_reason {
                    cells.push(
                        row.reason
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    );
                }
                cells
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for cells in &lines {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &header, &widths);
        for cells in &lines {
            push_row(&mut out, cells, &widths);
        }
        out.push('\n');
        out.push_str(self.status_message);
        out.push('\n');
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
